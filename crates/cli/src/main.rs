use std::error::Error;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use log::{debug, warn};

use job_pdf::config::Config;
use job_pdf::generator::GeminiClient;
use job_pdf::pipeline::{self, JobRequest};
use job_pdf::JobRecord;

const DEFAULT_OUTPUT: &str = "job_description.pdf";

/// Generates a branded job description PDF from a short free-text prompt.
///
/// Anything not given on the command line is asked for interactively.  The Gemini API key is
/// read from `--api-key`, `GEMINI_API_KEY` or a `.env` file.
#[derive(Parser)]
#[command(author, version, about = "Generate job description PDFs from a short prompt")]
struct Cli {
    /// Job description prompt.
    #[arg(short, long)]
    prompt: Option<String>,

    /// Output PDF file; `.pdf` is appended when missing.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Logo image drawn in the page header.
    #[arg(short, long)]
    logo: Option<PathBuf>,

    /// Gemini API key, overriding the environment.
    #[arg(long)]
    api_key: Option<String>,

    /// Render a previously saved record instead of generating one.
    #[arg(long, value_name = "JSON", conflicts_with = "prompt")]
    record: Option<PathBuf>,

    /// Save the generated record as JSON.
    #[arg(long, value_name = "JSON", conflicts_with = "record")]
    save_record: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(Some(output)) => println!("\nSuccess! Generated PDF: {}", output.display()),
        Ok(None) => {}
        Err(err) => {
            eprintln!("Error: {}", err);
            print_error_sources(err.as_ref());
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<Option<PathBuf>, Box<dyn Error>> {
    let config = Config::from_env();
    if let Some(dir) = config.fonts_dir.as_ref().filter(|dir| !dir.is_dir()) {
        warn!("Font directory {} does not exist", dir.display());
    }

    let interactive = cli.prompt.is_none() && cli.record.is_none();
    let mut input = io::stdin().lock();

    let prompt = match (&cli.prompt, &cli.record) {
        (Some(prompt), _) => Some(prompt.clone()),
        (None, None) => Some(ask(&mut input, "Enter job description prompt: ")?),
        (None, Some(_)) => None,
    };
    if matches!(&prompt, Some(prompt) if prompt.trim().is_empty()) && interactive {
        return Ok(None);
    }

    let output = match cli.output {
        Some(output) => output,
        None if interactive => {
            let answer = ask(
                &mut input,
                &format!("Output PDF filename (default: {DEFAULT_OUTPUT}): "),
            )?;
            if answer.is_empty() {
                PathBuf::from(DEFAULT_OUTPUT)
            } else {
                PathBuf::from(answer)
            }
        }
        None => PathBuf::from(DEFAULT_OUTPUT),
    };

    let logo = match cli.logo {
        Some(logo) => Some(logo),
        None if interactive => {
            let answer = ask(&mut input, "Logo path (optional, press Enter to skip): ")?;
            (!answer.is_empty()).then(|| PathBuf::from(answer))
        }
        None => None,
    };

    if let Some(record_path) = cli.record {
        debug!("Rendering saved record {}", record_path.display());
        let text = fs::read_to_string(&record_path)?;
        let record = JobRecord::from_json(&text)?;
        let output = pipeline::normalize_output_path(output);
        let logo = pipeline::resolve_logo(logo);
        pipeline::render_record(&record, &output, logo.as_deref(), config.fonts_dir.as_deref())?;
        return Ok(Some(output));
    }

    let request = JobRequest::new(prompt.unwrap_or_default(), output, logo)?
        .with_fonts_dir(config.fonts_dir.clone());
    let generator = GeminiClient::from_config(&config, cli.api_key.as_deref())?;
    let record = pipeline::run(&request, &generator)?;

    if let Some(path) = cli.save_record {
        let json = serde_json::to_string_pretty(&record)?;
        fs::write(&path, json)?;
        debug!("Saved record to {}", path.display());
    }

    Ok(Some(request.output().to_path_buf()))
}

fn ask(input: &mut impl BufRead, question: &str) -> io::Result<String> {
    print!("{question}");
    io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
