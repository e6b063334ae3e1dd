//! End-to-end flow: request in, PDF on disk.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

use crate::builder::JobDocumentBuilder;
use crate::error::PdfBuildError;
use crate::generator::{ContentGenerator, GenerateError};
use crate::record::JobRecord;

/// Fatal failures of a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("the job description prompt is empty")]
    EmptyPrompt,
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Build(#[from] PdfBuildError),
}

/// A validated request to produce one job description PDF.
#[derive(Clone, Debug, PartialEq)]
pub struct JobRequest {
    prompt: String,
    output: PathBuf,
    logo: Option<PathBuf>,
    fonts_dir: Option<PathBuf>,
}

impl JobRequest {
    /// Validates the inputs: the prompt must not be blank, the output gets a `.pdf` extension and
    /// a logo path that does not exist is dropped.
    pub fn new(
        prompt: impl Into<String>,
        output: impl Into<PathBuf>,
        logo: Option<PathBuf>,
    ) -> Result<Self, PipelineError> {
        let prompt = prompt.into().trim().to_string();
        if prompt.is_empty() {
            return Err(PipelineError::EmptyPrompt);
        }
        Ok(Self {
            prompt,
            output: normalize_output_path(output),
            logo: resolve_logo(logo),
            fonts_dir: None,
        })
    }

    /// Searches `dir` for the bundled fonts first when rendering.
    pub fn with_fonts_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.fonts_dir = dir;
        self
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn logo(&self) -> Option<&Path> {
        self.logo.as_deref()
    }

    pub fn fonts_dir(&self) -> Option<&Path> {
        self.fonts_dir.as_deref()
    }
}

/// Appends `.pdf` unless the path already ends in it, ignoring case.
pub fn normalize_output_path(path: impl Into<PathBuf>) -> PathBuf {
    let path = path.into();
    let has_pdf_extension = path
        .extension()
        .and_then(OsStr::to_str)
        .map_or(false, |ext| ext.eq_ignore_ascii_case("pdf"));
    if has_pdf_extension {
        return path;
    }

    let mut name = path.into_os_string();
    name.push(".pdf");
    PathBuf::from(name)
}

/// Keeps the logo path only if it points at an existing file.
pub fn resolve_logo(logo: Option<PathBuf>) -> Option<PathBuf> {
    let logo = logo.filter(|path| !path.as_os_str().is_empty())?;
    if logo.is_file() {
        Some(logo)
    } else {
        warn!("Logo {} not found; continuing without a logo", logo.display());
        None
    }
}

/// Generates the content for `request` and renders it. Returns the generated record.
pub fn run(
    request: &JobRequest,
    generator: &dyn ContentGenerator,
) -> Result<JobRecord, PipelineError> {
    info!("Generating job description content");
    let record = generator.generate(request.prompt())?;
    render_record(
        &record,
        request.output(),
        request.logo(),
        request.fonts_dir(),
    )?;
    Ok(record)
}

/// Renders an existing record to `output`.
pub fn render_record(
    record: &JobRecord,
    output: &Path,
    logo: Option<&Path>,
    fonts_dir: Option<&Path>,
) -> Result<(), PipelineError> {
    info!("Rendering {}", output.display());
    JobDocumentBuilder::new(record.clone())
        .with_logo_path(logo)
        .with_fonts_dir(fonts_dir)
        .render_to_file(output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_extension_is_appended_once() {
        assert_eq!(normalize_output_path("jd"), PathBuf::from("jd.pdf"));
        assert_eq!(normalize_output_path("jd.pdf"), PathBuf::from("jd.pdf"));
        assert_eq!(normalize_output_path("out/JD.PDF"), PathBuf::from("out/JD.PDF"));
        assert_eq!(normalize_output_path("notes.txt"), PathBuf::from("notes.txt.pdf"));
    }

    #[test]
    fn blank_prompt_is_rejected() {
        let err = JobRequest::new("   ", "jd", None).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyPrompt));
    }

    #[test]
    fn missing_logo_is_dropped() {
        let request = JobRequest::new(
            "Backend engineer",
            "jd",
            Some(PathBuf::from("/definitely/missing/logo.png")),
        )
        .unwrap();
        assert_eq!(request.logo(), None);
        assert_eq!(request.output(), Path::new("jd.pdf"));
        assert_eq!(request.prompt(), "Backend engineer");
    }

    #[test]
    fn existing_logo_is_kept() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let request =
            JobRequest::new("Backend engineer", "jd.pdf", Some(file.path().to_path_buf())).unwrap();
        assert_eq!(request.logo(), Some(file.path()));
        assert_eq!(request.fonts_dir(), None);

        let request = request.with_fonts_dir(Some(PathBuf::from("/opt/fonts")));
        assert_eq!(request.fonts_dir(), Some(Path::new("/opt/fonts")));
    }
}
