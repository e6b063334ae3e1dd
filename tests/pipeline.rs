use std::cell::RefCell;
use std::fs;

use job_pdf::builder::JobDocumentBuilder;
use job_pdf::decoration::PageDecoration;
use job_pdf::fit::FitOutcome;
use job_pdf::fonts;
use job_pdf::generator::{ContentGenerator, GenerateError};
use job_pdf::geometry::PageGeometry;
use job_pdf::metrics::StandardMetrics;
use job_pdf::model::Block;
use job_pdf::pipeline::{self, JobRequest, PipelineError};
use job_pdf::record::{Content, JobRecord};
use job_pdf::styles::{LayoutStyleSet, TextRole};

/// Returns a fixed record and remembers the prompts it was asked for.
struct StubGenerator {
    record: JobRecord,
    prompts: RefCell<Vec<String>>,
}

impl StubGenerator {
    fn new(record: JobRecord) -> Self {
        Self {
            record,
            prompts: RefCell::new(Vec::new()),
        }
    }
}

impl ContentGenerator for StubGenerator {
    fn generate(&self, prompt: &str) -> Result<JobRecord, GenerateError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        Ok(self.record.clone())
    }
}

struct FailingGenerator;

impl ContentGenerator for FailingGenerator {
    fn generate(&self, _prompt: &str) -> Result<JobRecord, GenerateError> {
        Err(GenerateError::CredentialMissing)
    }
}

fn acme_record() -> JobRecord {
    JobRecord {
        company_name: Content::text("Acme"),
        job_title: Content::text("Backend Engineer"),
        key_responsibilities: Content::list(["Build APIs: design and ship REST APIs"]),
        ..JobRecord::default()
    }
}

fn text_blocks(blocks: &[Block]) -> Vec<(TextRole, String)> {
    blocks
        .iter()
        .filter_map(Block::as_text)
        .map(|text| (text.role(), text.plain_text()))
        .collect()
}

#[test]
fn acme_record_lays_out_title_and_single_bullet() {
    let layout = JobDocumentBuilder::new(acme_record()).layout();
    assert_eq!(layout.outcome, FitOutcome::Untouched);

    assert_eq!(
        text_blocks(&layout.blocks),
        vec![
            (TextRole::Title, "Backend Engineer".to_string()),
            (TextRole::SectionHeader, "Key Responsibilities".to_string()),
            (TextRole::BulletTitle, "• Build APIs:".to_string()),
            (TextRole::BulletBody, "design and ship REST APIs".to_string()),
        ]
    );

    let bullet = layout
        .blocks
        .iter()
        .filter_map(Block::as_text)
        .find(|text| text.role() == TextRole::BulletTitle)
        .expect("bullet present");
    assert_eq!(bullet.bold_text(), "Build APIs:");
}

#[test]
fn acme_record_has_header_but_no_footer() {
    let decoration = PageDecoration::new(
        &acme_record(),
        None,
        PageGeometry::LETTER,
        LayoutStyleSet::default(),
    );
    assert!(!decoration.has_footer());
    assert!(decoration.footer(&StandardMetrics).is_none());
    let header = decoration.header(&StandardMetrics);
    assert_eq!(header.name.map(|name| name.text), Some("Acme".to_string()));
}

#[test]
fn generator_failure_stops_before_rendering() {
    let dir = tempfile::tempdir().expect("temp dir");
    let request = JobRequest::new("Backend engineer", dir.path().join("jd"), None).unwrap();

    let err = pipeline::run(&request, &FailingGenerator).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Generate(GenerateError::CredentialMissing)
    ));
    assert!(!dir.path().join("jd.pdf").exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn pipeline_writes_pdf_with_stub_generator() {
    if !fonts::default_fonts_available(None) {
        eprintln!("Skipping pipeline render: no font family available");
        return;
    }

    let dir = tempfile::tempdir().expect("temp dir");
    let request = JobRequest::new(
        "  Backend engineer at Acme  ",
        dir.path().join("acme"),
        Some(dir.path().join("missing-logo.png")),
    )
    .unwrap();
    let generator = StubGenerator::new(acme_record());

    let record = pipeline::run(&request, &generator).expect("pipeline succeeds");
    assert_eq!(record, acme_record());
    assert_eq!(
        generator.prompts.borrow().as_slice(),
        ["Backend engineer at Acme".to_string()]
    );

    let output = dir.path().join("acme.pdf");
    let bytes = fs::read(&output).expect("pdf written");
    assert!(bytes.starts_with(b"%PDF"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1, "no temp files left");
}

#[test]
fn saved_record_renders_without_generator() {
    if !fonts::default_fonts_available(None) {
        eprintln!("Skipping record render: no font family available");
        return;
    }

    let dir = tempfile::tempdir().expect("temp dir");
    let json = serde_json::to_string(&acme_record()).unwrap();
    let record = JobRecord::from_json(&json).unwrap();
    let output = pipeline::normalize_output_path(dir.path().join("saved.PDF"));

    pipeline::render_record(&record, &output, None, None).expect("render succeeds");
    assert!(dir.path().join("saved.PDF").is_file());
}
