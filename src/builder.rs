//! Document construction for job description PDFs.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};
use tempfile::NamedTempFile;

use crate::body;
use crate::config::Config;
use crate::decoration::{self, PageDecoration, SkippedParts};
use crate::elements::{BodyElement, LogoImage};
use crate::error::PdfBuildError;
use crate::fit::{self, FitOutcome};
use crate::fonts;
use crate::geometry::PageGeometry;
use crate::metrics::StandardMetrics;
use crate::model::Block;
use crate::record::JobRecord;
use crate::styles::LayoutStyleSet;

/// Body blocks and styles after the overflow fitter has run.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedLayout {
    pub blocks: Vec<Block>,
    pub styles: LayoutStyleSet,
    pub outcome: FitOutcome,
}

/// Rendered PDF bytes.
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    /// Header and footer parts that could not be drawn, e.g. `"header logo on page 1"`.
    pub skipped_decorations: Vec<String>,
}

/// Builder for job description documents.
pub struct JobDocumentBuilder {
    record: JobRecord,
    logo_path: Option<PathBuf>,
    logo: Option<LogoImage>,
    page: PageGeometry,
    styles: LayoutStyleSet,
    fonts_dir: Option<PathBuf>,
}

impl JobDocumentBuilder {
    /// Creates a builder for `record` with the default page setup.
    pub fn new(record: JobRecord) -> Self {
        Self {
            record,
            logo_path: None,
            logo: None,
            page: PageGeometry::default(),
            styles: LayoutStyleSet::default(),
            fonts_dir: None,
        }
    }

    /// Draws the logo at `path` in the header of every page. Missing or unreadable files are
    /// skipped with a warning.
    pub fn with_logo_path(mut self, path: Option<impl Into<PathBuf>>) -> Self {
        self.logo_path = path.map(Into::into);
        self
    }

    /// Uses an already decoded logo.
    pub fn with_logo(mut self, logo: LogoImage) -> Self {
        self.logo = Some(logo);
        self
    }

    pub fn with_page_geometry(mut self, page: PageGeometry) -> Self {
        self.page = page;
        self
    }

    pub fn with_styles(mut self, styles: LayoutStyleSet) -> Self {
        self.styles = styles;
        self
    }

    /// Searches `dir` for the bundled fonts before the default locations.
    pub fn with_fonts_dir(mut self, dir: Option<impl Into<PathBuf>>) -> Self {
        self.fonts_dir = dir.map(Into::into);
        self
    }

    /// Builds the body and runs the overflow fitter without touching fonts or `genpdf`.
    pub fn layout(&self) -> PreparedLayout {
        let mut blocks = body::build_body(&self.record);
        let mut styles = self.styles;
        let outcome = fit::fit_to_budget(&mut blocks, &mut styles, &self.page, &StandardMetrics);
        debug!("Prepared {} body blocks ({:?})", blocks.len(), outcome);
        PreparedLayout {
            blocks,
            styles,
            outcome,
        }
    }

    /// Builds a fully configured `genpdf::Document`.
    pub fn build(self) -> Result<genpdf::Document, PdfBuildError> {
        self.assemble().map(|(document, _)| document)
    }

    fn assemble(self) -> Result<(genpdf::Document, SkippedParts), PdfBuildError> {
        let layout = self.layout();

        let font_family =
            fonts::default_font_family(self.fonts_dir.as_deref()).map_err(PdfBuildError::FontLoad)?;

        let logo = self
            .logo
            .or_else(|| self.logo_path.as_deref().and_then(decoration::load_logo));

        let mut document = genpdf::Document::new(font_family);
        document.set_title(title_of(&self.record));
        document.set_paper_size(self.page.paper_size());
        let decoration = PageDecoration::new(&self.record, logo, self.page, layout.styles);
        let skipped = decoration.skipped_parts();
        document.set_page_decorator(decoration);

        for block in &layout.blocks {
            document.push(BodyElement::from_block(block, &layout.styles));
        }

        Ok((document, skipped))
    }

    /// Renders the document into memory.
    pub fn render(self) -> Result<RenderedPdf, PdfBuildError> {
        let (document, skipped) = self.assemble()?;
        let mut bytes = Vec::new();
        document
            .render(&mut bytes)
            .map_err(PdfBuildError::Render)?;
        Ok(RenderedPdf {
            bytes,
            skipped_decorations: skipped.take(),
        })
    }

    /// Renders the document and writes it to `path`.
    ///
    /// The bytes are written to a temporary file next to `path` and moved into place, so a failed
    /// render never leaves a truncated PDF behind.
    pub fn render_to_file(self, path: impl AsRef<Path>) -> Result<(), PdfBuildError> {
        let path = path.as_ref();
        let rendered = self.render()?;
        write_atomically(path, &rendered.bytes)?;
        info!("Wrote {} ({} bytes)", path.display(), rendered.bytes.len());
        Ok(())
    }
}

fn title_of(record: &JobRecord) -> String {
    if record.job_title.has_content() {
        record.job_title.inline_text()
    } else {
        body::DEFAULT_JOB_TITLE.to_string()
    }
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), PdfBuildError> {
    let io_error = |source| PdfBuildError::Io {
        path: path.to_path_buf(),
        source,
    };

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&directory).map_err(io_error)?;

    let mut file = NamedTempFile::new_in(&directory).map_err(io_error)?;
    file.write_all(bytes).map_err(io_error)?;
    file.flush().map_err(io_error)?;
    file.persist(path)
        .map_err(|err| io_error(err.error))?;
    Ok(())
}

/// Renders `record` to a PDF at `output`, with an optional header logo. Fonts are looked up in
/// the directory configured through the environment first.
pub fn create_job_description_pdf(
    output: impl AsRef<Path>,
    record: &JobRecord,
    logo: Option<&Path>,
) -> Result<(), PdfBuildError> {
    JobDocumentBuilder::new(record.clone())
        .with_logo_path(logo)
        .with_fonts_dir(Config::from_env().fonts_dir)
        .render_to_file(output)
}
