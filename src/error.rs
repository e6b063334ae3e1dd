//! Errors raised while building the PDF.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to produce the PDF file.
#[derive(Debug, Error)]
pub enum PdfBuildError {
    /// No usable font family could be loaded.
    #[error("failed to load fonts")]
    FontLoad(#[source] genpdf::error::Error),
    /// `genpdf` failed while laying out or serialising the document.
    #[error("failed to render the PDF document")]
    Render(#[source] genpdf::error::Error),
    /// The rendered document could not be written to its destination.
    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
