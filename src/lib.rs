//! Job description PDF generation.
//!
//! A free-text request is turned into a structured [`record::JobRecord`] by a
//! [`generator::ContentGenerator`], laid out into body blocks, fitted to a page budget and
//! rendered with `genpdf` onto branded US Letter pages.

pub mod body;
pub mod builder;
pub mod config;
pub mod decoration;
pub mod elements;
pub mod error;
pub mod fit;
pub mod fonts;
pub mod formatter;
pub mod generator;
pub mod geometry;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod record;
pub mod richtext;
pub mod styles;

pub use builder::{create_job_description_pdf, JobDocumentBuilder};
pub use error::PdfBuildError;
pub use generator::{ContentGenerator, GenerateError};
pub use pipeline::{JobRequest, PipelineError};
pub use record::{Content, JobRecord};
