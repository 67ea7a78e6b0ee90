//! Error types for the itinex-core library.

use thiserror::Error;

/// Main error type for the itinex library.
#[derive(Error, Debug)]
pub enum ItinexError {
    /// Document text extraction error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Pipeline orchestration error.
    #[error("pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to document text extraction.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file format is not one the pipeline accepts.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// Failed to open/parse the document container.
    #[error("failed to parse document: {0}")]
    Parse(String),

    /// Every extraction method failed or produced only whitespace.
    #[error("no text could be extracted from the document")]
    Unextractable,
}

/// Errors raised by the extraction orchestrator.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The document yielded empty/whitespace-only text; nothing to parse.
    #[error("the document contains no extractable text")]
    NoText,

    /// The caller closed the progress channel mid-run; the request was
    /// abandoned without emitting further events.
    #[error("extraction cancelled by the caller")]
    Cancelled,
}

/// Result type for the itinex library.
pub type Result<T> = std::result::Result<T, ItinexError>;
