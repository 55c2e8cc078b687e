//! Error types for h5pbook core

use thiserror::Error;

/// Result type alias using H5pBookError
pub type Result<T> = std::result::Result<T, H5pBookError>;

/// Top-level error type for all compiler operations
#[derive(Debug, Error)]
pub enum H5pBookError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Package error: {0}")]
    Package(#[from] PackageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors in the author's source document
///
/// Malformed block-internal syntax never lands here; builders default instead.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("No chapters found: the document needs at least one '# ' heading or some content")]
    NoChaptersFound,
}

/// Errors detected while validating the template archive, before any building starts
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Missing manifest: the template has no h5p.json")]
    MissingManifest,

    #[error("Malformed manifest: {0}")]
    MalformedManifest(String),

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Corrupt template archive: {0}")]
    CorruptTemplate(String),
}

/// Fatal failures while assembling the output archive
#[derive(Debug, Error)]
pub enum PackageError {
    #[error("Failed to read archive: {0}")]
    ArchiveRead(String),

    #[error("Failed to write archive: {0}")]
    ArchiveWrite(String),

    #[error("Failed to serialize content: {0}")]
    Serialize(String),

    #[error("Directory repair removed files: {0}")]
    RepairInvariant(String),
}
