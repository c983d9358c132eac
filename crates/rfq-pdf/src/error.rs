//! # Render Error Types

use thiserror::Error;

/// Failures while building or serializing a quotation document.
///
/// Rendering happens entirely in memory, so an error always means no bytes
/// were handed back to the caller.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Encoding a page content stream failed.
    #[error("Failed to encode page {page} content: {message}")]
    ContentEncoding { page: usize, message: String },

    /// The caller cancelled the render before it finished.
    #[error("Render cancelled")]
    Cancelled,

    /// Writing the finished document to the output buffer failed.
    #[error("Failed to serialize document: {0}")]
    Serialize(String),
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Serialize(err.to_string())
    }
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
