//! Error types for the preview renderer

use thiserror::Error;

/// Result type alias for render operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that terminate a render call
///
/// There is no partial output: any of these aborts the whole render.
#[derive(Error, Debug)]
pub enum Error {
    /// A font resource could not be read or parsed as an outline font
    #[error("invalid font: {0}")]
    InvalidFont(String),

    /// A theme color is not 6 or 8 hex digits (optionally `#`-prefixed)
    #[error("invalid hex color: {0}")]
    InvalidColor(String),

    /// The avatar could not be fetched (non-2xx status or I/O failure)
    #[error("failed to fetch avatar: {0}")]
    AvatarFetchFailed(String),

    /// Body text, display name or handle is empty
    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),

    /// Output format name is not one of png, jpeg, gif, svg, html
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Icon name outside the bundled set
    #[error("unknown icon: {0}")]
    UnknownIcon(String),

    /// Phrase-break model could not be read or decoded
    #[error("invalid segmentation model: {0}")]
    InvalidSegmentModel(String),

    /// JSON payload could not be decoded
    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// Raster encoding failed
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
