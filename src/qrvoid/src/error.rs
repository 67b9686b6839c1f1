//! Error types for the qrvoid library.

use thiserror::Error;

/// Errors that can occur while rendering or generating a QR image.
///
/// The payload builders never fail; only the steps that touch the QR encoder,
/// image buffers or the background worker report errors.
#[derive(Error, Debug)]
pub enum Error {
    /// The payload could not be encoded as a QR symbol (usually too long).
    #[error("Failed to encode QR code: {0}")]
    Encode(#[from] qrcode::types::QrError),

    /// The image library failed to produce or transform a buffer.
    #[error("Image processing failed: {0}")]
    Image(#[from] image::ImageError),

    /// A color string was not `#RRGGBB`, `#RRGGBBAA`, `black` or `white`.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// The requested module size and quiet zone give an image too large to
    /// allocate.
    #[error("QR image would be {side} pixels wide, the limit is {max}")]
    ImageTooLarge { side: u64, max: u32 },

    /// A generation worker panicked before producing a result.
    #[error("Generation worker panicked: {0}")]
    WorkerPanicked(String),

    /// Nothing was submitted, or the worker went away before delivering a
    /// result.
    #[error("Generation worker disconnected")]
    WorkerDisconnected,
}

/// Result type for qrvoid operations.
pub type Result<T> = std::result::Result<T, Error>;
