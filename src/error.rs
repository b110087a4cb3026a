use miette::Diagnostic;
use thiserror::Error;

/// Main error type for pxfx operations
#[derive(Error, Diagnostic, Debug)]
pub enum PxfxError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(pxfx::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Unsupported pixel format: {channels} channel(s) per pixel")]
    #[diagnostic(
        code(pxfx::format),
        help("Only 3-channel RGB and 4-channel ARGB buffers are supported")
    )]
    UnsupportedFormat { channels: usize },

    #[error("Invalid dimensions: {width}x{height}")]
    #[diagnostic(code(pxfx::format))]
    Dimensions { width: usize, height: usize },

    #[error("Buffer size mismatch: expected {expected} bytes, got {actual}")]
    #[diagnostic(code(pxfx::format))]
    BufferSize { expected: usize, actual: usize },

    #[error("Parse error: {message}")]
    #[diagnostic(code(pxfx::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(pxfx::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, PxfxError>;
