//! # rastermatic
//!
//! Converts raster images into SimplePlanes rich-text label markup and wraps
//! the result in a `DesignerParts` sub-assembly document.
//!
//! ## Features
//!
//! - **Scanner**: row-major iteration over RGBA8 pixel buffers
//! - **Encoder**: run-length compressed markup (color runs and transparent gaps)
//! - **Template**: the sub-assembly XML envelope around the markup
//! - **Export**: the whole pipeline behind `ImageSource` / `TextSink` traits
//!
//! ## Quick Start
//!
//! ```ignore
//! use rastermatic::{encode, EncodeOptions};
//!
//! // RGBA image data (4 bytes per pixel)
//! let rgba = vec![255u8, 0, 0, 255, 0, 0, 255, 255]; // red and blue pixels
//! let markup = encode(&rgba, 2, 1, &EncodeOptions::default())?;
//! assert!(markup.contains("&lt;color=#FF0000FF&gt;■"));
//! ```

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub mod encoder;
pub mod export;
pub mod scanner;
pub mod template;

pub use encoder::{
    encode, encode_with_progress, EncodeOptions, MarkupEncoder, DEFAULT_PIXEL_SIZE, GLYPH,
};
pub use export::{
    export, output_file_name, DecodedImage, ExportEvent, ExportSummary, ImageSource, TextSink,
};
pub use scanner::{Pixel, PixelScanner, Rgba};
pub use template::assemble;

/// Boxed error type used for failures raised by I/O collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while importing, encoding or writing an image.
#[derive(Debug, Error)]
pub enum RastermaticError {
    /// The source image could not be opened or decoded
    #[error("failed to import '{path}'")]
    Input {
        path: String,
        #[source]
        source: BoxError,
    },

    /// Buffer size doesn't match expected size for dimensions
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Writing into the markup or document buffer failed
    #[error("failed to format export contents")]
    Format(#[from] fmt::Error),

    /// No destination directory could be determined
    #[error("no output directory available (desktop directory not found)")]
    NoOutputDirectory,

    /// The output document could not be written
    #[error("failed to write '{}'", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RastermaticError {
    /// The pipeline stage this error belongs to.
    pub fn stage(&self) -> ExportStage {
        match self {
            RastermaticError::Input { .. } => ExportStage::Import,
            RastermaticError::BufferSizeMismatch { .. } | RastermaticError::Format(_) => {
                ExportStage::Encode
            }
            RastermaticError::NoOutputDirectory | RastermaticError::Output { .. } => {
                ExportStage::Write
            }
        }
    }
}

/// The three stages an export can fail in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    Import,
    Encode,
    Write,
}

impl fmt::Display for ExportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportStage::Import => write!(f, "an error occurred when importing the specified file"),
            ExportStage::Encode => write!(f, "an error occurred when writing export contents"),
            ExportStage::Write => write!(f, "an error occurred when exporting to file"),
        }
    }
}

/// Result type for rastermatic operations.
pub type Result<T> = core::result::Result<T, RastermaticError>;
