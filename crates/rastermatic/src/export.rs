//! The full export pipeline: load → encode → assemble → write.
//!
//! File and console access stay behind [`ImageSource`] and [`TextSink`], so
//! the pipeline itself can be driven entirely from memory.

use crate::encoder::{encode_with_progress, EncodeOptions};
use crate::template::assemble;
use crate::Result;
use std::path::PathBuf;

/// A decoded image as RGBA8 (4 bytes per pixel).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Where the pixels come from.
pub trait ImageSource {
    /// File name of the source, used as the part name and output file stem.
    fn name(&self) -> String;

    /// Decode the image. Failures are reported as
    /// [`RastermaticError::Input`](crate::RastermaticError::Input).
    fn load(&mut self) -> Result<DecodedImage>;
}

/// Where the finished document goes.
pub trait TextSink {
    /// Store `contents` under `file_name`, replacing any existing file, and
    /// return the final location.
    fn write(&mut self, file_name: &str, contents: &str) -> Result<PathBuf>;
}

/// Progress notifications emitted while exporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportEvent {
    /// The image was decoded.
    Loaded { width: u32, height: u32 },
    /// Row `row` (zero-based) of `total` is about to be encoded.
    Row { row: u32, total: u32 },
}

/// Outcome of a successful export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub bytes: usize,
}

/// Output file name for a source name: `<name>.xml`.
pub fn output_file_name(source_name: &str) -> String {
    format!("{source_name}.xml")
}

/// Run the whole pipeline. Nothing is written unless encoding and assembly
/// both succeed.
pub fn export<S, T, F>(
    source: &mut S,
    sink: &mut T,
    opts: &EncodeOptions,
    mut on_event: F,
) -> Result<ExportSummary>
where
    S: ImageSource + ?Sized,
    T: TextSink + ?Sized,
    F: FnMut(ExportEvent),
{
    let name = source.name();
    let image = source.load()?;
    log::debug!("loaded '{}' ({}x{})", name, image.width, image.height);
    on_event(ExportEvent::Loaded {
        width: image.width,
        height: image.height,
    });

    let markup = encode_with_progress(
        &image.rgba,
        image.width,
        image.height,
        opts,
        |row, total| on_event(ExportEvent::Row { row, total }),
    )?;
    let document = assemble(&name, &markup, image.width, image.height)?;

    let path = sink.write(&output_file_name(&name), &document)?;
    log::info!("wrote {} bytes to '{}'", document.len(), path.display());

    Ok(ExportSummary {
        path,
        width: image.width,
        height: image.height,
        bytes: document.len(),
    })
}
