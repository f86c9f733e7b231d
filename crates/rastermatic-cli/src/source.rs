use image::ImageReader;
use rastermatic::{DecodedImage, ImageSource, RastermaticError, Result};
use std::path::{Path, PathBuf};

/// Loads an image file from disk with the `image` crate.
pub struct FileImageSource {
    path: PathBuf,
}

impl FileImageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn input_error(&self, source: impl Into<rastermatic::BoxError>) -> RastermaticError {
        RastermaticError::Input {
            path: self.path.display().to_string(),
            source: source.into(),
        }
    }
}

impl ImageSource for FileImageSource {
    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    fn load(&mut self) -> Result<DecodedImage> {
        // The reader owns the file handle and drops it on every path out
        let img = ImageReader::open(&self.path)
            .map_err(|e| self.input_error(e))?
            .with_guessed_format()
            .map_err(|e| self.input_error(e))?
            .decode()
            .map_err(|e| self.input_error(e))?;

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();
        Ok(DecodedImage {
            width,
            height,
            rgba: rgba_img.into_raw(),
        })
    }
}
