use rastermatic::{RastermaticError, Result, TextSink};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Writes documents into one directory, replacing existing files.
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// A sink for the user's desktop.
    pub fn desktop() -> Result<Self> {
        dirs::desktop_dir()
            .map(Self::new)
            .ok_or(RastermaticError::NoOutputDirectory)
    }
}

impl TextSink for DirectorySink {
    fn write(&mut self, file_name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.dir.join(file_name);
        let tmp_path = self.dir.join(format!(".{file_name}.tmp"));
        let output_error = |source| RastermaticError::Output {
            path: path.clone(),
            source,
        };

        // Write next to the target, then move it into place, so a failed
        // write never truncates an existing export
        let written = File::create(&tmp_path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            writer.write_all(contents.as_bytes())?;
            writer.into_inner().map_err(|e| e.into_error())?.sync_all()
        });
        if let Err(e) = written.and_then(|()| fs::rename(&tmp_path, &path)) {
            if let Err(cleanup) = fs::remove_file(&tmp_path) {
                log::debug!("could not remove '{}': {cleanup}", tmp_path.display());
            }
            return Err(output_error(e));
        }

        Ok(path)
    }
}
