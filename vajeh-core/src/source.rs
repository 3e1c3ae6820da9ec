//! Image source abstraction.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, Result};

/// File extensions accepted as images.
const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "bmp", "tif", "tiff", "webp"];

/// Where a run's images come from: a single file or a directory of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// One image file.
    File(PathBuf),
    /// A directory scanned for image files.
    Directory(PathBuf),
}

impl ImageSource {
    /// Classify `path` by what is on disk.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.is_dir() {
            Ok(ImageSource::Directory(path))
        } else if path.is_file() {
            Ok(ImageSource::File(path))
        } else {
            Err(PipelineError::Input(format!(
                "image source not found: {}",
                path.display()
            )))
        }
    }

    /// Resolve to the ordered list of image paths the OCR stage walks.
    ///
    /// Directory entries are sorted by name so runs are deterministic;
    /// non-image files are skipped. An empty result is an input error.
    pub fn resolve(&self) -> Result<Vec<PathBuf>> {
        match self {
            ImageSource::File(path) => {
                if path.is_file() {
                    Ok(vec![path.clone()])
                } else {
                    Err(PipelineError::Input(format!(
                        "image not found: {}",
                        path.display()
                    )))
                }
            }
            ImageSource::Directory(dir) => {
                let entries = fs::read_dir(dir).map_err(|err| {
                    PipelineError::Input(format!(
                        "cannot read image directory {}: {err}",
                        dir.display()
                    ))
                })?;

                let mut images = Vec::new();
                for entry in entries {
                    let entry = entry.map_err(|err| {
                        PipelineError::Input(format!(
                            "cannot read entry in {}: {err}",
                            dir.display()
                        ))
                    })?;
                    let path = entry.path();
                    if is_image(&path) {
                        images.push(path);
                    }
                }
                images.sort();

                if images.is_empty() {
                    return Err(PipelineError::Input(format!(
                        "no images found in {}",
                        dir.display()
                    )));
                }
                Ok(images)
            }
        }
    }
}

fn is_image(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
            .unwrap_or(false)
}
