use std::path::{Path, PathBuf};

use image::DynamicImage;

/// Identity and size of the image shown in one viewport.
///
/// Replaced, never mutated, when the viewport navigates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageRef {
    path: PathBuf,
    width: u32,
    height: u32,
}

impl ImageRef {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            width,
            height,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `[width, height]` as floats, the shape the viewport math expects.
    pub fn size(&self) -> [f64; 2] {
        [f64::from(self.width), f64::from(self.height)]
    }

    /// File name without extension, e.g. `"tile_07"`.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string())
    }

    /// Extension including the leading dot, case kept (`".JPG"`).
    pub fn dotted_extension(&self) -> String {
        self.path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default()
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// A decoded image together with its reference; owned by exactly one viewport.
#[derive(Clone, Debug)]
pub struct LoadedImage {
    pub info: ImageRef,
    pub pixels: DynamicImage,
}

impl LoadedImage {
    pub fn new(path: impl Into<PathBuf>, pixels: DynamicImage) -> Self {
        let info = ImageRef::new(path, pixels.width(), pixels.height());
        Self { info, pixels }
    }
}
