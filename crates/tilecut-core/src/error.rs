use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TilecutError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("No supported images in {}", .0.display())]
    NoImages(PathBuf),

    #[error("Target already exists: {}", .0.display())]
    NameCollision(PathBuf),

    #[error("No image loaded")]
    NoActiveImage,

    #[error("No output directory set")]
    NoOutputDir,

    #[error("Zoom factor {0:.2} outside allowed range")]
    ZoomOutOfRange(f64),

    #[error("Invalid label on line {line}: {reason}")]
    InvalidLabel { line: usize, reason: String },

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TilecutError>;
