use std::path::{Path, PathBuf};

use crate::error::{Result, TilecutError};

/// Extensions the image codec is asked to open, matched case-insensitively.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp"];

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        })
}

/// List supported images directly inside `dir`, sorted by file name.
pub fn scan_folder(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_supported_image(&path) {
            files.push(path);
        }
    }
    if files.is_empty() {
        return Err(TilecutError::NoImages(dir.to_path_buf()));
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavOutcome {
    Moved(usize),
    AtStart,
    AtEnd,
}

impl NavOutcome {
    pub fn moved(&self) -> bool {
        matches!(self, NavOutcome::Moved(_))
    }
}

/// Ordered image files of a folder with a cursor bounded by `[0, len - 1]`.
#[derive(Clone, Debug, Default)]
pub struct ImageList {
    files: Vec<PathBuf>,
    index: usize,
}

impl ImageList {
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self { files, index: 0 }
    }

    pub fn from_folder(dir: &Path) -> Result<Self> {
        Ok(Self::new(scan_folder(dir)?))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Path> {
        self.files.get(self.index).map(PathBuf::as_path)
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Move one step. Stepping past either end leaves the cursor in place.
    pub fn step(&mut self, direction: Direction) -> NavOutcome {
        match direction {
            Direction::Next => self.next(),
            Direction::Prev => self.prev(),
        }
    }

    pub fn next(&mut self) -> NavOutcome {
        if self.index + 1 >= self.files.len() {
            return NavOutcome::AtEnd;
        }
        self.index += 1;
        NavOutcome::Moved(self.index)
    }

    pub fn prev(&mut self) -> NavOutcome {
        if self.index == 0 {
            return NavOutcome::AtStart;
        }
        self.index -= 1;
        NavOutcome::Moved(self.index)
    }

    pub fn jump_to(&mut self, index: usize) -> bool {
        if index < self.files.len() {
            self.index = index;
            true
        } else {
            false
        }
    }

    /// Update the current entry after its file was renamed on disk.
    pub fn replace_current(&mut self, path: PathBuf) {
        if let Some(slot) = self.files.get_mut(self.index) {
            *slot = path;
        }
    }
}
