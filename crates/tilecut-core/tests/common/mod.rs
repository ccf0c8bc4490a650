#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

use tilecut_core::config::SessionConfig;
use tilecut_core::geometry::Point;
use tilecut_core::session::EditorSession;

/// Write a `width x height` RGB image whose pixels encode their position.
pub fn write_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x / 256 + y / 256) % 256) as u8])
    });
    let path = dir.join(name);
    img.save(&path).unwrap();
    path
}

/// Write a file with an image extension but garbage contents.
pub fn write_corrupt(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"definitely not an image").unwrap();
    path
}

/// Primary session on `dir`, refitted so that `fit_scale` is `0.5` for a
/// 1000x800 image.
pub fn open_primary(dir: &Path) -> EditorSession {
    let mut session = EditorSession::primary(&SessionConfig::default());
    session.open_folder(dir).unwrap();
    session.refit([500.0, 400.0]);
    session
}

/// Click (down + up) at a display point.
pub fn click(session: &mut EditorSession, x: f64, y: f64) {
    session.pointer_down(Point::new(x, y));
    session.pointer_up();
}

/// Sorted file names inside `dir`, files only.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
