use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use tilecut_core::io::image_io::load_image;
use tilecut_core::navigation::scan_folder;

#[derive(Args)]
pub struct InfoArgs {
    /// Folder of images
    pub folder: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let files = scan_folder(&args.folder)
        .with_context(|| format!("Failed to scan {}", args.folder.display()))?;

    println!("Folder:  {}", args.folder.display());
    println!("Images:  {}", files.len());
    println!();

    let mut unreadable = 0usize;
    for path in &files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match load_image(path) {
            Ok(img) => println!(
                "  {:<40} {}x{}",
                name,
                img.info.width(),
                img.info.height()
            ),
            Err(e) => {
                unreadable += 1;
                tracing::warn!("Unreadable {}: {e}", path.display());
                println!("  {:<40} {}", name, style(format!("unreadable ({e})")).red());
            }
        }
    }

    if unreadable > 0 {
        println!();
        println!(
            "{}",
            style(format!("{unreadable} file(s) skipped")).yellow()
        );
    }
    Ok(())
}
