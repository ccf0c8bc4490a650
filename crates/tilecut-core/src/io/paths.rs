use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Result, TilecutError};
use crate::source::ImageRef;

/// `<folder>/<name>`, where primary crops are written.
pub fn cutoff_dir(source_folder: &Path, name: &str) -> PathBuf {
    source_folder.join(name)
}

/// `<cutoff>/<subfolder>`, where reference crops are written.
pub fn reference_dir(cutoff: &Path, subfolder: &str) -> PathBuf {
    cutoff.join(subfolder)
}

/// `<dir>/<stem>_cut_<sequence><ext>`, keeping the source extension.
pub fn crop_output_path(dir: &Path, source: &ImageRef, sequence: u32) -> PathBuf {
    dir.join(format!(
        "{}_cut_{}{}",
        source.stem(),
        sequence,
        source.dotted_extension()
    ))
}

/// Name a reference image would get when paired with a primary image:
/// `<primary_stem><suffix><reference ext>`, in the reference image's folder.
pub fn matched_reference_path(reference: &Path, primary_stem: &str, suffix: &str) -> PathBuf {
    let ext = reference
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let dir = reference.parent().unwrap_or(Path::new("."));
    dir.join(format!("{primary_stem}{suffix}{ext}"))
}

/// Rename `reference` to its matched name. Refuses to overwrite an existing
/// file, in which case nothing on disk changes.
pub fn rename_to_match(reference: &Path, primary_stem: &str, suffix: &str) -> Result<PathBuf> {
    let target = matched_reference_path(reference, primary_stem, suffix);
    if target == reference {
        return Ok(target);
    }
    if target.exists() {
        return Err(TilecutError::NameCollision(target));
    }
    std::fs::rename(reference, &target)?;
    info!("Renamed {} -> {}", reference.display(), target.display());
    Ok(target)
}
