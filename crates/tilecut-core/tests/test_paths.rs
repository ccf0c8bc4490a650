use std::path::{Path, PathBuf};

use tilecut_core::io::paths::{
    crop_output_path, cutoff_dir, matched_reference_path, reference_dir,
};
use tilecut_core::source::ImageRef;

#[test]
fn test_crop_output_path_keeps_extension_case() {
    let img = ImageRef::new("/data/set1/DSC_0042.JPG", 4000, 3000);
    let out = crop_output_path(Path::new("/data/set1/cutoff"), &img, 7);
    assert_eq!(out, PathBuf::from("/data/set1/cutoff/DSC_0042_cut_7.JPG"));
}

#[test]
fn test_reference_layout() {
    let cutoff = cutoff_dir(Path::new("/data/set1"), "cutoff");
    let refs = reference_dir(&cutoff, "reference");
    let img = ImageRef::new("/data/ir/frame.bmp", 1000, 800);
    assert_eq!(
        crop_output_path(&refs, &img, 3),
        PathBuf::from("/data/set1/cutoff/reference/frame_cut_3.bmp")
    );
}

#[test]
fn test_matched_reference_path() {
    let target = matched_reference_path(Path::new("/ir/IMG_9.png"), "plot_4", "_compare");
    assert_eq!(target, PathBuf::from("/ir/plot_4_compare.png"));
}
