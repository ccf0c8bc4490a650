use image::DynamicImage;

/// Largest texture side uploaded to the GPU. Bigger images are downsampled for
/// display only; selection math always runs on source pixels.
pub const MAX_TEXTURE_SIDE: u32 = 4096;

/// Convert a decoded image to an egui ColorImage, shrinking it to fit
/// `max_side` if needed.
pub fn dynamic_to_color_image(image: &DynamicImage, max_side: u32) -> egui::ColorImage {
    let rgba = if image.width() > max_side || image.height() > max_side {
        image.thumbnail(max_side, max_side).to_rgba8()
    } else {
        image.to_rgba8()
    };
    let size = [rgba.width() as usize, rgba.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw())
}
