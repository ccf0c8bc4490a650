use std::path::Path;

use image::{imageops, ColorType, DynamicImage};

use crate::error::Result;
use crate::geometry::PixelRect;
use crate::source::LoadedImage;

/// Decode an image file.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let pixels = image::open(path)?;
    Ok(LoadedImage::new(path, pixels))
}

/// Read only the header to get `(width, height)`.
pub fn image_dimensions(path: &Path) -> Result<(u32, u32)> {
    Ok(image::image_dimensions(path)?)
}

/// Cut `rect` out of `image`. The result is always `rect`-sized; any part of
/// `rect` outside the image is left as zero pixels.
pub fn crop_region(image: &DynamicImage, rect: PixelRect) -> DynamicImage {
    let w = rect.width().max(0) as u32;
    let h = rect.height().max(0) as u32;
    let bounds = PixelRect::new(0, 0, i64::from(image.width()), i64::from(image.height()));

    match rect.intersect(&bounds) {
        Some(inner) if inner == rect => image.crop_imm(rect.x1 as u32, rect.y1 as u32, w, h),
        Some(inner) => {
            let part = image.crop_imm(
                inner.x1 as u32,
                inner.y1 as u32,
                inner.width() as u32,
                inner.height() as u32,
            );
            let mut canvas = DynamicImage::new(w, h, image.color());
            imageops::replace(&mut canvas, &part, inner.x1 - rect.x1, inner.y1 - rect.y1);
            canvas
        }
        None => DynamicImage::new(w, h, image.color()),
    }
}

/// Crop and write to `output`, choosing the format from its extension.
pub fn save_crop(image: &DynamicImage, rect: PixelRect, output: &Path) -> Result<()> {
    let cropped = crop_region(image, rect);
    save_image(&cropped, output)
}

/// Save, converting pixel layouts the target encoder cannot take.
pub fn save_image(image: &DynamicImage, output: &Path) -> Result<()> {
    let ext = output
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("jpg" | "jpeg") if image.color() != ColorType::L8 => {
            DynamicImage::ImageRgb8(image.to_rgb8()).save(output)?
        }
        Some("gif") => DynamicImage::ImageRgba8(image.to_rgba8()).save(output)?,
        _ => image.save(output)?,
    }
    Ok(())
}

/// Low-resolution preview of what committing `rect` would write.
pub fn preview_thumbnail(image: &DynamicImage, rect: PixelRect, max_side: u32) -> DynamicImage {
    crop_region(image, rect).thumbnail(max_side, max_side)
}
