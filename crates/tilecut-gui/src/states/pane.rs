use tilecut_core::session::{EditorSession, ViewportRole};

use crate::convert::{dynamic_to_color_image, MAX_TEXTURE_SIDE};

/// One editor pane: the core session plus the textures and pan offset that
/// only exist on screen.
pub struct PaneState {
    pub session: EditorSession,
    pub texture: Option<egui::TextureHandle>,
    pub preview: Option<egui::TextureHandle>,
    /// Screen-space shift of the image center from the panel center.
    pub pan_offset: egui::Vec2,
    /// Wheel distance not yet turned into zoom steps.
    pub scroll_accum: f32,
    preview_dirty: bool,
}

impl PaneState {
    pub fn new(session: EditorSession) -> Self {
        Self {
            session,
            texture: None,
            preview: None,
            pan_offset: egui::Vec2::ZERO,
            scroll_accum: 0.0,
            preview_dirty: false,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.session.role() {
            ViewportRole::Primary => "Primary",
            ViewportRole::Reference => "Reference",
        }
    }

    /// Upload the current image after it changed.
    pub fn reload_texture(&mut self, ctx: &egui::Context) {
        let name = match self.session.role() {
            ViewportRole::Primary => "primary",
            ViewportRole::Reference => "reference",
        };
        self.texture = self.session.image().map(|img| {
            ctx.load_texture(
                name,
                dynamic_to_color_image(&img.pixels, MAX_TEXTURE_SIDE),
                egui::TextureOptions::LINEAR,
            )
        });
        self.pan_offset = egui::Vec2::ZERO;
        self.mark_preview_dirty();
    }

    pub fn mark_preview_dirty(&mut self) {
        self.preview_dirty = true;
    }

    /// Rebuild the crop preview if the selection changed since the last call.
    pub fn refresh_preview(&mut self, ctx: &egui::Context) {
        if !self.preview_dirty {
            return;
        }
        self.preview_dirty = false;
        self.preview = self.session.preview().map(|thumb| {
            ctx.load_texture(
                "crop_preview",
                dynamic_to_color_image(&thumb, MAX_TEXTURE_SIDE),
                egui::TextureOptions::LINEAR,
            )
        });
    }

    /// On-screen rectangle of the image inside `panel`. Display coordinates
    /// are measured from its top-left corner.
    pub fn image_rect(&self, panel: egui::Rect) -> Option<egui::Rect> {
        let img = self.session.image_ref()?;
        let scale = self.session.viewport().effective_scale() as f32;
        let size = egui::vec2(img.width() as f32, img.height() as f32) * scale;
        Some(egui::Rect::from_center_size(
            panel.center() + self.pan_offset,
            size,
        ))
    }

    /// `"name.jpg (3/12)"` for the viewing label, empty without an image.
    pub fn position_label(&self) -> String {
        let Some(img) = self.session.image_ref() else {
            return String::new();
        };
        let images = self.session.images();
        format!(
            "{} ({}/{})",
            img.file_name(),
            images.position() + 1,
            images.len()
        )
    }
}
