use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TilecutError};
use crate::selection::BoxSize;
use crate::viewport::{FALLBACK_WINDOW, MAX_ZOOM, MIN_ZOOM};

/// What happens to the zoom factor when the viewport moves to another image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomPolicy {
    /// Back to 1.0 on every navigation.
    #[default]
    Reset,
    /// Keep the current zoom.
    Retain,
}

impl fmt::Display for ZoomPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reset => write!(f, "Reset"),
            Self::Retain => write!(f, "Retain"),
        }
    }
}

/// Session-wide settings for both viewports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub primary_box: BoxSize,
    pub reference_box: BoxSize,
    /// Created next to the primary images; receives primary crops.
    pub output_folder_name: String,
    /// Created inside the output folder; receives reference crops.
    pub reference_subfolder: String,
    /// Appended to the primary stem when renaming a reference image to match.
    pub match_suffix: String,
    pub zoom_policy: ZoomPolicy,
    pub zoom_step: f64,
    pub fallback_window: [f64; 2],
    /// Longest side of the live crop preview, in pixels.
    pub preview_size: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            primary_box: BoxSize::PRIMARY,
            reference_box: BoxSize::REFERENCE,
            output_folder_name: "cutoff".to_string(),
            reference_subfolder: "reference".to_string(),
            match_suffix: "_compare".to_string(),
            zoom_policy: ZoomPolicy::default(),
            zoom_step: 0.1,
            fallback_window: FALLBACK_WINDOW,
            preview_size: 100,
        }
    }
}

impl SessionConfig {
    /// Parse and validate.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| TilecutError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would only fail later, at the first crop or zoom.
    pub fn validate(&self) -> Result<()> {
        for (name, size) in [
            ("primary_box", self.primary_box),
            ("reference_box", self.reference_box),
        ] {
            if size.width == 0 || size.height == 0 {
                return Err(TilecutError::Config(format!("{name} must be non-empty, got {size}")));
            }
        }
        if !(self.zoom_step.is_finite()
            && self.zoom_step > 0.0
            && self.zoom_step <= MAX_ZOOM - MIN_ZOOM)
        {
            return Err(TilecutError::Config(format!(
                "zoom_step must be in (0, {}], got {}",
                MAX_ZOOM - MIN_ZOOM,
                self.zoom_step
            )));
        }
        if self.preview_size == 0 {
            return Err(TilecutError::Config("preview_size must be positive".into()));
        }
        if !self.fallback_window.iter().all(|v| v.is_finite() && *v > 0.0) {
            return Err(TilecutError::Config(format!(
                "fallback_window must be positive, got {:?}",
                self.fallback_window
            )));
        }
        for (name, value) in [
            ("output_folder_name", &self.output_folder_name),
            ("reference_subfolder", &self.reference_subfolder),
        ] {
            if value.trim().is_empty() {
                return Err(TilecutError::Config(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| TilecutError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}
