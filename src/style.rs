//! Colours, ratios and timings of the toggle.
//!
//! Every field can be overridden from JSON; missing fields keep their defaults.

use crate::anim::Ease;
use crate::error::{Result, ToggleError};
use crate::utils::lerp;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Straight (non-premultiplied) RGBA with components in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RgbaColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl RgbaColor {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn white(level: f32) -> Self {
        Self::new(level, level, level, 1.0)
    }

    pub const GREEN: RgbaColor = RgbaColor::new(0.0, 1.0, 0.0, 1.0);
    pub const RED: RgbaColor = RgbaColor::new(1.0, 0.0, 0.0, 1.0);
    pub const BLACK: RgbaColor = RgbaColor::new(0.0, 0.0, 0.0, 1.0);

    pub fn lerp(self, other: RgbaColor, t: f32) -> Self {
        Self::new(
            lerp(self.r, other.r, t),
            lerp(self.g, other.g, t),
            lerp(self.b, other.b, t),
            lerp(self.a, other.a, t),
        )
    }

    /// Multiplies the colour channels, clamping to 1. Alpha is untouched.
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(
            (self.r * factor).clamp(0.0, 1.0),
            (self.g * factor).clamp(0.0, 1.0),
            (self.b * factor).clamp(0.0, 1.0),
            self.a,
        )
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
        .unwrap_or(tiny_skia::Color::BLACK)
    }

    /// `#rrggbb` for SVG fills.
    pub fn to_hex(self) -> String {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", c(self.r), c(self.g), c(self.b))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleStyle {
    pub on_color: RgbaColor,
    pub off_color: RgbaColor,
    /// Seconds for every transition.
    pub duration: f32,
    pub frame_ease: Ease,
    pub label_ease: Ease,
    pub knob_ease: Ease,
    /// Knob diameter relative to frame height.
    pub knob_diameter_ratio: f32,
    /// Blur radius of shadows relative to frame width.
    pub shadow_radius_ratio: f32,
    /// Shadow offset (both axes) relative to frame width.
    pub shadow_offset_ratio: f32,
    pub shadow_opacity: f32,
    pub knob_shadow_color: RgbaColor,
    pub label_text_ratio: f32,
    pub label_color: RgbaColor,
    pub on_label: String,
    pub off_label: String,
    pub icon_line_width_ratio: f32,
    /// Brightening applied to the state colour behind the icon.
    pub icon_color_scale: f32,
    pub knob_outer_gradient: [RgbaColor; 2],
    pub knob_inner_gradient: [RgbaColor; 2],
    pub background_gradient: [RgbaColor; 2],
    /// Draw guides, control points and plain outlines instead of the styled widget.
    pub debug: bool,
}

impl Default for ToggleStyle {
    fn default() -> Self {
        Self {
            on_color: RgbaColor::GREEN,
            off_color: RgbaColor::RED,
            duration: 0.6,
            frame_ease: Ease::Linear,
            label_ease: Ease::EaseInOut,
            knob_ease: Ease::EaseInOut,
            knob_diameter_ratio: 0.9,
            shadow_radius_ratio: 0.015,
            shadow_offset_ratio: 0.01,
            shadow_opacity: 0.7,
            knob_shadow_color: RgbaColor::white(0.1),
            label_text_ratio: 0.15,
            label_color: RgbaColor::white(0.4),
            on_label: "ON".to_string(),
            off_label: "OFF".to_string(),
            icon_line_width_ratio: 0.04,
            icon_color_scale: 1.5,
            knob_outer_gradient: [RgbaColor::white(0.45), RgbaColor::white(0.95)],
            knob_inner_gradient: [RgbaColor::white(0.9), RgbaColor::white(0.3)],
            background_gradient: [RgbaColor::white(0.9), RgbaColor::white(0.3)],
            debug: false,
        }
    }
}

impl ToggleStyle {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ToggleError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        let style = Self::from_json_str(&text)?;
        log::info!("loaded toggle style from {}", path.display());
        Ok(style)
    }

    /// State colour at `progress` (0 = off colour, 1 = on colour).
    pub fn state_color(&self, progress: f32) -> RgbaColor {
        self.off_color.lerp(self.on_color, progress.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let style = ToggleStyle::from_json_str(r#"{ "duration": 1.2, "debug": true }"#).unwrap();
        assert_eq!(style.duration, 1.2);
        assert!(style.debug);
        assert_eq!(style.on_color, RgbaColor::GREEN);
        assert_eq!(style.knob_ease, Ease::EaseInOut);
    }

    #[test]
    fn json_round_trip() {
        let mut style = ToggleStyle::default();
        style.on_color = RgbaColor::new(0.1, 0.6, 0.9, 1.0);
        style.frame_ease = Ease::CubicBezier {
            x1: 0.3,
            y1: 0.0,
            x2: 0.2,
            y2: 1.0,
        };
        let back = ToggleStyle::from_json_str(&style.to_json().unwrap()).unwrap();
        assert_eq!(back, style);
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(matches!(
            ToggleStyle::from_json_str("{ \"duration\": \"slow\" }"),
            Err(ToggleError::ConfigParse(_))
        ));
    }

    #[test]
    fn scaled_clamps_channels() {
        let c = RgbaColor::new(0.8, 0.2, 0.0, 0.5).scaled(1.5);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 0.3).abs() < 1e-6);
        assert_eq!(c.a, 0.5);
    }
}
