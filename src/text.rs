use crate::effects::new_layer;
use crate::error::{Result, ToggleError};
use crate::style::RgbaColor;
use crate::toggle::LabelVisual;
use resvg::usvg::{fontdb, Options, Tree};
use std::sync::Arc;
use tiny_skia::{BlendMode, FilterQuality, Pixmap, PixmapPaint, Transform};

/// Renders text labels through resvg. System fonts are loaded once.
pub struct LabelRenderer {
    options: Options<'static>,
}

impl Default for LabelRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelRenderer {
    pub fn new() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        log::debug!("label renderer loaded {} font faces", db.len());
        let mut options = Options::default();
        options.fontdb = Arc::new(db);
        Self { options }
    }

    pub fn has_fonts(&self) -> bool {
        !self.options.fontdb.is_empty()
    }

    /// Draws `label` centred on its position with `blend`. Fully faded or
    /// zero-scale labels are skipped.
    pub fn draw(
        &self,
        canvas: &mut Pixmap,
        label: &LabelVisual,
        color: RgbaColor,
        blend: BlendMode,
    ) -> Result<()> {
        if label.opacity <= 0.0 || label.scale <= 0.0 || label.text.is_empty() {
            return Ok(());
        }
        let (w, h) = (canvas.width(), canvas.height());
        let svg = label_svg(label, color, w, h);
        let tree = Tree::from_str(&svg, &self.options)
            .map_err(|e| ToggleError::Label(e.to_string()))?;

        let mut layer = new_layer(w, h)?;
        resvg::render(&tree, Transform::identity(), &mut layer.as_mut());

        let paint = PixmapPaint {
            opacity: label.opacity.clamp(0.0, 1.0),
            blend_mode: blend,
            quality: FilterQuality::Nearest,
        };
        canvas.draw_pixmap(0, 0, layer.as_ref(), &paint, Transform::identity(), None);
        Ok(())
    }
}

fn label_svg(label: &LabelVisual, color: RgbaColor, width: u32, height: u32) -> String {
    let (cx, cy) = (label.center.x, label.center.y);
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{width}" height="{height}">
                <g transform="translate({cx} {cy}) scale({s}) translate({ncx} {ncy})">
                    <text x="{cx}" y="{cy}" font-family="Helvetica, Arial, sans-serif" font-weight="500"
                        font-size="{size}" text-anchor="middle" dominant-baseline="central"
                        fill="{fill}" fill-opacity="{alpha}">{text}</text>
                </g>
            </svg>"#,
        s = label.scale,
        ncx = -cx,
        ncy = -cy,
        size = label.font_size,
        fill = color.to_hex(),
        alpha = color.a,
        text = escape_xml(&label.text),
    )
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;

    #[test]
    fn svg_escapes_and_scales() {
        let label = LabelVisual {
            text: "<ON>".into(),
            center: Position::new(50.0, 20.0),
            font_size: 12.0,
            opacity: 1.0,
            scale: 0.5,
        };
        let svg = label_svg(&label, RgbaColor::white(0.4), 100, 40);
        assert!(svg.contains("&lt;ON&gt;"));
        assert!(svg.contains("scale(0.5)"));
        assert!(svg.contains("#666666"));
    }
}
