//! Composes a toggle snapshot into a pixmap.
//!
//! Back to front: scene background, frame, labels, knob, icon.

use crate::effects::{drop_shadow, inner_shadow, new_layer, Coverage, InnerShadow};
use crate::error::{Result, ToggleError};
use crate::layout::LayoutGuide;
use crate::path::ShapePath;
use crate::shapes::{frame::frame_guide, icon::icon_guide};
use crate::style::{RgbaColor, ToggleStyle};
use crate::text::LabelRenderer;
use crate::toggle::{KnobVisual, SquishyToggle, ToggleSnapshot};
use crate::utils::{Position, Rectangle};
use std::path::Path;
use tiny_skia::{
    BlendMode, Color, FillRule, GradientStop, LineJoin, LinearGradient, Paint, PathBuilder,
    Pixmap, Point, RadialGradient, Rect, SpreadMode, Stroke, Transform,
};

pub struct Renderer {
    labels: LabelRenderer,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            labels: LabelRenderer::new(),
        }
    }

    pub fn labels(&self) -> &LabelRenderer {
        &self.labels
    }

    /// Renders `toggle` fitted into a fresh `width` x `height` canvas.
    pub fn render(&self, toggle: &SquishyToggle, width: u32, height: u32) -> Result<Pixmap> {
        let mut canvas = new_layer(width, height)?;
        let container = Rectangle::new(0.0, 0.0, width as f32, height as f32);
        let snapshot = toggle.snapshot(container);
        self.render_snapshot(&mut canvas, &snapshot, toggle.style())?;
        Ok(canvas)
    }

    pub fn render_snapshot(
        &self,
        canvas: &mut Pixmap,
        snapshot: &ToggleSnapshot,
        style: &ToggleStyle,
    ) -> Result<()> {
        draw_background(canvas, style);
        self.draw_frame(canvas, snapshot)?;
        for label in &snapshot.labels {
            self.labels
                .draw(canvas, label, style.label_color, BlendMode::Multiply)?;
        }
        draw_knob(canvas, snapshot, style)?;
        self.draw_icon(canvas, snapshot)?;
        if snapshot.debug {
            draw_debug_overlay(canvas, snapshot);
        }
        Ok(())
    }

    fn draw_frame(&self, canvas: &mut Pixmap, snapshot: &ToggleSnapshot) -> Result<()> {
        let Some(path) = snapshot.frame_path.to_skia() else {
            log::warn!("frame path is empty, skipping");
            return Ok(());
        };
        if snapshot.debug {
            stroke_path(canvas, &path, RgbaColor::BLACK, 2.0);
            return Ok(());
        }
        inner_shadow(
            canvas,
            Coverage::Fill(&path),
            &InnerShadow {
                background: snapshot.frame_color,
                radius: snapshot.shadow_radius,
                opacity: snapshot.shadow_opacity,
                offset: snapshot.shadow_offset,
            },
        )
    }

    fn draw_icon(&self, canvas: &mut Pixmap, snapshot: &ToggleSnapshot) -> Result<()> {
        let Some(path) = snapshot.icon_path.to_skia() else {
            return Ok(());
        };
        if snapshot.debug {
            stroke_path(canvas, &path, RgbaColor::BLACK, 2.0);
            return Ok(());
        }
        let stroke = Stroke {
            width: snapshot.icon_line_width,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        inner_shadow(
            canvas,
            Coverage::Stroke(&path, &stroke),
            &InnerShadow {
                background: snapshot.icon_color,
                radius: snapshot.shadow_radius,
                opacity: snapshot.shadow_opacity,
                offset: snapshot.shadow_offset,
            },
        )
    }
}

pub fn save_png(pixmap: &Pixmap, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let bytes = pixmap
        .encode_png()
        .map_err(|e| ToggleError::Png(e.to_string()))?;
    std::fs::write(path, bytes).map_err(|source| ToggleError::Write {
        path: path.display().to_string(),
        source,
    })
}

fn stops(colors: &[RgbaColor; 2], first: f32) -> Vec<GradientStop> {
    vec![
        GradientStop::new(first, colors[0].to_skia()),
        GradientStop::new(1.0, colors[1].to_skia()),
    ]
}

fn draw_background(canvas: &mut Pixmap, style: &ToggleStyle) {
    let (w, h) = (canvas.width() as f32, canvas.height() as f32);
    canvas.fill(Color::WHITE);
    let shader = LinearGradient::new(
        Point::from_xy(0.0, 0.0),
        Point::from_xy(w, h),
        stops(&style.background_gradient, 0.0),
        SpreadMode::Pad,
        Transform::identity(),
    );
    let (Some(shader), Some(rect)) = (shader, Rect::from_xywh(0.0, 0.0, w, h)) else {
        return;
    };
    let paint = Paint {
        shader,
        anti_alias: true,
        ..Paint::default()
    };
    canvas.fill_rect(rect, &paint, Transform::identity(), None);
}

fn draw_knob(canvas: &mut Pixmap, snapshot: &ToggleSnapshot, style: &ToggleStyle) -> Result<()> {
    let KnobVisual { center, diameter } = snapshot.knob;
    let radius = diameter * 0.5;
    let Some(outer) = PathBuilder::from_circle(center.x, center.y, radius) else {
        return Ok(());
    };
    drop_shadow(
        canvas,
        &outer,
        style.knob_shadow_color,
        snapshot.shadow_radius,
        snapshot.shadow_offset,
    )?;

    let rect = snapshot.knob.rect();
    // Light falls from the top-leading corner
    if let Some(shader) = LinearGradient::new(
        Point::from_xy(rect.max_x(), rect.max_y()),
        Point::from_xy(rect.x, rect.y),
        stops(&style.knob_outer_gradient, 0.0),
        SpreadMode::Pad,
        Transform::identity(),
    ) {
        let paint = Paint {
            shader,
            anti_alias: true,
            ..Paint::default()
        };
        canvas.fill_path(&outer, &paint, FillRule::Winding, Transform::identity(), None);
    }

    let inner_radius = radius - diameter * 0.1;
    let Some(inner) = PathBuilder::from_circle(center.x, center.y, inner_radius) else {
        return Ok(());
    };
    // Radial stops run from 0.2 to 1.5 knob widths out of the bottom-trailing corner
    let corner = Point::from_xy(rect.max_x(), rect.max_y());
    let from = diameter * 0.2;
    let to = diameter * 1.5;
    if let Some(shader) = RadialGradient::new(
        corner,
        corner,
        to,
        stops(&style.knob_inner_gradient, from / to),
        SpreadMode::Pad,
        Transform::identity(),
    ) {
        let paint = Paint {
            shader,
            anti_alias: true,
            ..Paint::default()
        };
        canvas.fill_path(&inner, &paint, FillRule::Winding, Transform::identity(), None);
    }
    Ok(())
}

fn stroke_path(canvas: &mut Pixmap, path: &tiny_skia::Path, color: RgbaColor, width: f32) {
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = true;
    let stroke = Stroke {
        width,
        ..Stroke::default()
    };
    canvas.stroke_path(path, &paint, &stroke, Transform::identity(), None);
}

fn polyline(points: &[Position]) -> Option<tiny_skia::Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);
    for p in rest {
        pb.line_to(p.x, p.y);
    }
    pb.finish()
}

fn draw_guide(canvas: &mut Pixmap, guide: &LayoutGuide, color: RgbaColor, width: f32) {
    let (cols, rows) = (guide.column_count(), guide.row_count());
    for row in 0..rows {
        let line: Vec<Position> = (0..cols).filter_map(|c| guide.at(c, row)).collect();
        if let Some(path) = polyline(&line) {
            stroke_path(canvas, &path, color, width);
        }
    }
    for col in 0..cols {
        let line: Vec<Position> = (0..rows).filter_map(|r| guide.at(col, r)).collect();
        if let Some(path) = polyline(&line) {
            stroke_path(canvas, &path, color, width);
        }
    }
}

fn draw_control_points(canvas: &mut Pixmap, path: &ShapePath) {
    let mut pen = path.start();
    for (cp1, cp2, to) in path.control_points() {
        if let Some(from) = pen {
            if let Some(handle) = polyline(&[from, cp1]) {
                stroke_path(canvas, &handle, RgbaColor::new(0.0, 0.0, 1.0, 0.6), 1.0);
            }
        }
        if let Some(handle) = polyline(&[to, cp2]) {
            stroke_path(canvas, &handle, RgbaColor::new(0.0, 0.0, 1.0, 0.6), 1.0);
        }
        for p in [cp1, cp2] {
            if let Some(dot) = PathBuilder::from_circle(p.x, p.y, 2.5) {
                let mut paint = Paint::default();
                paint.set_color(RgbaColor::new(0.0, 0.0, 1.0, 1.0).to_skia());
                paint.anti_alias = true;
                canvas.fill_path(&dot, &paint, FillRule::Winding, Transform::identity(), None);
            }
        }
        pen = Some(to);
    }
}

fn draw_debug_overlay(canvas: &mut Pixmap, snapshot: &ToggleSnapshot) {
    let r = snapshot.frame_rect;
    if let Some(bounds) = Rect::from_xywh(r.x, r.y, r.width, r.height) {
        let path = PathBuilder::from_rect(bounds);
        stroke_path(canvas, &path, RgbaColor::white(0.5).with_alpha(0.2), 1.0);
    }
    draw_guide(
        canvas,
        &frame_guide(snapshot.frame_rect),
        RgbaColor::GREEN,
        2.0,
    );
    draw_guide(
        canvas,
        &icon_guide(snapshot.icon_rect, snapshot.progress.knob),
        RgbaColor::RED,
        1.0,
    );
    draw_control_points(canvas, &snapshot.frame_path);
    draw_control_points(canvas, &snapshot.icon_path);
}
