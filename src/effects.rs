//! Shadow and blur effects composed from tiny-skia primitives.

use crate::error::{Result, ToggleError};
use crate::style::RgbaColor;
use crate::utils::Position;
use tiny_skia::{
    BlendMode, FillRule, Mask, Paint, Path, Pixmap, PixmapPaint, Rect, Stroke, Transform,
};

/// The area an effect applies to: a filled path or the outline of a stroked one.
#[derive(Clone, Copy)]
pub enum Coverage<'a> {
    Fill(&'a Path),
    Stroke(&'a Path, &'a Stroke),
}

impl Coverage<'_> {
    /// The covered area as a path to be filled with the winding rule.
    pub fn outline(&self) -> Option<Path> {
        match *self {
            Coverage::Fill(path) => Some(path.clone()),
            Coverage::Stroke(path, stroke) => path.stroke(stroke, 1.0),
        }
    }

    pub fn mask(&self, width: u32, height: u32) -> Option<Mask> {
        let outline = self.outline()?;
        let mut mask = Mask::new(width, height)?;
        mask.fill_path(&outline, FillRule::Winding, true, Transform::identity());
        Some(mask)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct InnerShadow {
    /// Colour multiplied over the shaded layer.
    pub background: RgbaColor,
    pub radius: f32,
    /// Darkness of the shadowed rim; the base layer is white at `1 - opacity`.
    pub opacity: f32,
    /// Offset of the blurred highlight; the shadow shows on the opposite rim.
    pub offset: Position,
}

pub(crate) fn new_layer(width: u32, height: u32) -> Result<Pixmap> {
    Pixmap::new(width, height).ok_or(ToggleError::InvalidCanvas { width, height })
}

fn solid(color: RgbaColor) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = true;
    paint
}

/// Paints `coverage` with an inner shadow.
///
/// The layer is the covered area in grey, with a blurred white copy of the
/// area offset on top of it. The background colour is multiplied over the
/// layer, the result is clipped to the coverage and drawn over `canvas`.
pub fn inner_shadow(canvas: &mut Pixmap, coverage: Coverage, shadow: &InnerShadow) -> Result<()> {
    let (w, h) = (canvas.width(), canvas.height());
    let Some(outline) = coverage.outline() else {
        return Ok(());
    };
    let Some(mask) = coverage.mask(w, h) else {
        return Ok(());
    };

    let mut layer = new_layer(w, h)?;
    let base = RgbaColor::white(1.0 - shadow.opacity.clamp(0.0, 1.0));
    layer.fill_path(
        &outline,
        &solid(base),
        FillRule::Winding,
        Transform::identity(),
        None,
    );

    let mut highlight = new_layer(w, h)?;
    highlight.fill_path(
        &outline,
        &solid(RgbaColor::white(1.0)),
        FillRule::Winding,
        Transform::identity(),
        None,
    );
    stack_blur(&mut highlight, shadow.radius.round().max(0.0) as u32);
    layer.draw_pixmap(
        0,
        0,
        highlight.as_ref(),
        &PixmapPaint::default(),
        Transform::from_translate(shadow.offset.x, shadow.offset.y),
        None,
    );

    let mut multiply = solid(shadow.background);
    multiply.blend_mode = BlendMode::Multiply;
    if let Some(full) = Rect::from_xywh(0.0, 0.0, w as f32, h as f32) {
        layer.fill_rect(full, &multiply, Transform::identity(), None);
    }

    layer.apply_mask(&mask);
    canvas.draw_pixmap(
        0,
        0,
        layer.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );
    Ok(())
}

/// Blurred, offset silhouette of `path` drawn under whatever comes next.
pub fn drop_shadow(
    canvas: &mut Pixmap,
    path: &Path,
    color: RgbaColor,
    radius: f32,
    offset: Position,
) -> Result<()> {
    let mut layer = new_layer(canvas.width(), canvas.height())?;
    layer.fill_path(
        path,
        &solid(color),
        FillRule::Winding,
        Transform::identity(),
        None,
    );
    stack_blur(&mut layer, radius.round().max(0.0) as u32);
    canvas.draw_pixmap(
        0,
        0,
        layer.as_ref(),
        &PixmapPaint::default(),
        Transform::from_translate(offset.x, offset.y),
        None,
    );
    Ok(())
}

/// Triangle-kernel ("stack") blur in place, edges extended.
///
/// Each axis runs two box passes of width `radius + 1`, one leaning left and
/// one leaning right, which together weight neighbours 1, 2, .., r+1, .., 2, 1.
pub fn stack_blur(pixmap: &mut Pixmap, radius: u32) {
    let r = radius.min(254) as usize;
    let (w, h) = (pixmap.width() as usize, pixmap.height() as usize);
    if r == 0 || w == 0 || h == 0 {
        return;
    }
    let lean_left = (r / 2, r - r / 2);
    let lean_right = (r - r / 2, r / 2);
    let data = pixmap.data_mut();

    let mut line = vec![[0u32; 4]; w.max(h)];
    let mut tmp = vec![[0u32; 4]; w.max(h)];

    for y in 0..h {
        for x in 0..w {
            line[x] = read_px(data, y * w + x);
        }
        box_pass(&line[..w], &mut tmp[..w], lean_left);
        box_pass(&tmp[..w], &mut line[..w], lean_right);
        for x in 0..w {
            write_px(data, y * w + x, line[x]);
        }
    }

    for x in 0..w {
        for y in 0..h {
            line[y] = read_px(data, y * w + x);
        }
        box_pass(&line[..h], &mut tmp[..h], lean_left);
        box_pass(&tmp[..h], &mut line[..h], lean_right);
        for y in 0..h {
            write_px(data, y * w + x, line[y]);
        }
    }
}

#[inline]
fn read_px(data: &[u8], i: usize) -> [u32; 4] {
    let o = i * 4;
    [
        data[o] as u32,
        data[o + 1] as u32,
        data[o + 2] as u32,
        data[o + 3] as u32,
    ]
}

#[inline]
fn write_px(data: &mut [u8], i: usize, px: [u32; 4]) {
    let o = i * 4;
    let a = px[3].min(255);
    // Premultiplied: colour never exceeds alpha
    data[o] = px[0].min(a) as u8;
    data[o + 1] = px[1].min(a) as u8;
    data[o + 2] = px[2].min(a) as u8;
    data[o + 3] = a as u8;
}

/// Mean over `[i - before, i + after]` with clamped edges.
fn box_pass(src: &[[u32; 4]], dst: &mut [[u32; 4]], (before, after): (usize, usize)) {
    let n = src.len();
    let count = (before + after + 1) as u32;
    let last = n - 1;
    let mut sum = [0u32; 4];
    // Window for i = 0
    for k in 0..=(before + after) {
        let j = (k as isize - before as isize).clamp(0, last as isize) as usize;
        for c in 0..4 {
            sum[c] += src[j][c];
        }
    }
    for i in 0..n {
        for c in 0..4 {
            dst[i][c] = (sum[c] + count / 2) / count;
        }
        let out = (i as isize - before as isize).clamp(0, last as isize) as usize;
        let inn = (i + after + 1).min(last);
        for c in 0..4 {
            sum[c] = sum[c] + src[inn][c] - src[out][c];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_skia::PathBuilder;

    #[test]
    fn blur_spreads_symmetrically() {
        let mut pm = Pixmap::new(21, 21).unwrap();
        let i = (10 * 21 + 10) * 4;
        pm.data_mut()[i..i + 4].copy_from_slice(&[255, 255, 255, 255]);
        stack_blur(&mut pm, 2);
        let alpha = |x: usize, y: usize| pm.data()[(y * 21 + x) * 4 + 3];
        assert!(alpha(10, 10) > 0 && alpha(10, 10) < 255);
        assert!(alpha(11, 10) > 0);
        assert!(alpha(10, 12) > 0);
        assert_eq!(alpha(0, 0), 0);
        // symmetric kernel
        assert_eq!(alpha(9, 10), alpha(11, 10));
    }

    #[test]
    fn inner_shadow_stays_inside_coverage() {
        let mut canvas = Pixmap::new(40, 40).unwrap();
        let circle = PathBuilder::from_circle(20.0, 20.0, 12.0).unwrap();
        let shadow = InnerShadow {
            background: RgbaColor::GREEN,
            radius: 2.0,
            opacity: 0.7,
            offset: Position::new(1.0, 1.0),
        };
        inner_shadow(&mut canvas, Coverage::Fill(&circle), &shadow).unwrap();
        let px = |x: usize, y: usize| {
            let o = (y * 40 + x) * 4;
            [
                canvas.data()[o],
                canvas.data()[o + 1],
                canvas.data()[o + 2],
                canvas.data()[o + 3],
            ]
        };
        assert_eq!(px(1, 1)[3], 0);
        let mid = px(22, 22);
        assert_eq!(mid[3], 255);
        assert!(mid[1] > 200 && mid[0] == 0);
        // the rim facing away from the offset is darker than the interior
        let rim = px(9, 20);
        assert!(rim[3] > 0);
        assert!(rim[1] < mid[1]);
    }
}
