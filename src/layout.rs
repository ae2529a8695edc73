use crate::utils::{Position, Rectangle, Size};
use std::f32::consts::{FRAC_PI_2, TAU};
use std::ops::Index;

#[derive(Clone, Copy, Debug)]
pub enum HAnchor {
    Left,
    Center,
    Right,
}
#[derive(Clone, Copy, Debug)]
pub enum VAnchor {
    Top,
    Middle,
    Bottom,
}

#[derive(Clone, Copy, Debug)]
pub struct Anchors {
    pub h: HAnchor,
    pub v: VAnchor,
}

impl Default for Anchors {
    fn default() -> Self {
        Self {
            h: HAnchor::Left,
            v: VAnchor::Top,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Margins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

#[derive(Default)]
pub struct LayoutParams {
    pub anchors: Anchors,
    pub margins: Margins,
}

pub struct LayoutResult {
    pub position: Position,
    pub size: Size,
}

pub fn layout_node(container: Rectangle, size: Size, params: LayoutParams) -> LayoutResult {
    // Apply margins to content area
    let content = Rectangle::new(
        container.x + params.margins.left,
        container.y + params.margins.top,
        (container.width - params.margins.left - params.margins.right).max(0.0),
        (container.height - params.margins.top - params.margins.bottom).max(0.0),
    );

    let x = match params.anchors.h {
        HAnchor::Left => content.x,
        HAnchor::Center => content.x + (content.width - size.width) * 0.5,
        HAnchor::Right => content.x + content.width - size.width,
    };
    let y = match params.anchors.v {
        VAnchor::Top => content.y,
        VAnchor::Middle => content.y + (content.height - size.height) * 0.5,
        VAnchor::Bottom => content.y + content.height - size.height,
    };

    LayoutResult {
        position: Position { x, y },
        size,
    }
}

/// Places `size` in the middle of `container`.
pub fn center_in(container: Rectangle, size: Size) -> Rectangle {
    let out = layout_node(
        container,
        size,
        LayoutParams {
            anchors: Anchors {
                h: HAnchor::Center,
                v: VAnchor::Middle,
            },
            margins: Margins::default(),
        },
    );
    Rectangle::new(out.position.x, out.position.y, out.size.width, out.size.height)
}

/// Largest 2:1 (width:height) size that fits the container.
pub fn fit_toggle_size(container: Size) -> Size {
    let double_height = container.height * 2.0;
    if container.width < double_height {
        Size::new(container.width, container.width * 0.5)
    } else {
        Size::new(double_height, container.height)
    }
}

/// Fractional column/row offsets for a guide grid.
#[derive(Clone, Debug, PartialEq)]
pub struct GuideConfig {
    columns: Vec<f32>,
    rows: Vec<f32>,
}

impl GuideConfig {
    pub fn grid(columns: &[f32], rows: &[f32]) -> Self {
        Self {
            columns: columns.to_vec(),
            rows: rows.to_vec(),
        }
    }

    /// Explicit columns with `row_count` equal divisions (so `row_count + 1` row lines).
    pub fn grid_n(columns: &[f32], row_count: usize) -> Self {
        let n = row_count.max(1);
        let rows = (0..=n).map(|i| i as f32 / n as f32).collect::<Vec<_>>();
        Self {
            columns: columns.to_vec(),
            rows,
        }
    }

    pub fn columns(&self) -> &[f32] {
        &self.columns
    }

    pub fn rows(&self) -> &[f32] {
        &self.rows
    }

    pub fn layout(&self, rect: Rectangle) -> LayoutGuide {
        let mut points = Vec::with_capacity(self.columns.len() * self.rows.len());
        for &row in &self.rows {
            for &col in &self.columns {
                points.push(Position::new(
                    rect.x + rect.width * col,
                    rect.y + rect.height * row,
                ));
            }
        }
        LayoutGuide {
            rect,
            columns: self.columns.len(),
            rows: self.rows.len(),
            points,
            rotation: 0.0,
        }
    }
}

/// Grid of anchor points over a rectangle. Immutable; rotation yields a new guide.
#[derive(Clone, Debug)]
pub struct LayoutGuide {
    rect: Rectangle,
    columns: usize,
    rows: usize,
    points: Vec<Position>,
    rotation: f32,
}

impl LayoutGuide {
    /// Rotates every anchor about the rect centre by `angle * factor` radians.
    pub fn rotated(&self, angle: f32, factor: f32) -> Self {
        let applied = angle * factor;
        let center = self.rect.center();
        Self {
            rect: self.rect,
            columns: self.columns,
            rows: self.rows,
            points: self
                .points
                .iter()
                .map(|p| p.rotated_about(center, applied))
                .collect(),
            rotation: self.rotation + applied,
        }
    }

    pub fn rect(&self) -> Rectangle {
        self.rect
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn at(&self, column: usize, row: usize) -> Option<Position> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.points.get(row * self.columns + column).copied()
    }

    fn anchor(&self, p: Position) -> Position {
        p.rotated_about(self.rect.center(), self.rotation)
    }

    pub fn top(&self) -> Position {
        self.anchor(self.rect.top())
    }

    pub fn bottom(&self) -> Position {
        self.anchor(self.rect.bottom())
    }

    pub fn leading(&self) -> Position {
        self.anchor(self.rect.leading())
    }

    pub fn trailing(&self) -> Position {
        self.anchor(self.rect.trailing())
    }

    pub fn center(&self) -> Position {
        self.rect.center()
    }

    pub fn points(&self) -> &[Position] {
        &self.points
    }
}

impl Index<(usize, usize)> for LayoutGuide {
    type Output = Position;

    /// `guide[(column, row)]`; panics when out of range like slice indexing.
    fn index(&self, (column, row): (usize, usize)) -> &Position {
        assert!(
            column < self.columns && row < self.rows,
            "guide index ({column}, {row}) out of range {}x{}",
            self.columns,
            self.rows
        );
        &self.points[row * self.columns + column]
    }
}

/// Points spread evenly on concentric rings inside a rectangle.
///
/// Angles start at the top and run clockwise. The guide's bounding anchors
/// (`top`, `bottom`, ...) turn with the guide.
#[derive(Clone, Debug)]
pub struct PolarGuide {
    rect: Rectangle,
    rings: usize,
    segments: usize,
    rotation: f32,
}

impl PolarGuide {
    pub fn new(rect: Rectangle, rings: usize, segments: usize) -> Self {
        Self {
            rect,
            rings: rings.max(1),
            segments: segments.max(1),
            rotation: 0.0,
        }
    }

    pub fn rotated(&self, angle: f32, factor: f32) -> Self {
        Self {
            rotation: self.rotation + angle * factor,
            ..self.clone()
        }
    }

    /// Point on `ring` (1-based, outermost == rings) at `segment`.
    pub fn point(&self, ring: usize, segment: usize) -> Position {
        let c = self.rect.center();
        let radius = self.rect.width.min(self.rect.height) * 0.5 * ring.min(self.rings) as f32
            / self.rings as f32;
        let angle = -FRAC_PI_2 + TAU * (segment % self.segments) as f32 / self.segments as f32;
        Position::new(c.x + radius * angle.cos(), c.y + radius * angle.sin())
            .rotated_about(c, self.rotation)
    }

    pub fn top(&self) -> Position {
        self.rect.top().rotated_about(self.rect.center(), self.rotation)
    }

    pub fn bottom(&self) -> Position {
        self.rect
            .bottom()
            .rotated_about(self.rect.center(), self.rotation)
    }
}
