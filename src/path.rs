//! Command-list vector paths.
//!
//! Paths are rebuilt every frame from the current progress; nothing here is
//! retained between frames. They convert to `tiny_skia::Path` for rasterising
//! and flatten to polylines for hit and shape checks.

use crate::utils::Position;
use std::f32::consts::FRAC_PI_2;
use tiny_skia::PathBuilder;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Position),
    CubicTo {
        to: Position,
        cp1: Position,
        cp2: Position,
    },
    /// Circular arc around `center`. Angles in radians, y grows downwards,
    /// positive sweep runs clockwise on screen.
    Arc {
        center: Position,
        radius: f32,
        start_angle: f32,
        sweep: f32,
    },
    Close,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapePath {
    commands: Vec<PathCommand>,
}

impl ShapePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, p: Position) {
        self.commands.push(PathCommand::MoveTo(p));
    }

    pub fn cubic_to(&mut self, to: Position, cp1: Position, cp2: Position) {
        self.commands.push(PathCommand::CubicTo { to, cp1, cp2 });
    }

    pub fn arc(&mut self, center: Position, radius: f32, start_angle: f32, sweep: f32) {
        self.commands.push(PathCommand::Arc {
            center,
            radius,
            start_angle,
            sweep,
        });
    }

    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn start(&self) -> Option<Position> {
        self.commands.iter().find_map(|c| match c {
            PathCommand::MoveTo(p) => Some(*p),
            _ => None,
        })
    }

    /// Pen position after the last drawing command, ignoring `Close`.
    pub fn end_point(&self) -> Option<Position> {
        self.commands.iter().rev().find_map(|c| match *c {
            PathCommand::MoveTo(p) => Some(p),
            PathCommand::CubicTo { to, .. } => Some(to),
            PathCommand::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } => Some(arc_point(center, radius, start_angle + sweep)),
            PathCommand::Close => None,
        })
    }

    /// Ends with `Close` and the last segment already lands on the start point.
    pub fn is_closed(&self, tolerance: f32) -> bool {
        if !matches!(self.commands.last(), Some(PathCommand::Close)) {
            return false;
        }
        match (self.start(), self.end_point()) {
            (Some(s), Some(e)) => s.distance(e) <= tolerance,
            _ => false,
        }
    }

    /// Control points of every cubic, paired with their segment end points.
    pub fn control_points(&self) -> Vec<(Position, Position, Position)> {
        self.commands
            .iter()
            .filter_map(|c| match *c {
                PathCommand::CubicTo { to, cp1, cp2 } => Some((cp1, cp2, to)),
                _ => None,
            })
            .collect()
    }

    /// Polyline through the path using `segments` steps per curve or arc.
    /// The closing edge is implied and not repeated.
    pub fn flatten(&self, segments: usize) -> Vec<Position> {
        let n = segments.max(1);
        let mut out: Vec<Position> = Vec::new();
        let mut pen = Position::default();
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    out.push(p);
                    pen = p;
                }
                PathCommand::CubicTo { to, cp1, cp2 } => {
                    for i in 1..=n {
                        let t = i as f32 / n as f32;
                        out.push(cubic_point(pen, cp1, cp2, to, t));
                    }
                    pen = to;
                }
                PathCommand::Arc {
                    center,
                    radius,
                    start_angle,
                    sweep,
                } => {
                    let first = arc_point(center, radius, start_angle);
                    if pen.distance(first) > 1e-3 {
                        out.push(first);
                    }
                    for i in 1..=n {
                        let a = start_angle + sweep * i as f32 / n as f32;
                        out.push(arc_point(center, radius, a));
                    }
                    pen = arc_point(center, radius, start_angle + sweep);
                }
                PathCommand::Close => {}
            }
        }
        if out.len() > 1 {
            if let (Some(first), Some(last)) = (out.first().copied(), out.last().copied()) {
                if first.distance(last) < 1e-3 {
                    out.pop();
                }
            }
        }
        out
    }

    /// True when no two non-adjacent edges of the flattened outline properly cross.
    pub fn is_simple(&self, segments: usize) -> bool {
        let pts = self.flatten(segments);
        let n = pts.len();
        if n < 4 {
            return true;
        }
        let edge = |i: usize| (pts[i], pts[(i + 1) % n]);
        for i in 0..n {
            for j in (i + 2)..n {
                if i == 0 && j == n - 1 {
                    continue;
                }
                let (a, b) = edge(i);
                let (c, d) = edge(j);
                if segments_cross(a, b, c, d) {
                    return false;
                }
            }
        }
        true
    }

    /// Converts to a tiny-skia path; arcs are split into quarter-turn cubics.
    pub fn to_skia(&self) -> Option<tiny_skia::Path> {
        let mut pb = PathBuilder::new();
        let mut has_pen = false;
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    pb.move_to(p.x, p.y);
                    has_pen = true;
                }
                PathCommand::CubicTo { to, cp1, cp2 } => {
                    pb.cubic_to(cp1.x, cp1.y, cp2.x, cp2.y, to.x, to.y);
                }
                PathCommand::Arc {
                    center,
                    radius,
                    start_angle,
                    sweep,
                } => {
                    let first = arc_point(center, radius, start_angle);
                    if has_pen {
                        pb.line_to(first.x, first.y);
                    } else {
                        pb.move_to(first.x, first.y);
                        has_pen = true;
                    }
                    append_arc(&mut pb, center, radius, start_angle, sweep);
                }
                PathCommand::Close => pb.close(),
            }
        }
        pb.finish()
    }
}

fn arc_point(center: Position, radius: f32, angle: f32) -> Position {
    Position::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

fn cubic_point(p0: Position, p1: Position, p2: Position, p3: Position, t: f32) -> Position {
    let u = 1.0 - t;
    let b0 = u * u * u;
    let b1 = 3.0 * u * u * t;
    let b2 = 3.0 * u * t * t;
    let b3 = t * t * t;
    Position::new(
        b0 * p0.x + b1 * p1.x + b2 * p2.x + b3 * p3.x,
        b0 * p0.y + b1 * p1.y + b2 * p2.y + b3 * p3.y,
    )
}

fn append_arc(pb: &mut PathBuilder, center: Position, radius: f32, start: f32, sweep: f32) {
    let pieces = (sweep.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
    let step = sweep / pieces as f32;
    // Standard cubic approximation of a circular arc of angle `step`
    let k = 4.0 / 3.0 * (step / 4.0).tan();
    for i in 0..pieces {
        let a0 = start + step * i as f32;
        let a1 = a0 + step;
        let (s0, c0) = a0.sin_cos();
        let (s1, c1) = a1.sin_cos();
        let p0 = Position::new(center.x + radius * c0, center.y + radius * s0);
        let p3 = Position::new(center.x + radius * c1, center.y + radius * s1);
        let cp1 = Position::new(p0.x - k * radius * s0, p0.y + k * radius * c0);
        let cp2 = Position::new(p3.x + k * radius * s1, p3.y - k * radius * c1);
        pb.cubic_to(cp1.x, cp1.y, cp2.x, cp2.y, p3.x, p3.y);
    }
}

fn cross(o: Position, a: Position, b: Position) -> f32 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn segments_cross(a: Position, b: Position, c: Position, d: Position) -> bool {
    let d1 = cross(c, d, a);
    let d2 = cross(c, d, b);
    let d3 = cross(a, b, c);
    let d4 = cross(a, b, d);
    d1 * d2 < 0.0 && d3 * d4 < 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn figure_eight() -> ShapePath {
        let mut p = ShapePath::new();
        p.move_to(Position::new(0.0, 0.0));
        p.cubic_to(
            Position::new(10.0, 10.0),
            Position::new(3.0, 3.0),
            Position::new(7.0, 7.0),
        );
        p.cubic_to(
            Position::new(10.0, 0.0),
            Position::new(10.0, 3.0),
            Position::new(10.0, 7.0),
        );
        p.cubic_to(
            Position::new(0.0, 10.0),
            Position::new(7.0, 3.0),
            Position::new(3.0, 7.0),
        );
        p.cubic_to(
            Position::new(0.0, 0.0),
            Position::new(0.0, 7.0),
            Position::new(0.0, 3.0),
        );
        p.close();
        p
    }

    #[test]
    fn crossing_outline_is_not_simple() {
        let p = figure_eight();
        assert!(p.is_closed(1e-4));
        assert!(!p.is_simple(8));
    }

    #[test]
    fn half_circle_arc_ends_opposite() {
        let mut p = ShapePath::new();
        p.move_to(Position::new(10.0, 0.0));
        p.arc(Position::new(10.0, 5.0), 5.0, -PI / 2.0, PI);
        let end = p.end_point().unwrap();
        assert!((end.x - 10.0).abs() < 1e-4);
        assert!((end.y - 10.0).abs() < 1e-4);
        assert!(p.to_skia().is_some());
    }
}
