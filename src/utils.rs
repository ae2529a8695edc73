use std::{
    hash::{Hash, Hasher},
    ops::Add,
    ops::Mul,
    ops::Sub,
};

/// Linear interpolation that returns `a` exactly at `t == 0` and `b` exactly at `t == 1`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn half_width(&self) -> f32 {
        self.width * 0.5
    }

    pub fn half_height(&self) -> f32 {
        self.height * 0.5
    }

    pub fn width_scaled(&self, factor: f32) -> f32 {
        self.width * factor
    }

    pub fn height_scaled(&self, factor: f32) -> f32 {
        self.height * factor
    }
}

impl Mul<f32> for Size {
    type Output = Size;

    fn mul(self, rhs: f32) -> Self::Output {
        Size {
            width: self.width * rhs,
            height: self.height * rhs,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x_offset(self, dx: f32) -> Self {
        Self::new(self.x + dx, self.y)
    }

    pub fn y_offset(self, dy: f32) -> Self {
        Self::new(self.x, self.y + dy)
    }

    /// Interpolates towards `other`; exact at both ends.
    pub fn lerp(self, other: Position, t: f32) -> Self {
        Self::new(lerp(self.x, other.x, t), lerp(self.y, other.y, t))
    }

    /// Rotates about `center`. Positive angles turn clockwise on screen (y grows downwards).
    pub fn rotated_about(self, center: Position, radians: f32) -> Self {
        if radians == 0.0 {
            return self;
        }
        let (sin, cos) = radians.sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Self::new(
            center.x + dx * cos - dy * sin,
            center.y + dx * sin + dy * cos,
        )
    }

    pub fn distance(self, other: Position) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl Default for Position {
    fn default() -> Self {
        Position { x: 0.0, y: 0.0 }
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Hash at a fixed precision so nearly equal points collide
        let precision = 100.0;
        let x = (self.x * precision).round() as i32;
        let y = (self.y * precision).round() as i32;

        x.hash(state);
        y.hash(state);
    }
}

impl Add for Position {
    type Output = Position;
    fn add(self, rhs: Position) -> Self::Output {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;
    fn sub(self, rhs: Position) -> Self::Output {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Position {
    type Output = Position;
    fn mul(self, factor: f32) -> Self::Output {
        Position {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn new_square(x: f32, y: f32, side_length: f32) -> Self {
        Self {
            x,
            y,
            width: side_length,
            height: side_length,
        }
    }

    /// Rectangle of `size` whose centre sits on `center`.
    pub fn centered_at(center: Position, size: Size) -> Self {
        Self::new(
            center.x - size.width * 0.5,
            center.y - size.height * 0.5,
            size.width,
            size.height,
        )
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= self.x
            && position.x <= self.x + self.width
            && position.y >= self.y
            && position.y <= self.y + self.height
    }

    /// Hit test against the capsule inscribed in this rectangle (semicircular short ends).
    pub fn capsule_contains(&self, position: Position) -> bool {
        if !self.contains(position) {
            return false;
        }
        let radius = self.width.min(self.height) * 0.5;
        let center = self.center();
        // Distance from the capsule's inner segment
        let half_span_x = (self.width * 0.5 - radius).max(0.0);
        let half_span_y = (self.height * 0.5 - radius).max(0.0);
        let dx = ((position.x - center.x).abs() - half_span_x).max(0.0);
        let dy = ((position.y - center.y).abs() - half_span_y).max(0.0);
        dx * dx + dy * dy <= radius * radius
    }

    pub fn pos(&self) -> Position {
        Position {
            x: self.x,
            y: self.y,
        }
    }

    pub fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    pub fn set_pos(&mut self, pos: Position) {
        self.x = pos.x;
        self.y = pos.y;
    }

    pub fn center(&self) -> Position {
        Position::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn top(&self) -> Position {
        Position::new(self.x + self.width * 0.5, self.y)
    }

    pub fn bottom(&self) -> Position {
        Position::new(self.x + self.width * 0.5, self.y + self.height)
    }

    pub fn leading(&self) -> Position {
        Position::new(self.x, self.y + self.height * 0.5)
    }

    pub fn trailing(&self) -> Position {
        Position::new(self.x + self.width, self.y + self.height * 0.5)
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    /// Shrinks by `amount` on every side.
    pub fn inset(&self, amount: f32) -> Rectangle {
        Rectangle::new(
            self.x + amount,
            self.y + amount,
            (self.width - 2.0 * amount).max(0.0),
            (self.height - 2.0 * amount).max(0.0),
        )
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Rectangle {
        Rectangle::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

impl Mul<f32> for Rectangle {
    type Output = Rectangle;
    fn mul(self, factor: f32) -> Self::Output {
        Rectangle::new(self.x, self.y, self.width * factor, self.height * factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_hits_endpoints_exactly() {
        let a = 0.1f32;
        let b = 0.7f32;
        assert_eq!(lerp(a, b, 0.0), a);
        assert_eq!(lerp(a, b, 1.0), b);
    }

    #[test]
    fn quarter_turn_is_clockwise_on_screen() {
        let c = Position::new(0.0, 0.0);
        let p = Position::new(1.0, 0.0).rotated_about(c, std::f32::consts::FRAC_PI_2);
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn capsule_rejects_corners() {
        let r = Rectangle::new(0.0, 0.0, 200.0, 100.0);
        assert!(r.capsule_contains(Position::new(100.0, 50.0)));
        assert!(r.capsule_contains(Position::new(5.0, 50.0)));
        assert!(!r.capsule_contains(Position::new(2.0, 2.0)));
        assert!(!r.capsule_contains(Position::new(199.0, 99.0)));
        assert!(!r.capsule_contains(Position::new(250.0, 50.0)));
    }
}
