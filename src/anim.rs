use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    EaseIn,
    EaseOut,
    /// Standard ease-in-out, cubic-bezier(0.42, 0, 0.58, 1).
    EaseInOut,
    /// CSS-like cubic-bezier; maps input progress t in [0,1] to output y by solving x(t)=progress.
    CubicBezier {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
}

impl Default for Ease {
    fn default() -> Self {
        Ease::Linear
    }
}

pub fn ease_value(e: Ease, t: f32) -> f32 {
    let x = t.clamp(0.0, 1.0);
    match e {
        Ease::Linear => x,
        Ease::EaseIn => x * x,
        Ease::EaseOut => 1.0 - (1.0 - x) * (1.0 - x),
        Ease::EaseInOut => cubic_bezier_solve(0.42, 0.0, 0.58, 1.0, x),
        Ease::CubicBezier { x1, y1, x2, y2 } => cubic_bezier_solve(x1, y1, x2, y2, x),
    }
}

// Solve y given progress p in [0,1] for a cubic-bezier defined by (0,0),(x1,y1),(x2,y2),(1,1)
// using Newton-Raphson on x(t)=p then evaluate y(t).
fn cubic_bezier_solve(x1: f32, y1: f32, x2: f32, y2: f32, p: f32) -> f32 {
    if p <= 0.0 {
        return 0.0;
    }
    if p >= 1.0 {
        return 1.0;
    }
    let x1 = x1.clamp(0.0, 1.0);
    let x2 = x2.clamp(0.0, 1.0);
    let mut t = p;
    for _ in 0..8 {
        let (x_t, dx_dt) = bezier_x_and_derivative(t, x1, x2);
        let err = x_t - p;
        if err.abs() < 1e-5 {
            break;
        }
        if dx_dt.abs() > 1e-6 {
            t -= err / dx_dt;
        }
        t = t.clamp(0.0, 1.0);
    }
    bezier_y(t, y1, y2)
}

#[inline]
fn bezier_x_and_derivative(t: f32, x1: f32, x2: f32) -> (f32, f32) {
    // x(t) = 3(1-t)^2 t x1 + 3(1-t) t^2 x2 + t^3
    let u = 1.0 - t;
    let tt = t * t;
    let uu = u * u;
    let x = 3.0 * uu * t * x1 + 3.0 * u * tt * x2 + tt * t;
    // dx/dt = 3( (1-t)^2 x1 + 2(1-t)t(x2 - x1) + t^2(1 - x2) )
    let dx = 3.0 * (uu * x1 + 2.0 * u * t * (x2 - x1) + tt * (1.0 - x2));
    (x, dx)
}

#[inline]
fn bezier_y(t: f32, y1: f32, y2: f32) -> f32 {
    let u = 1.0 - t;
    let b1 = 3.0 * u * u * t;
    let b2 = 3.0 * u * t * t;
    let b3 = t * t * t;
    b1 * y1 + b2 * y2 + b3 // P0.y=0,P3.y=1
}

#[derive(Debug, Clone)]
pub struct Tween<T> {
    pub start: T,
    pub end: T,
    pub duration: f32,
    pub elapsed: f32,
    pub ease: Ease,
}

impl<
        T: Copy
            + core::ops::Add<Output = T>
            + core::ops::Sub<Output = T>
            + core::ops::Mul<f32, Output = T>,
    > Tween<T>
{
    pub fn new(start: T, end: T, duration: f32, ease: Ease) -> Self {
        Self {
            start,
            end,
            duration,
            elapsed: 0.0,
            ease,
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Value at the current elapsed time. A finished tween yields `end` exactly.
    pub fn sample(&self) -> T {
        if self.duration <= 0.0 || self.is_finished() {
            return self.end;
        }
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        let w = ease_value(self.ease, t);
        self.start + (self.end - self.start) * w
    }

    pub fn step(&mut self, dt: f32) -> T {
        self.elapsed += dt.max(0.0);
        self.sample()
    }
}

/// A scalar that animates towards a target.
///
/// Setting a new target while a tween is in flight starts the next tween from the
/// currently sampled value, so the visible value never jumps.
#[derive(Debug, Clone)]
pub struct Animated {
    tween: Tween<f32>,
}

impl Animated {
    pub fn new(value: f32) -> Self {
        Self {
            tween: Tween::new(value, value, 0.0, Ease::Linear),
        }
    }

    pub fn value(&self) -> f32 {
        self.tween.sample()
    }

    pub fn target(&self) -> f32 {
        self.tween.end
    }

    pub fn is_animating(&self) -> bool {
        !self.tween.is_finished()
    }

    pub fn set_target(&mut self, target: f32, duration: f32, ease: Ease) {
        let current = self.value();
        log::trace!("retarget {current:.3} -> {target:.3} over {duration}s ({ease:?})");
        self.tween = Tween::new(current, target, duration, ease);
    }

    /// Jumps to `value` without animating.
    pub fn snap_to(&mut self, value: f32) {
        self.tween = Tween::new(value, value, 0.0, Ease::Linear);
    }

    pub fn step(&mut self, dt: f32) -> f32 {
        self.tween.step(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_in_out_is_symmetric() {
        let a = ease_value(Ease::EaseInOut, 0.25);
        let b = ease_value(Ease::EaseInOut, 0.75);
        assert!((a + b - 1.0).abs() < 1e-3);
        assert!((ease_value(Ease::EaseInOut, 0.5) - 0.5).abs() < 1e-3);
    }

    #[test]
    fn animated_settles_on_target() {
        let mut v = Animated::new(0.0);
        v.set_target(1.0, 0.6, Ease::EaseInOut);
        for _ in 0..36 {
            v.step(1.0 / 60.0);
        }
        // 36 frames of 1/60 can land a hair short of 0.6 in f32
        v.step(1e-3);
        assert_eq!(v.value(), 1.0);
        assert!(!v.is_animating());
    }
}
