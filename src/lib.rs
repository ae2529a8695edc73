//! An animated, skeuomorphic on/off toggle.
//!
//! [`SquishyToggle`] holds the boolean and three animated progress tracks.
//! [`SquishyToggle::snapshot`] turns them into geometry (the breathing pill
//! frame, the ring/bar icon, knob and label placement) and [`Renderer`]
//! composes a snapshot into a `tiny_skia::Pixmap`. With the `window` feature
//! [`app::run_app`] shows the toggle in a winit window.

pub mod anim;
pub mod effects;
pub mod error;
pub mod layout;
pub mod path;
pub mod render;
pub mod replay;
pub mod shapes {
    pub mod frame;
    pub mod icon;
}
pub mod style;
pub mod text;
pub mod toggle;
pub mod utils;

#[cfg(feature = "window")]
pub mod app;
#[cfg(feature = "window")]
pub mod surface;

pub use error::{Result, ToggleError};
pub use render::{save_png, Renderer};
pub use style::{RgbaColor, ToggleStyle};
pub use toggle::{SquishyToggle, ToggleSnapshot, TrackProgress};
#[cfg(feature = "window")]
pub use app::{run_app, WindowConfig};
