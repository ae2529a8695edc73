use crate::error::{Result, ToggleError};
use crate::toggle::{SquishyToggle, TrackProgress};
use crate::utils::Rectangle;
use serde::{Deserialize, Serialize};

/// Scripted taps for driving a toggle without input devices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TapScript {
    /// Seconds from the start at which a tap lands.
    pub taps: Vec<f32>,
    /// Seconds to simulate.
    pub length: f32,
    /// Frames per simulated second.
    #[serde(default = "default_fps")]
    pub fps: f32,
}

fn default_fps() -> f32 {
    60.0
}

/// Longest script `run` accepts, in seconds.
pub const MAX_SCRIPT_LENGTH: f32 = 600.0;
/// Highest simulation rate `run` accepts.
pub const MAX_SCRIPT_FPS: f32 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplayFrame {
    pub time: f32,
    pub is_on: bool,
    pub progress: TrackProgress,
    /// Knob centre x inside the container the script ran against.
    pub knob_x: f32,
}

impl TapScript {
    pub fn new(taps: Vec<f32>, length: f32) -> Self {
        Self {
            taps,
            length,
            fps: default_fps(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        let script: Self = serde_json::from_str(s)?;
        script.validate()?;
        Ok(script)
    }

    /// Rejects lengths, rates and tap times that are not finite or out of range.
    pub fn validate(&self) -> Result<()> {
        if !self.length.is_finite() || !(0.0..=MAX_SCRIPT_LENGTH).contains(&self.length) {
            return Err(ToggleError::InvalidScript(format!(
                "length {} must be within 0..={MAX_SCRIPT_LENGTH} seconds",
                self.length
            )));
        }
        if !self.fps.is_finite() || !(1.0..=MAX_SCRIPT_FPS).contains(&self.fps) {
            return Err(ToggleError::InvalidScript(format!(
                "fps {} must be within 1..={MAX_SCRIPT_FPS}",
                self.fps
            )));
        }
        if let Some(t) = self.taps.iter().find(|t| !t.is_finite()) {
            return Err(ToggleError::InvalidScript(format!("tap time {t} is not finite")));
        }
        Ok(())
    }

    /// Steps `toggle` frame by frame, tapping whenever a scripted time is crossed.
    /// The first frame is sampled at time zero, after any taps scheduled there.
    pub fn run(
        &self,
        toggle: &mut SquishyToggle,
        container: Rectangle,
    ) -> Result<Vec<ReplayFrame>> {
        self.validate()?;
        let dt = 1.0 / self.fps;
        let mut taps = self.taps.clone();
        taps.sort_by(|a, b| a.total_cmp(b));
        let mut pending = taps.into_iter().peekable();

        // bounded by MAX_SCRIPT_LENGTH * MAX_SCRIPT_FPS
        let frames = (self.length * self.fps).ceil() as usize;
        let mut out = Vec::with_capacity(frames.saturating_add(1));
        let mut time = 0.0f32;
        for i in 0..=frames {
            if i > 0 {
                toggle.update(dt);
                time += dt;
            }
            while pending.next_if(|&t| t <= time + dt * 0.5).is_some() {
                toggle.tap();
            }
            let snap = toggle.snapshot(container);
            out.push(ReplayFrame {
                time,
                is_on: toggle.is_on(),
                progress: snap.progress,
                knob_x: snap.knob.center.x,
            });
        }
        log::debug!("replayed {} frames, {} taps", out.len(), self.taps.len());
        Ok(out)
    }
}
