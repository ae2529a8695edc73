//! Renders an off -> on transition as a vertical strip of frames.

use squishy_toggle::{save_png, Renderer, SquishyToggle, ToggleStyle};
use tiny_skia::{Pixmap, PixmapPaint, Transform};

const FRAME_W: u32 = 320;
const FRAME_H: u32 = 160;
const FRAMES: u32 = 8;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let style = ToggleStyle::default();
    let renderer = Renderer::new();
    let mut toggle = SquishyToggle::new(false, style.clone());
    toggle.tap();

    let mut strip = Pixmap::new(FRAME_W, FRAME_H * FRAMES)
        .ok_or_else(|| anyhow::anyhow!("cannot allocate strip"))?;
    let dt = style.duration / (FRAMES - 1) as f32;
    for i in 0..FRAMES {
        if i > 0 {
            toggle.update(dt);
        }
        let frame = renderer.render(&toggle, FRAME_W, FRAME_H)?;
        strip.draw_pixmap(
            0,
            (i * FRAME_H) as i32,
            frame.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        log::info!("frame {i}: {:?}", toggle.progress());
    }
    save_png(&strip, "transition_strip.png")?;
    println!("wrote transition_strip.png");
    Ok(())
}
