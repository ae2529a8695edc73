use crate::error::{Result, ToggleError};
use crate::render::Renderer;
use crate::style::ToggleStyle;
use crate::surface::PixmapPresenter;
use crate::toggle::SquishyToggle;
use crate::utils::{Position, Rectangle};
use std::sync::Arc;
use tiny_skia::Pixmap;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Squishy Toggle".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// Window that shows one toggle. Left click inside the capsule or Space taps it,
/// D switches the debug overlay.
pub struct ToggleApp {
    config: WindowConfig,
    toggle: SquishyToggle,
    renderer: Renderer,
    presenter: Option<PixmapPresenter>,
    window: Option<Arc<Window>>,
    last_frame: std::time::Instant,
    cursor: Option<Position>,
    cached: Option<Pixmap>,
    error: Option<ToggleError>,
}

impl ToggleApp {
    pub fn new(config: WindowConfig, style: ToggleStyle) -> Self {
        Self {
            config,
            toggle: SquishyToggle::new(true, style),
            renderer: Renderer::new(),
            presenter: None,
            window: None,
            last_frame: std::time::Instant::now(),
            cursor: None,
            cached: None,
            error: None,
        }
    }

    pub fn toggle(&self) -> &SquishyToggle {
        &self.toggle
    }

    fn container(&self) -> Rectangle {
        let (w, h) = self
            .presenter
            .as_ref()
            .map(|p| p.size())
            .unwrap_or((self.config.width, self.config.height));
        Rectangle::new(0.0, 0.0, w as f32, h as f32)
    }

    fn invalidate(&mut self) {
        self.cached = None;
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    /// Taps the toggle. The frame clock restarts when the loop was idle so the
    /// first animated frame does not swallow the idle time.
    fn tap(&mut self) {
        if !self.toggle.is_animating() {
            self.last_frame = std::time::Instant::now();
        }
        self.toggle.tap();
        self.invalidate();
    }

    fn needs_redraw(&self) -> bool {
        self.toggle.is_animating() || self.cached.is_none()
    }

    fn redraw(&mut self) -> Result<()> {
        let now = std::time::Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        if self.toggle.is_animating() {
            self.toggle.update(dt);
            self.cached = None;
        }

        let container = self.container();
        if self.cached.is_none() {
            let pixmap = self.renderer.render(
                &self.toggle,
                container.width as u32,
                container.height as u32,
            )?;
            self.cached = Some(pixmap);
        }
        if let (Some(presenter), Some(pixmap)) = (self.presenter.as_mut(), self.cached.as_ref()) {
            presenter.present(pixmap)?;
        }
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: ToggleError) {
        log::error!("{err}");
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler<()> for ToggleApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let window_attributes = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, ToggleError::Window(e.to_string())),
        };
        match PixmapPresenter::new(window.clone()) {
            Ok(presenter) => self.presenter = Some(presenter),
            Err(e) => return self.fail(event_loop, e),
        }
        window.request_redraw();
        self.window = Some(window);
        self.last_frame = std::time::Instant::now();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if !event.state.is_pressed() || event.repeat {
                    return;
                }
                match event.logical_key {
                    Key::Named(NamedKey::Space) => self.tap(),
                    Key::Character(ref c) if c.as_str().eq_ignore_ascii_case("d") => {
                        let style = self.toggle.style_mut();
                        style.debug = !style.debug;
                        log::info!("debug overlay {}", if style.debug { "on" } else { "off" });
                        self.invalidate();
                    }
                    _ => (),
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some(Position::new(position.x as f32, position.y as f32));
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(cursor) = self.cursor {
                    if self.toggle.hit_test(self.container(), cursor) {
                        self.tap();
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    return self.fail(event_loop, e);
                }
                if self.needs_redraw() {
                    if let Some(window) = &self.window {
                        window.request_redraw();
                    }
                }
            }
            WindowEvent::Resized(new_size) => {
                if let Some(presenter) = &mut self.presenter {
                    presenter.resize(new_size.width, new_size.height);
                }
                self.invalidate();
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            _ => (),
        }
    }
}

pub fn run_app(config: WindowConfig, style: ToggleStyle) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|e| ToggleError::Window(e.to_string()))?;
    let mut app = ToggleApp::new(config, style);

    event_loop
        .run_app(&mut app)
        .map_err(|e| ToggleError::Window(e.to_string()))?;
    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_loop_stops_redrawing() {
        let config = WindowConfig {
            width: 80,
            height: 40,
            ..WindowConfig::default()
        };
        let mut app = ToggleApp::new(config, ToggleStyle::default());
        assert!(app.needs_redraw());

        app.redraw().unwrap();
        assert!(app.cached.is_some());
        assert!(!app.needs_redraw());

        app.tap();
        assert!(app.needs_redraw());
        app.redraw().unwrap();
        assert!(app.toggle().is_animating());
        assert!(app.needs_redraw());

        // first frame after an idle tap starts near the beginning
        assert!(app.toggle().progress().frame > 0.9);

        app.last_frame -= std::time::Duration::from_secs(1);
        app.redraw().unwrap();
        assert!(app.cached.is_some());
        assert!(!app.needs_redraw());
        assert_eq!(app.toggle().progress().frame, 0.0);
    }
}
