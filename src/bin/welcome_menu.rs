//! Welcome Menu - the letter drop demo
//!
//! Opens a window and drops the configured menu words onto the ground.
//! Clicking a letter knocks it into the screen.
//!
//! Run with: `cargo run --bin welcome_menu`
//!
//! Set `MENU_CONFIG=path/to/overrides.json` to override settings and
//! `RUST_LOG=debug` for click and build logging.
//!
//! Controls:
//! - Left mouse: Knock the letter under the cursor
//! - ESC: Exit

use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use letter_drop_engine::input::MouseButton as MenuButton;
use letter_drop_engine::render::RenderSurface;
use letter_drop_engine::{AppConfig, MenuScene};

fn menu_button(button: MouseButton) -> MenuButton {
    match button {
        MouseButton::Left => MenuButton::Left,
        MouseButton::Middle => MenuButton::Middle,
        MouseButton::Right => MenuButton::Right,
        MouseButton::Back => MenuButton::Other(4),
        MouseButton::Forward => MenuButton::Other(5),
        MouseButton::Other(n) => MenuButton::Other(n),
    }
}

struct WelcomeMenuApp {
    config: AppConfig,
    window: Option<Arc<Window>>,
    surface: Option<RenderSurface>,
    app: Option<MenuScene>,
    last_frame: Instant,
}

impl WelcomeMenuApp {
    fn new(config: AppConfig) -> Self {
        Self {
            config,
            window: None,
            surface: None,
            app: None,
            last_frame: Instant::now(),
        }
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop, window: Arc<Window>) {
        let size = window.inner_size();
        let surface = match RenderSurface::new(window.clone(), &self.config.visual) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("{e}");
                event_loop.exit();
                return;
            }
        };

        let mut app = MenuScene::new(&self.config, size.width, size.height);
        if let Err(e) = app.start_font_load() {
            // The menu stays empty; the scene still renders.
            log::error!("{e}");
        }

        self.surface = Some(surface);
        self.app = Some(app);
        self.window = Some(window);
        self.last_frame = Instant::now();
    }
}

impl ApplicationHandler for WelcomeMenuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = WindowAttributes::default()
            .with_title("Welcome")
            .with_inner_size(PhysicalSize::new(1280, 720));
        match event_loop.create_window(attrs) {
            Ok(window) => self.initialize(event_loop, Arc::new(window)),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        let (Some(app), Some(surface)) = (self.app.as_mut(), self.surface.as_mut()) else {
            if matches!(event, WindowEvent::CloseRequested) {
                event_loop.exit();
            }
            return;
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::KeyboardInput { event, .. } => {
                if event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                    && event.state == ElementState::Pressed
                {
                    event_loop.exit();
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                app.on_pointer_move(position.x as f32, position.y as f32);
            }

            // Knock on release, so a press-and-drag off the window does nothing.
            WindowEvent::MouseInput { button, state, .. } => {
                if state == ElementState::Released && menu_button(button) == MenuButton::Left {
                    if let Some(hit) = app.on_click() {
                        log::debug!("Knocked body {:?}", hit.body);
                    }
                }
            }

            WindowEvent::Resized(new_size) => {
                surface.resize(app.camera_mut(), new_size.width, new_size.height);
                app.resize(new_size.width, new_size.height);
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let delta_time = now.duration_since(self.last_frame).as_secs_f32();
                self.last_frame = now;

                app.update(delta_time);
                surface.render(app.scene(), app.camera());
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() {
    env_logger::init();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        log::error!("{e}; using default configuration");
        AppConfig::default()
    });

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {e}");
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = WelcomeMenuApp::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop exited with error: {e}");
        std::process::exit(1);
    }
}
