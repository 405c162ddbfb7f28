//! MenuScene - composition of the whole menu.
//!
//! Owns the physics world, the scene graph, the camera, the menu and the
//! input handler. [`update`](MenuScene::update) is the single per-frame
//! entry point. **No wgpu imports** - the binary renders `scene()` through
//! `camera()` after each update.

use crate::asset::{FontLoader, PendingFont};
use crate::camera::OrthographicCamera;
use crate::config::AppConfig;
use crate::error::MenuError;
use crate::input::{ClickHit, InputHandler};
use crate::menu::Menu;
use crate::physics::PhysicsWorld;
use crate::render::hex_to_linear;
use crate::scene::Scene;

/// Longest frame delta fed to the simulation.
const MAX_FRAME_DELTA_S: f32 = 0.1;

pub struct MenuScene {
    world: PhysicsWorld,
    scene: Scene,
    camera: OrthographicCamera,
    menu: Menu,
    input: InputHandler,
    viewport: (u32, u32),
    timestep: f32,
    max_substeps: u32,
    accumulator_s: f32,
}

impl MenuScene {
    /// Set up the world, camera and an unbuilt menu for a viewport.
    pub fn new(config: &AppConfig, width: u32, height: u32) -> Self {
        let menu = Menu::new(
            config.menu.clone(),
            &config.physics,
            hex_to_linear(config.visual.letter_color),
        );
        Self {
            world: PhysicsWorld::new(config.physics.gravity),
            scene: Scene::new(),
            camera: OrthographicCamera::from_config(&config.visual.camera, width, height),
            menu,
            input: InputHandler::new(config.menu.force),
            viewport: (width.max(1), height.max(1)),
            timestep: config.physics.timestep,
            max_substeps: config.physics.max_substeps.max(1),
            accumulator_s: 0.0,
        }
    }

    /// Start loading the configured typeface in the background.
    pub fn start_font_load(&mut self) -> Result<(), MenuError> {
        let path = self.menu.config().font_path.clone();
        log::info!("Loading typeface {path}");
        self.menu.set_pending_font(FontLoader::spawn(path)?);
        Ok(())
    }

    /// Build from an already-loading (or loaded) font.
    pub fn with_pending_font(mut self, font: PendingFont) -> Self {
        self.menu.set_pending_font(font);
        self
    }

    /// Per-frame update with wall-clock `delta` seconds.
    ///
    /// Syncs meshes to bodies, then advances physics in fixed steps.
    /// Returns the number of steps taken.
    pub fn update(&mut self, delta: f32) -> u32 {
        self.menu.poll(&mut self.world, &mut self.scene);
        self.menu.update(&self.world, &mut self.scene);

        let delta = delta.clamp(0.0, MAX_FRAME_DELTA_S);
        self.accumulator_s = (self.accumulator_s + delta)
            .min(self.timestep * self.max_substeps as f32);

        let mut steps = 0;
        while self.accumulator_s >= self.timestep && steps < self.max_substeps {
            self.world.step(self.timestep);
            self.accumulator_s -= self.timestep;
            steps += 1;
        }
        steps
    }

    /// One sync and exactly one physics step, whatever the frame time.
    pub fn step_frame(&mut self) {
        self.menu.poll(&mut self.world, &mut self.scene);
        self.menu.update(&self.world, &mut self.scene);
        self.world.step(self.timestep);
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        let (width, height) = self.viewport;
        self.input.on_pointer_move(x, y, width, height);
    }

    pub fn on_click(&mut self) -> Option<ClickHit> {
        self.input
            .on_click(&self.camera, &self.scene, &self.menu, &mut self.world)
    }

    /// Track a new viewport size; zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = (width, height);
        self.camera.set_viewport(width, height);
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &OrthographicCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrthographicCamera {
        &mut self.camera
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }
}
