//! Click handling: pick a letter under the pointer and knock it.

use glam::Vec3;

use super::mouse::PointerState;
use crate::camera::OrthographicCamera;
use crate::menu::Menu;
use crate::physics::{BodyHandle, PhysicsWorld};
use crate::scene::{MeshId, Scene};

/// A click that landed on a letter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickHit {
    pub mesh: MeshId,
    pub body: BodyHandle,
    /// Struck face normal in the letter's local frame.
    pub normal: Vec3,
    /// Impulse applied, in the letter's local frame.
    pub impulse: Vec3,
    /// World-space hit point.
    pub point: Vec3,
}

#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    pub pointer: PointerState,
    /// Impulse magnitude applied to a clicked letter.
    pub force: f32,
}

impl InputHandler {
    pub fn new(force: f32) -> Self {
        Self {
            pointer: PointerState::new(),
            force,
        }
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32, width: u32, height: u32) {
        self.pointer.on_pointer_move(x, y, width, height);
    }

    /// Cast a ray through the pointer and push the first letter it hits
    /// into the screen, away from the struck face.
    pub fn on_click(
        &self,
        camera: &OrthographicCamera,
        scene: &Scene,
        menu: &Menu,
        world: &mut PhysicsWorld,
    ) -> Option<ClickHit> {
        let ray = camera.ray_from_ndc(self.pointer.ndc);
        let hit = scene.intersect(&ray)?;
        let letter = menu.letter_for_mesh(hit.mesh)?;

        let impulse = -hit.local_normal * self.force;
        if !world.apply_local_impulse(letter.body, impulse, Vec3::ZERO) {
            return None;
        }
        log::debug!(
            "Clicked {:?} at {:?}, impulse {impulse:?}",
            letter.ch,
            hit.point
        );

        Some(ClickHit {
            mesh: hit.mesh,
            body: letter.body,
            normal: hit.local_normal,
            impulse,
            point: hit.point,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glam::Vec2;

    use super::*;
    use crate::config::{CameraConfig, MenuConfig, PhysicsConfig};
    use crate::scene::Mesh;
    use crate::text::{Typeface, extrude_contours, straight_walls};

    const FONT: &str = r#"{
        "glyphs": {
            "A": { "ha": 500, "o": "m 0 0 l 500 0 l 500 1000 l 0 1000 z " },
            "?": { "ha": 500, "o": "m 0 0 l 500 0 l 500 500 z " }
        },
        "resolution": 1000
    }"#;

    struct Fixture {
        camera: OrthographicCamera,
        scene: Scene,
        menu: Menu,
        world: PhysicsWorld,
        handler: InputHandler,
    }

    /// One letter "A" with the pointer aimed at the middle of its mesh.
    fn fixture() -> Fixture {
        let config = MenuConfig {
            labels: vec!["A".into()],
            ..Default::default()
        };
        let mut menu = Menu::new(config, &PhysicsConfig::default(), Vec3::ONE);
        let mut world = PhysicsWorld::new(PhysicsConfig::default().gravity);
        let mut scene = Scene::new();
        let font = Typeface::from_json(FONT).unwrap();
        menu.build(&font, &mut world, &mut scene).unwrap();
        menu.update(&world, &mut scene);

        let camera = OrthographicCamera::from_config(&CameraConfig::default(), 800, 600);
        let mut handler = InputHandler::new(25.0);
        handler.pointer.ndc = camera.project(letter_centre(&menu, &scene));

        Fixture {
            camera,
            scene,
            menu,
            world,
            handler,
        }
    }

    fn letter_centre(menu: &Menu, scene: &Scene) -> Vec3 {
        let letter = menu.words()[0].letters[0];
        let mesh = scene.get(letter.mesh).unwrap();
        mesh.model_matrix()
            .transform_point3(mesh.geometry.bounding_box().center())
    }

    /// A 10 x 10 slab that is not part of the menu.
    fn slab() -> Mesh {
        let square = vec![
            Vec2::new(-5.0, -5.0),
            Vec2::new(5.0, -5.0),
            Vec2::new(5.0, 5.0),
            Vec2::new(-5.0, 5.0),
        ];
        let geometry = extrude_contours('#', &[square], &straight_walls(-0.5, 0.5)).unwrap();
        Mesh::new(Arc::new(geometry), Vec3::ONE)
    }

    #[test]
    fn test_click_on_letter_hits_it() {
        let mut f = fixture();
        let letter = f.menu.words()[0].letters[0];
        let hit = f
            .handler
            .on_click(&f.camera, &f.scene, &f.menu, &mut f.world)
            .unwrap();
        assert_eq!(hit.body, letter.body);
    }

    #[test]
    fn test_mesh_in_front_of_letter_blocks_click() {
        let mut f = fixture();
        let letter = f.menu.words()[0].letters[0];

        let mut blocker = slab();
        blocker.position = letter_centre(&f.menu, &f.scene) - f.camera.basis().forward * 3.0;
        f.scene.add(blocker);

        let before = f.world.linear_velocity(letter.body).unwrap();
        let hit = f
            .handler
            .on_click(&f.camera, &f.scene, &f.menu, &mut f.world);
        assert!(hit.is_none());
        assert_eq!(f.world.linear_velocity(letter.body).unwrap(), before);
    }
}
