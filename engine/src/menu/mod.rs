//! Menu Builder
//!
//! Turns navigation labels into physical words: one static ground per
//! label, one glyph mesh + dynamic box body per character, and cone-twist
//! joints chaining neighbouring letters. Building waits for the typeface;
//! until then [`Menu::update`] does nothing.

pub mod layout;

use std::collections::HashMap;
use std::sync::Arc;

use glam::Vec3;

use crate::asset::PendingFont;
use crate::config::{MenuConfig, PhysicsConfig};
use crate::error::MenuError;
use crate::physics::{
    BodyDesc, BodyHandle, ConeTwistJoint, ContactMaterial, JointHandle, MaterialId, PhysicsWorld,
};
use crate::scene::{Mesh, MeshId, Scene};
use crate::text::{GlyphMesh, Typeface, extrude_glyph};

/// Surface material of every ground plane.
pub const GROUND_MATERIAL: MaterialId = 1;
/// Surface material of every letter body.
pub const LETTER_MATERIAL: MaterialId = 2;

/// One character: a scene mesh driven by a rigid body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letter {
    pub ch: char,
    pub mesh: MeshId,
    pub body: BodyHandle,
    /// Bounding-box size of the glyph.
    pub size: Vec3,
    pub mass: f32,
}

/// One label with its ground plane and joints.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub label: String,
    pub ground: BodyHandle,
    pub letters: Vec<Letter>,
    pub joints: Vec<JointHandle>,
    /// Total width of the laid-out letters.
    pub letter_offset: f32,
}

pub struct Menu {
    config: MenuConfig,
    ground_half_extents: Vec3,
    ground_friction: f32,
    letter_color: Vec3,
    pending: Option<PendingFont>,
    words: Vec<Word>,
    by_mesh: HashMap<MeshId, (usize, usize)>,
    built: bool,
}

impl Menu {
    /// Create an unbuilt menu. Call [`Menu::poll`] each frame (or
    /// [`Menu::build`] directly) once a typeface is available.
    pub fn new(config: MenuConfig, physics: &PhysicsConfig, letter_color: Vec3) -> Self {
        Self {
            config,
            ground_half_extents: physics.ground_half_extents,
            ground_friction: physics.ground_friction,
            letter_color,
            pending: None,
            words: Vec::new(),
            by_mesh: HashMap::new(),
            built: false,
        }
    }

    /// Build as soon as `font` resolves.
    pub fn with_pending_font(mut self, font: PendingFont) -> Self {
        self.set_pending_font(font);
        self
    }

    pub fn set_pending_font(&mut self, font: PendingFont) {
        self.pending = Some(font);
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Letter whose mesh is `mesh`, if any.
    pub fn letter_for_mesh(&self, mesh: MeshId) -> Option<&Letter> {
        let &(word, letter) = self.by_mesh.get(&mesh)?;
        self.words.get(word)?.letters.get(letter)
    }

    /// Check the pending font and build once it arrives.
    ///
    /// Returns `true` on the call that built the menu. A failed load is
    /// logged and leaves the menu unbuilt for good.
    pub fn poll(&mut self, world: &mut PhysicsWorld, scene: &mut Scene) -> bool {
        let Some(result) = self.pending.as_mut().and_then(PendingFont::poll) else {
            return false;
        };
        self.pending = None;

        let outcome = result.and_then(|font| self.build(&font, world, scene));
        match outcome {
            Ok(()) => self.built,
            Err(e) => {
                log::error!("Menu font failed to load: {e}");
                false
            }
        }
    }

    /// Lay out every label. Glyphs are extruded before anything is added to
    /// the world, so a bad outline leaves the world untouched.
    pub fn build(
        &mut self,
        typeface: &Typeface,
        world: &mut PhysicsWorld,
        scene: &mut Scene,
    ) -> Result<(), MenuError> {
        if self.built {
            log::warn!("Menu already built, ignoring rebuild");
            return Ok(());
        }

        let glyphs = self
            .config
            .labels
            .iter()
            .map(|label| {
                label
                    .chars()
                    .map(|ch| extrude_glyph(typeface, ch, &self.config.font))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        world.add_contact_material(ContactMaterial {
            material_a: GROUND_MATERIAL,
            material_b: LETTER_MATERIAL,
            friction: self.ground_friction,
        });

        let count = self.config.labels.len();
        for (index, (label, word_glyphs)) in self.config.labels.iter().zip(glyphs).enumerate() {
            let word = self.build_word(index, count, label, word_glyphs, world, scene);
            for (slot, letter) in word.letters.iter().enumerate() {
                self.by_mesh.insert(letter.mesh, (index, slot));
            }
            log::debug!(
                "Built word {label:?}: {} letters, {} joints, width {:.2}",
                word.letters.len(),
                word.joints.len(),
                word.letter_offset
            );
            self.words.push(word);
        }

        self.built = true;
        log::info!("Menu built with {} words", self.words.len());
        Ok(())
    }

    fn build_word(
        &self,
        index: usize,
        count: usize,
        label: &str,
        glyphs: Vec<GlyphMesh>,
        world: &mut PhysicsWorld,
        scene: &mut Scene,
    ) -> Word {
        let margin = self.config.margin;
        let ground = world.add_body(BodyDesc::fixed_box(
            Vec3::new(0.0, layout::ground_y(index, count, margin), 0.0),
            self.ground_half_extents,
            GROUND_MATERIAL,
        ));

        let mass = self.config.total_mass / glyphs.len().max(1) as f32;
        let widths: Vec<f32> = glyphs
            .iter()
            .map(|glyph| glyph.geometry.bounding_box().size().x)
            .collect();
        let (offsets, letter_offset) = layout::running_offsets(&widths);
        let y = layout::row_y(index, count, margin);

        let mut letters = Vec::with_capacity(glyphs.len());
        for (glyph, x) in glyphs.into_iter().zip(offsets) {
            let size = glyph.geometry.bounding_box().size();
            let center = glyph.geometry.bounding_sphere().center;
            let body = world.add_body(BodyDesc::dynamic_box(
                mass,
                Vec3::new(x, y, 0.0),
                size * 0.5,
                center,
                LETTER_MATERIAL,
            ));
            let mesh = scene.add(Mesh::new(Arc::new(glyph.geometry), self.letter_color));
            letters.push(Letter {
                ch: glyph.ch,
                mesh,
                body,
                size,
                mass,
            });
        }

        for letter in &letters {
            let shift = layout::recenter_shift(letter.size.x, letter_offset);
            world.translate_body(letter.body, Vec3::new(shift, 0.0, 0.0));
        }

        let joints = letters
            .windows(2)
            .map(|pair| {
                world.add_constraint(ConeTwistJoint {
                    body_a: pair[0].body,
                    body_b: pair[1].body,
                    pivot_a: Vec3::new(pair[0].size.x, 0.0, 0.0),
                    pivot_b: Vec3::ZERO,
                    cone_angle: self.config.joint.cone_angle,
                    twist_angle: self.config.joint.twist_angle,
                    collide_connected: true,
                })
            })
            .collect();

        Word {
            label: label.to_string(),
            ground,
            letters,
            joints,
            letter_offset,
        }
    }

    /// Copy every letter body's pose onto its mesh. No-op until built.
    pub fn update(&self, world: &PhysicsWorld, scene: &mut Scene) {
        if !self.built {
            return;
        }
        for letter in self.words.iter().flat_map(|word| &word.letters) {
            let (Some((position, rotation)), Some(mesh)) =
                (world.body_pose(letter.body), scene.get_mut(letter.mesh))
            else {
                continue;
            };
            mesh.position = position;
            mesh.rotation = rotation;
        }
    }
}
