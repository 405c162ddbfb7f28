//! Physics World
//!
//! Owns every rapier set and pipeline object and exposes the handful of
//! operations the menu needs: add bodies, add joints, register contact
//! materials, step, read poses back, and hit bodies with impulses.

use rapier3d::prelude::*;

use super::types::{
    BodyHandle, JointHandle, Quat, Vec3, from_rotation, from_vector, to_point, to_vector,
};

/// Identifier of a surface material, stored in each collider's user data.
pub type MaterialId = u32;

/// Friction applied to contacts with no registered material pair.
pub const DEFAULT_FRICTION: f32 = 0.3;

/// Smallest half extent a box collider is allowed to have.
pub const MIN_HALF_EXTENT: f32 = 0.01;

/// Description of a single-box rigid body.
///
/// A `mass` of zero makes the body static.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    pub mass: f32,
    pub position: Vec3,
    pub half_extents: Vec3,
    /// Offset of the box centre from the body origin (body frame).
    pub shape_offset: Vec3,
    pub material: MaterialId,
}

impl BodyDesc {
    /// A static box centred on its body origin.
    pub fn fixed_box(position: Vec3, half_extents: Vec3, material: MaterialId) -> Self {
        Self {
            mass: 0.0,
            position,
            half_extents,
            shape_offset: Vec3::ZERO,
            material,
        }
    }

    /// A dynamic box whose collider is shifted by `shape_offset`.
    pub fn dynamic_box(
        mass: f32,
        position: Vec3,
        half_extents: Vec3,
        shape_offset: Vec3,
        material: MaterialId,
    ) -> Self {
        Self {
            mass,
            position,
            half_extents,
            shape_offset,
            material,
        }
    }

    pub fn is_static(&self) -> bool {
        self.mass <= 0.0
    }
}

/// Ball-and-socket joint with a swing cone and twist limit.
///
/// Pivots are expressed in each body's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeTwistJoint {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    pub pivot_a: Vec3,
    pub pivot_b: Vec3,
    pub cone_angle: f32,
    pub twist_angle: f32,
    /// Keep contacts between the two linked bodies.
    pub collide_connected: bool,
}

/// Friction override for contacts between two materials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactMaterial {
    pub material_a: MaterialId,
    pub material_b: MaterialId,
    pub friction: f32,
}

impl ContactMaterial {
    fn matches(&self, a: MaterialId, b: MaterialId) -> bool {
        (self.material_a == a && self.material_b == b)
            || (self.material_a == b && self.material_b == a)
    }
}

/// Physics hook applying registered contact materials to solver contacts.
#[derive(Debug, Default)]
struct ContactMaterialTable {
    pairs: Vec<ContactMaterial>,
}

impl ContactMaterialTable {
    fn friction_for(&self, a: MaterialId, b: MaterialId) -> Option<f32> {
        // Later registrations win, like overwriting a map entry.
        self.pairs
            .iter()
            .rev()
            .find(|pair| pair.matches(a, b))
            .map(|pair| pair.friction)
    }
}

impl PhysicsHooks for ContactMaterialTable {
    fn modify_solver_contacts(&self, context: &mut ContactModificationContext) {
        let a = context.colliders[context.collider1].user_data as MaterialId;
        let b = context.colliders[context.collider2].user_data as MaterialId;
        if let Some(friction) = self.friction_for(a, b) {
            for contact in context.solver_contacts.iter_mut() {
                contact.friction = friction;
            }
        }
    }
}

/// Gravity-enabled rigid-body simulation.
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    materials: ContactMaterialTable,
    steps: u64,
}

impl PhysicsWorld {
    /// Create an empty world with the given gravity.
    pub fn new(gravity: Vec3) -> Self {
        Self {
            gravity: to_vector(gravity),
            integration_parameters: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            materials: ContactMaterialTable::default(),
            steps: 0,
        }
    }

    /// Insert a box body and return its handle.
    pub fn add_body(&mut self, desc: BodyDesc) -> BodyHandle {
        let builder = if desc.is_static() {
            RigidBodyBuilder::fixed()
        } else {
            RigidBodyBuilder::dynamic()
        };
        let handle = self
            .bodies
            .insert(builder.translation(to_vector(desc.position)).build());

        let half = desc.half_extents.max(Vec3::splat(MIN_HALF_EXTENT));
        let mut collider = ColliderBuilder::cuboid(half.x, half.y, half.z)
            .translation(to_vector(desc.shape_offset))
            .friction(DEFAULT_FRICTION)
            .restitution(0.0)
            .user_data(desc.material as u128)
            .active_hooks(ActiveHooks::MODIFY_SOLVER_CONTACTS);
        if !desc.is_static() {
            collider = collider.mass(desc.mass);
        }
        self.colliders
            .insert_with_parent(collider.build(), handle, &mut self.bodies);

        handle
    }

    /// Link two bodies with a cone-twist joint.
    pub fn add_constraint(&mut self, joint: ConeTwistJoint) -> JointHandle {
        let data = SphericalJointBuilder::new()
            .local_anchor1(to_point(joint.pivot_a))
            .local_anchor2(to_point(joint.pivot_b))
            .limits(JointAxis::AngX, [-joint.twist_angle, joint.twist_angle])
            .limits(JointAxis::AngY, [-joint.cone_angle, joint.cone_angle])
            .limits(JointAxis::AngZ, [-joint.cone_angle, joint.cone_angle])
            .contacts_enabled(joint.collide_connected)
            .build();
        self.impulse_joints
            .insert(joint.body_a, joint.body_b, data, true)
    }

    /// Register a friction override for a material pair.
    pub fn add_contact_material(&mut self, material: ContactMaterial) {
        self.materials.pairs.push(material);
    }

    /// Friction the solver will use between two materials.
    pub fn contact_friction(&self, a: MaterialId, b: MaterialId) -> f32 {
        self.materials.friction_for(a, b).unwrap_or(DEFAULT_FRICTION)
    }

    /// Advance the simulation by exactly one interval of `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &self.materials,
            &(),
        );
        self.steps += 1;
    }

    /// Number of completed steps.
    pub fn step_count(&self) -> u64 {
        self.steps
    }

    /// World-space position and orientation of a body origin.
    pub fn body_pose(&self, handle: BodyHandle) -> Option<(Vec3, Quat)> {
        let body = self.bodies.get(handle)?;
        Some((from_vector(body.translation()), from_rotation(body.rotation())))
    }

    pub fn linear_velocity(&self, handle: BodyHandle) -> Option<Vec3> {
        self.bodies.get(handle).map(|body| from_vector(body.linvel()))
    }

    pub fn is_static(&self, handle: BodyHandle) -> bool {
        self.bodies
            .get(handle)
            .is_some_and(|body| body.body_type() == RigidBodyType::Fixed)
    }

    /// Apply an impulse given in the body's local frame at a local point.
    ///
    /// Returns `false` if the handle is unknown.
    pub fn apply_local_impulse(
        &mut self,
        handle: BodyHandle,
        local_impulse: Vec3,
        local_point: Vec3,
    ) -> bool {
        let Some(body) = self.bodies.get_mut(handle) else {
            return false;
        };
        let impulse = body.rotation().transform_vector(&to_vector(local_impulse));
        let point = body.position().transform_point(&to_point(local_point));
        body.apply_impulse_at_point(impulse, point, true);
        true
    }

    /// Move a body origin (used when recentering a freshly laid-out word).
    pub fn translate_body(&mut self, handle: BodyHandle, offset: Vec3) {
        if let Some(body) = self.bodies.get_mut(handle) {
            let moved = body.translation() + to_vector(offset);
            body.set_translation(moved, true);
        }
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn joint_count(&self) -> usize {
        self.impulse_joints.len()
    }

    /// Bodies linked by a joint, in insertion order.
    pub fn joint_bodies(&self, handle: JointHandle) -> Option<(BodyHandle, BodyHandle)> {
        self.impulse_joints
            .get(handle)
            .map(|joint| (joint.body1, joint.body2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn world() -> PhysicsWorld {
        PhysicsWorld::new(Vec3::new(0.0, -20.0, 0.0))
    }

    fn unit_box(mass: f32, position: Vec3) -> BodyDesc {
        BodyDesc::dynamic_box(mass, position, Vec3::splat(0.5), Vec3::ZERO, 1)
    }

    #[test]
    fn test_dynamic_body_falls() {
        let mut world = world();
        let body = world.add_body(unit_box(1.0, Vec3::new(0.0, 10.0, 0.0)));
        for _ in 0..10 {
            world.step(DT);
        }
        let (pos, _) = world.body_pose(body).unwrap();
        assert!(pos.y < 10.0, "body should fall, y = {}", pos.y);
        assert_eq!(world.step_count(), 10);
    }

    #[test]
    fn test_static_body_never_moves() {
        let mut world = world();
        let ground = world.add_body(BodyDesc::fixed_box(
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(50.0, 0.2, 50.0),
            2,
        ));
        assert!(world.is_static(ground));
        for _ in 0..30 {
            world.step(DT);
        }
        assert_eq!(world.body_pose(ground).unwrap().0, Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_box_comes_to_rest_on_ground() {
        let mut world = world();
        world.add_body(BodyDesc::fixed_box(
            Vec3::ZERO,
            Vec3::new(50.0, 0.2, 50.0),
            2,
        ));
        let body = world.add_body(unit_box(1.0, Vec3::new(0.0, 3.0, 0.0)));
        for _ in 0..240 {
            world.step(DT);
        }
        let (pos, _) = world.body_pose(body).unwrap();
        // Resting on top of the 0.2 half-height slab with a 0.5 half-height box.
        assert!((pos.y - 0.7).abs() < 0.1, "y = {}", pos.y);
    }

    #[test]
    fn test_contact_material_lookup_is_symmetric() {
        let mut world = world();
        world.add_contact_material(ContactMaterial {
            material_a: 1,
            material_b: 2,
            friction: 0.01,
        });
        assert_eq!(world.contact_friction(1, 2), 0.01);
        assert_eq!(world.contact_friction(2, 1), 0.01);
        assert_eq!(world.contact_friction(1, 1), DEFAULT_FRICTION);
    }

    /// Kick a box resting on a ground slab and report how far it slid.
    fn slide_distance(ground_friction: Option<f32>) -> f32 {
        let mut world = world();
        world.add_body(BodyDesc::fixed_box(
            Vec3::ZERO,
            Vec3::new(50.0, 0.2, 50.0),
            2,
        ));
        if let Some(friction) = ground_friction {
            world.add_contact_material(ContactMaterial {
                material_a: 1,
                material_b: 2,
                friction,
            });
        }
        let body = world.add_body(unit_box(1.0, Vec3::new(0.0, 0.7, 0.0)));
        for _ in 0..30 {
            world.step(DT);
        }
        assert!(world.apply_local_impulse(body, Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO));
        for _ in 0..120 {
            world.step(DT);
        }
        world.body_pose(body).unwrap().0.x
    }

    #[test]
    fn test_slippery_contact_material_slides_further() {
        let slippery = slide_distance(Some(0.01));
        let default = slide_distance(None);
        assert!(
            slippery > default + 1.0,
            "slippery slid {slippery}, default slid {default}"
        );
    }

    #[test]
    fn test_local_impulse_changes_velocity() {
        let mut world = PhysicsWorld::new(Vec3::ZERO);
        let body = world.add_body(unit_box(1.0, Vec3::ZERO));
        // Mass properties are settled by the first step.
        world.step(DT);
        assert!(world.apply_local_impulse(body, Vec3::new(0.0, 0.0, -25.0), Vec3::ZERO));
        let vel = world.linear_velocity(body).unwrap();
        assert!(vel.z < 0.0, "vel = {vel:?}");
        world.step(DT);
        assert!(world.body_pose(body).unwrap().0.z < 0.0);
    }

    #[test]
    fn test_joint_links_two_bodies() {
        let mut world = world();
        let a = world.add_body(unit_box(0.5, Vec3::ZERO));
        let b = world.add_body(unit_box(0.5, Vec3::new(1.0, 0.0, 0.0)));
        let joint = world.add_constraint(ConeTwistJoint {
            body_a: a,
            body_b: b,
            pivot_a: Vec3::new(1.0, 0.0, 0.0),
            pivot_b: Vec3::ZERO,
            cone_angle: 0.4,
            twist_angle: 0.2,
            collide_connected: true,
        });
        assert_eq!(world.joint_count(), 1);
        assert_eq!(world.joint_bodies(joint), Some((a, b)));
    }

    #[test]
    fn test_degenerate_box_is_clamped() {
        let mut world = world();
        let body = world.add_body(BodyDesc::dynamic_box(
            1.0,
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::ZERO,
            1,
        ));
        world.step(DT);
        let (pos, _) = world.body_pose(body).unwrap();
        assert!(pos.is_finite());
    }

    #[test]
    fn test_translate_body() {
        let mut world = world();
        let body = world.add_body(unit_box(1.0, Vec3::new(2.0, 0.0, 0.0)));
        world.translate_body(body, Vec3::new(-3.0, 0.0, 0.0));
        assert_eq!(world.body_pose(body).unwrap().0, Vec3::new(-1.0, 0.0, 0.0));
    }
}
