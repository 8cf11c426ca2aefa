//! Rigid-body physics session
//!
//! Wraps a rapier2d simulation. The world is top-down, so gravity is zero,
//! and every `step` advances exactly one fixed timestep regardless of how
//! long the frame took. Frame-rate variance is absorbed by the caller's
//! accumulator loop.

use std::num::NonZeroUsize;

use glam::Vec2;
use rapier2d::prelude::*;

use crate::consts::{POSITION_ITERATIONS, TIME_STEP, VELOCITY_ITERATIONS};

/// Handle to a body owned by the physics world
pub type BodyHandle = RigidBodyHandle;

/// Restitution for dynamic balls (players, rolling bombs)
const BALL_RESTITUTION: f32 = 0.4;

/// Owns every physics body in the arena
pub struct PhysicsWorld {
    pipeline: PhysicsPipeline,
    gravity: Vector<Real>,
    integration_params: IntegrationParameters,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    /// Number of steps taken since creation
    steps: u64,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Create a zero-gravity world with the fixed step parameters
    pub fn new() -> Self {
        let mut integration_params = IntegrationParameters {
            dt: TIME_STEP,
            ..IntegrationParameters::default()
        };
        integration_params.num_solver_iterations =
            NonZeroUsize::new(VELOCITY_ITERATIONS).unwrap_or(NonZeroUsize::MIN);
        integration_params.num_internal_stabilization_iterations = POSITION_ITERATIONS;

        Self {
            pipeline: PhysicsPipeline::new(),
            gravity: vector![0.0, 0.0],
            integration_params,
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            steps: 0,
        }
    }

    /// Advance the simulation by one fixed timestep
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration_params,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
        self.steps += 1;
        log::trace!("physics step {} ({} bodies)", self.steps, self.bodies.len());
    }

    /// Simulated time step used by `step` (seconds)
    pub fn timestep(&self) -> f32 {
        self.integration_params.dt
    }

    /// Number of steps taken so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Create an immovable axis-aligned box centered at `center` (meters)
    pub fn create_static_box(&mut self, center: Vec2, half_extents: Vec2) -> BodyHandle {
        let body = RigidBodyBuilder::fixed()
            .translation(vector![center.x, center.y])
            .build();
        let handle = self.bodies.insert(body);
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y).build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    /// Create a simulated ball centered at `center` (meters) moving at `velocity` (m/s)
    pub fn create_dynamic_ball(&mut self, center: Vec2, radius: f32, velocity: Vec2) -> BodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![center.x, center.y])
            .linvel(vector![velocity.x, velocity.y])
            .ccd_enabled(true)
            .build();
        let handle = self.bodies.insert(body);
        let collider = ColliderBuilder::ball(radius)
            .restitution(BALL_RESTITUTION)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    /// Remove a body and its colliders. Returns false if it was already gone.
    pub fn destroy_body(&mut self, handle: BodyHandle) -> bool {
        self.bodies
            .remove(
                handle,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    /// Whether the body still exists in the simulation
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains(handle)
    }

    /// Body center in meters
    pub fn position(&self, handle: BodyHandle) -> Option<Vec2> {
        self.bodies.get(handle).map(|rb| {
            let t = rb.translation();
            Vec2::new(t.x, t.y)
        })
    }

    /// Body linear velocity in m/s
    pub fn velocity(&self, handle: BodyHandle) -> Option<Vec2> {
        self.bodies.get(handle).map(|rb| {
            let v = rb.linvel();
            Vec2::new(v.x, v.y)
        })
    }

    pub fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec2) {
        if let Some(rb) = self.bodies.get_mut(handle) {
            rb.set_linvel(vector![velocity.x, velocity.y], true);
        }
    }

    /// Number of bodies currently in the simulation
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }
}
