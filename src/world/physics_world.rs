#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::collision::{collide_pair, Manifold};
use crate::common::{PhysicsError, WorldConfig};
use crate::integration::integrator;
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

/// Slack when comparing the accumulator against the step length, so that a delta of
/// exactly `k * dt` runs `k` steps despite rounding.
const ACCUMULATOR_TOLERANCE: f64 = 1e-9;

/// Stable identity of a body, unaffected by removal of other bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyHandle(u64);

/// Owns the bodies and advances them in fixed steps.
#[derive(Debug, Clone)]
pub struct PhysicsWorld {
    bodies: Vec<RigidBody>,
    // Parallel to `bodies`
    handles: Vec<BodyHandle>,
    next_handle: u64,
    // Manifolds generated by the last fixed step
    contacts: Vec<Manifold>,
    config: WorldConfig,
    accumulator: f64,
}

impl PhysicsWorld {
    /// Creates a new, empty physics world with default settings.
    pub fn new() -> Self {
        Self::from_valid_config(WorldConfig::default())
    }

    /// Creates an empty world with custom settings.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidConfig`] if `config` fails [`WorldConfig::validate`].
    pub fn with_config(config: WorldConfig) -> Result<Self, PhysicsError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: WorldConfig) -> Self {
        debug!(
            fps = config.fps,
            gravity = ?config.gravity,
            "physics world created"
        );
        Self {
            bodies: Vec::new(),
            handles: Vec::new(),
            next_handle: 0,
            contacts: Vec::new(),
            config,
            accumulator: 0.0,
        }
    }

    /// Adds a rigid body to the end of the body list and returns its handle.
    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        let handle = BodyHandle(self.next_handle);
        self.next_handle += 1;

        debug!(
            ?handle,
            index = self.bodies.len(),
            kind = ?body.shape.kind(),
            "body added"
        );
        self.bodies.push(body);
        self.handles.push(handle);
        handle
    }

    /// Removes the body with `handle`, keeping the order of the others.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::UnknownBody`] if no body in this world has `handle`.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<RigidBody, PhysicsError> {
        let index = self
            .index_of(handle)
            .ok_or(PhysicsError::UnknownBody(handle))?;
        self.remove_body_at(index)
    }

    /// Removes the body at `index`, keeping the order of the others.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::IndexOutOfRange`] if `index >= self.len()`.
    pub fn remove_body_at(&mut self, index: usize) -> Result<RigidBody, PhysicsError> {
        if index >= self.bodies.len() {
            return Err(PhysicsError::IndexOutOfRange {
                index,
                len: self.bodies.len(),
            });
        }
        // Manifolds refer to bodies by index.
        self.contacts.clear();

        let handle = self.handles.remove(index);
        let body = self.bodies.remove(index);
        debug!(?handle, index, kind = ?body.shape.kind(), "body removed");
        Ok(body)
    }

    /// Current position of `handle` in the body list.
    pub fn index_of(&self, handle: BodyHandle) -> Option<usize> {
        self.handles.iter().position(|h| *h == handle)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        let index = self.index_of(handle)?;
        Some(&self.bodies[index])
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        let index = self.index_of(handle)?;
        Some(&mut self.bodies[index])
    }

    /// All bodies in insertion order.
    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [RigidBody] {
        &mut self.bodies
    }

    /// Manifolds found by the most recent fixed step, for debug drawing.
    pub fn contacts(&self) -> &[Manifold] {
        &self.contacts
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn gravity(&self) -> Vec2 {
        self.config.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.config.gravity = gravity;
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Drops every body and any unsimulated time.
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.handles.clear();
        self.contacts.clear();
        self.accumulator = 0.0;
    }

    /// Advances the simulation by `delta` seconds of wall-clock time.
    ///
    /// Time is banked and consumed in fixed steps of [`WorldConfig::time_step`]; leftovers
    /// carry over to the next call. Returns how many fixed steps ran.
    pub fn step(&mut self, delta: f64) -> usize {
        if !(delta.is_finite() && delta >= 0.0) {
            warn!(delta, "ignoring invalid frame delta");
            return 0;
        }

        self.accumulator += delta;
        if self.accumulator > self.config.accumulator_limit {
            debug!(
                accumulated = self.accumulator,
                limit = self.config.accumulator_limit,
                "frame too slow, dropping simulated time"
            );
            self.accumulator = self.config.accumulator_limit;
        }

        let dt = self.config.time_step();
        let mut steps = 0;
        while self.accumulator + ACCUMULATOR_TOLERANCE >= dt {
            self.step_fixed();
            self.accumulator -= dt;
            steps += 1;
        }
        self.accumulator = self.accumulator.max(0.0);
        steps
    }

    /// Runs exactly one fixed step, ignoring the accumulator.
    pub fn step_fixed(&mut self) {
        let dt = self.config.time_step();
        let gravity = self.config.gravity;

        self.find_contacts();

        for body in &mut self.bodies {
            integrator::integrate_forces(body, gravity, dt);
            body.normalize_angles();
        }

        for manifold in &mut self.contacts {
            manifold.initialize(&self.bodies, dt, gravity);
        }
        for manifold in &self.contacts {
            manifold.apply_impulse(&mut self.bodies);
        }

        for body in &mut self.bodies {
            integrator::integrate_velocity(body, gravity, dt);
            body.normalize_angles();
        }

        for manifold in &self.contacts {
            manifold.correct_position(
                &mut self.bodies,
                self.config.correction_percent,
                self.config.correction_slop,
            );
        }

        for body in &mut self.bodies {
            body.clear_accumulators();
        }

        trace!(
            bodies = self.bodies.len(),
            manifolds = self.contacts.len(),
            "fixed step"
        );
    }

    /// All pairs `i < j` in insertion order; pairs of two immovable bodies are skipped.
    fn find_contacts(&mut self) {
        self.contacts.clear();
        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                if self.bodies[i].inv_mass == 0.0 && self.bodies[j].inv_mass == 0.0 {
                    continue;
                }
                if let Some(manifold) = collide_pair(&self.bodies, i, j) {
                    self.contacts.push(manifold);
                }
            }
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
