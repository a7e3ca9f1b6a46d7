//! Pickups scattered around the scene
//!
//! A pickup is active while its hidden timer is zero. Collecting it hides it
//! for [`HIDE_DURATION`] seconds, after which it reappears on its own.

use racer_engine::foundation::math::{constants::HALF_PI, Mat4, Mat4Ext, Vec3};
use racer_engine::physics::OrientedBox;
use serde::{Deserialize, Serialize};

/// Seconds a collected pickup stays hidden
pub const HIDE_DURATION: f32 = 5.0;

/// Yaw at creation (radians)
const INITIAL_SPIN: f32 = 1.0;

/// Decorative spin rate (radians per second)
const SPIN_RATE: f32 = -HALF_PI;

/// Effect granted on contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Adds boost fuel
    Boost,
    /// Refills missile charges
    Missiles,
    /// Grants a shield
    Shield,
}

/// A spinning pickup box
#[derive(Debug, Clone)]
pub struct PowerUp {
    kind: PowerUpKind,
    size: Vec3,
    spin: f32,
    world: Mat4,
    collider: OrientedBox,
    hidden_remaining: f32,
}

impl PowerUp {
    /// Create an active pickup of `size` centered on `position`
    pub fn new(position: Vec3, size: Vec3, kind: PowerUpKind) -> Self {
        let world = Mat4::new_translation(&position) * Mat4::rotation_y(INITIAL_SPIN);
        Self {
            kind,
            size,
            spin: INITIAL_SPIN,
            world,
            collider: Self::collider_at(position, size),
            hidden_remaining: 0.0,
        }
    }

    fn collider_at(translation: Vec3, size: Vec3) -> OrientedBox {
        let half = size * 0.5;
        OrientedBox::from_aabb(translation - half, translation + half)
    }

    /// Advance spin and, while hidden, the reappear timer
    pub fn update(&mut self, dt: f32) {
        self.spin += SPIN_RATE * dt;
        if self.is_active() {
            // Spin is cosmetic: the collider follows the translation only
            let translation = self.world.translation_part();
            self.world = Mat4::new_translation(&translation) * Mat4::rotation_y(self.spin);
            self.collider = Self::collider_at(translation, self.size);
        } else {
            self.hidden_remaining = (self.hidden_remaining - dt).max(0.0);
        }
    }

    /// Hide the pickup; re-hiding re-arms the full duration
    pub fn hide(&mut self) {
        self.hidden_remaining = HIDE_DURATION;
        log::debug!("{:?} pickup hidden for {HIDE_DURATION}s", self.kind);
    }

    /// Whether the pickup can be collected
    pub fn is_active(&self) -> bool {
        self.hidden_remaining == 0.0
    }

    /// Seconds until the pickup reappears
    pub fn hidden_remaining(&self) -> f32 {
        self.hidden_remaining
    }

    /// Effect granted on contact
    pub fn kind(&self) -> PowerUpKind {
        self.kind
    }

    /// Axis-aligned collision box
    pub fn collider(&self) -> &OrientedBox {
        &self.collider
    }

    /// Render transform including the decorative spin
    pub fn world_matrix(&self) -> Mat4 {
        self.world
    }
}
