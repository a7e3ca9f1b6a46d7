//! Pickup and obstacle resolution

use super::{Vehicle, NEUTRAL_GEAR};
use crate::powerup::{PowerUp, PowerUpKind};
use racer_engine::foundation::math::Vec3;
use racer_engine::physics::Collider;

/// Fraction of the frame's displacement pushed back on an obstacle hit
const PUSHBACK: f32 = 1.5;

/// Fraction of speed kept (and inverted) on an obstacle hit
const RESTITUTION: f32 = 0.3;

/// Missile charges granted by a pickup
const MISSILE_REFILL: u32 = 3;

/// Boost fuel granted by a pickup
const BOOST_REFILL: f32 = 3.0;

/// What the vehicle touched during a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Nothing
    None,
    /// Collected the pickup at `index`
    PowerUp {
        /// Index into the pickup list
        index: usize,
        /// Effect applied
        kind: PowerUpKind,
    },
    /// Bounced off the obstacle at `index`
    Obstacle {
        /// Index into the obstacle list
        index: usize,
        /// Displacement to subtract from the vehicle position
        correction: Vec3,
    },
}

impl Contact {
    /// Displacement the vehicle must undo
    pub fn correction(&self) -> Vec3 {
        match self {
            Self::Obstacle { correction, .. } => *correction,
            Self::None | Self::PowerUp { .. } => Vec3::zeros(),
        }
    }
}

impl Vehicle {
    /// Move the collision box by `delta` and resolve what it now touches
    ///
    /// Pickups are tested first; collecting one ends the check for this frame.
    /// Obstacles are skipped entirely in god mode. At most one obstacle is
    /// resolved per frame.
    pub(super) fn check_for_collisions(
        &mut self,
        delta: Vec3,
        colliders: &[Collider],
        powerups: &mut [PowerUp],
    ) -> Contact {
        self.bounding_box.center += delta;
        self.bounding_box.orientation = self.transform.rotation;
        let body = self.bounding_box;

        let collected = powerups
            .iter_mut()
            .enumerate()
            .find(|(_, powerup)| powerup.is_active() && body.intersects_box(powerup.collider()));
        if let Some((index, powerup)) = collected {
            powerup.hide();
            let kind = powerup.kind();
            self.collect(kind);
            return Contact::PowerUp { index, kind };
        }

        if self.god_mode {
            return Contact::None;
        }

        let body = Collider::Box(body);
        if let Some(index) = colliders.iter().position(|obstacle| body.intersects(obstacle)) {
            let correction = delta * PUSHBACK;
            self.bounding_box.center -= correction;
            self.speed = -self.speed * RESTITUTION;
            self.gear = NEUTRAL_GEAR;
            log::debug!("Hit obstacle {index}, bouncing at speed {:.2}", self.speed);
            return Contact::Obstacle { index, correction };
        }

        Contact::None
    }

    fn collect(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Boost => {
                let refilled = self.boost_remaining + BOOST_REFILL;
                self.boost_remaining = refilled.min(self.spec.max_boost);
            }
            PowerUpKind::Missiles => self.missiles = MISSILE_REFILL,
            PowerUpKind::Shield => self.has_shield = true,
        }
        log::info!("Collected {kind:?} pickup");
    }
}
