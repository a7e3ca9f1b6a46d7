//! Static scene geometry and pickups
//!
//! Obstacles and pickups are kept in contiguous insertion-ordered lists. The
//! vehicle scans them front to back each frame and stops at the first hit, so
//! the order they were added in decides which contact wins when several
//! overlap.

use crate::powerup::{PowerUp, PowerUpKind};
use racer_engine::foundation::math::{constants::PI, Quat, Vec3};
use racer_engine::foundation::time::Cooldown;
use racer_engine::physics::{Collider, Cylinder, OrientedBox};
use rand::Rng;

/// Seconds between accepted collider overlay toggles
pub const OVERLAY_TOGGLE_COOLDOWN: f32 = 0.3;

/// Stable index of an obstacle in its scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColliderHandle(usize);

impl ColliderHandle {
    /// Position in [`Scene::colliders`]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Stable index of a pickup in its scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PowerUpHandle(usize);

impl PowerUpHandle {
    /// Position in [`Scene::powerups`]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Accumulates scene records in insertion order
#[derive(Debug, Default)]
pub struct SceneBuilder {
    colliders: Vec<Collider>,
    powerups: Vec<PowerUp>,
}

impl SceneBuilder {
    /// Empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Axis-aligned box spanning `min`..`max`
    pub fn add_box(&mut self, min: Vec3, max: Vec3) -> ColliderHandle {
        self.push_collider(OrientedBox::from_aabb(min, max).into())
    }

    /// Box with half sizes `extents` rotated by `orientation`
    pub fn add_oriented_box(
        &mut self,
        center: Vec3,
        extents: Vec3,
        orientation: Quat,
    ) -> ColliderHandle {
        self.push_collider(OrientedBox::new(center, extents, orientation).into())
    }

    /// Upright cylinder
    pub fn add_cylinder(&mut self, center: Vec3, radius: f32, half_height: f32) -> ColliderHandle {
        self.push_collider(Cylinder::new(center, radius, half_height).into())
    }

    /// Pickup box of `size` centred on `position`
    pub fn add_powerup(&mut self, position: Vec3, size: Vec3, kind: PowerUpKind) -> PowerUpHandle {
        self.powerups.push(PowerUp::new(position, size, kind));
        PowerUpHandle(self.powerups.len() - 1)
    }

    fn push_collider(&mut self, collider: Collider) -> ColliderHandle {
        if collider.is_degenerate() {
            log::warn!("Degenerate collider at {:?} will never intersect", collider.center());
        }
        self.colliders.push(collider);
        ColliderHandle(self.colliders.len() - 1)
    }

    /// Finish the scene
    pub fn build(self) -> Scene {
        log::debug!(
            "Built scene with {} colliders and {} pickups",
            self.colliders.len(),
            self.powerups.len()
        );
        Scene {
            colliders: self.colliders,
            powerups: self.powerups,
            show_colliders: false,
            overlay_cooldown: Cooldown::new(OVERLAY_TOGGLE_COOLDOWN),
        }
    }
}

/// Obstacles and pickups the vehicle drives through
#[derive(Debug, Clone)]
pub struct Scene {
    colliders: Vec<Collider>,
    powerups: Vec<PowerUp>,
    show_colliders: bool,
    overlay_cooldown: Cooldown,
}

impl Default for Scene {
    fn default() -> Self {
        SceneBuilder::new().build()
    }
}

impl Scene {
    /// Start building a scene
    pub fn builder() -> SceneBuilder {
        SceneBuilder::new()
    }

    /// Walled arena with crates, a scattered ring of trees and one pickup of
    /// each kind
    ///
    /// The area around the origin, where a vehicle starts, is left clear.
    pub fn demo<R: Rng + ?Sized>(rng: &mut R) -> Self {
        const HALF_SIZE: f32 = 10_000.0;
        const WALL_HEIGHT: f32 = 600.0;
        const WALL_THICKNESS: f32 = 100.0;
        const TREES: usize = 24;
        const TREE_RING: f32 = 6_000.0;

        let mut builder = Self::builder();

        let inner = HALF_SIZE;
        let outer = HALF_SIZE + WALL_THICKNESS;
        builder.add_box(Vec3::new(-outer, 0.0, inner), Vec3::new(outer, WALL_HEIGHT, outer));
        builder.add_box(Vec3::new(-outer, 0.0, -outer), Vec3::new(outer, WALL_HEIGHT, -inner));
        builder.add_box(Vec3::new(inner, 0.0, -inner), Vec3::new(outer, WALL_HEIGHT, inner));
        builder.add_box(Vec3::new(-outer, 0.0, -inner), Vec3::new(-inner, WALL_HEIGHT, inner));

        let crate_extents = Vec3::new(150.0, 150.0, 150.0);
        let crates = [
            (2_500.0, 4_000.0, 0.0),
            (-2_500.0, 4_000.0, PI / 4.0),
            (0.0, -4_000.0, PI / 8.0),
        ];
        for &(x, z, yaw) in &crates {
            builder.add_oriented_box(
                Vec3::new(x, crate_extents.y, z),
                crate_extents,
                Quat::from_axis_angle(&Vec3::y_axis(), yaw),
            );
        }

        for i in 0..TREES {
            let angle = (i as f32 + rng.gen_range(-0.3..0.3)) * 2.0 * PI / TREES as f32;
            let distance = TREE_RING + rng.gen_range(-500.0..500.0);
            let radius = rng.gen_range(60.0..140.0);
            let half_height = rng.gen_range(300.0..700.0);
            builder.add_cylinder(
                Vec3::new(angle.cos() * distance, half_height, angle.sin() * distance),
                radius,
                half_height,
            );
        }

        let size = Vec3::repeat(250.0);
        builder.add_powerup(Vec3::new(0.0, 125.0, 2_000.0), size, PowerUpKind::Boost);
        builder.add_powerup(Vec3::new(1_500.0, 125.0, 2_500.0), size, PowerUpKind::Missiles);
        builder.add_powerup(Vec3::new(-1_500.0, 125.0, 2_500.0), size, PowerUpKind::Shield);

        builder.build()
    }

    /// Advance every pickup's spin and reappear timer
    pub fn update(&mut self, dt: f32) {
        for powerup in &mut self.powerups {
            powerup.update(dt);
        }
    }

    /// Obstacles in insertion order
    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    /// Pickups in insertion order
    pub fn powerups(&self) -> &[PowerUp] {
        &self.powerups
    }

    /// Obstacles for reading alongside mutable pickups
    pub fn split_mut(&mut self) -> (&[Collider], &mut [PowerUp]) {
        (&self.colliders, &mut self.powerups)
    }

    /// Look up an obstacle
    pub fn collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.colliders.get(handle.0)
    }

    /// Look up a pickup
    pub fn powerup(&self, handle: PowerUpHandle) -> Option<&PowerUp> {
        self.powerups.get(handle.0)
    }

    /// Whether collider outlines should be drawn
    pub fn show_colliders(&self) -> bool {
        self.show_colliders
    }

    /// Advance the overlay cooldown; true once the overlay may be toggled
    pub fn is_able_to_change_collider_visibility(&mut self, dt: f32) -> bool {
        self.overlay_cooldown.tick(dt)
    }

    /// Flip collider outline visibility and restart its cooldown
    pub fn change_collider_visibility(&mut self) {
        self.overlay_cooldown.reset();
        self.show_colliders = !self.show_colliders;
        log::info!("Collider overlay {}", if self.show_colliders { "shown" } else { "hidden" });
    }
}
