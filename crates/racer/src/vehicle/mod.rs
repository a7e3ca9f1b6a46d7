//! Arcade vehicle dynamics
//!
//! A [`Vehicle`] integrates a discrete gear model on the ground plane, a
//! simple jump/gravity model on the vertical axis, and resolves contacts with
//! the scene's pickups and obstacles once per frame.
//!
//! Frame order inside [`Vehicle::update`]:
//! 1. latch controls from the command snapshot (plus debounced toggles)
//! 2. grounded: steer, drive, jump / airborne: damp speed, apply gravity
//! 3. integrate position and clamp to the ground
//! 4. resolve pickups and obstacles, subtract the returned correction
//! 5. rebuild the world matrix

mod collision;
mod drive;
pub mod model;

pub use collision::Contact;
pub use model::{SpecError, VehicleSpec, NEUTRAL_GEAR, REVERSE_GEAR};

use crate::input::{Commands, Controls};
use crate::powerup::PowerUp;
use racer_engine::foundation::math::{Mat4, Mat4Ext, Quat, Transform, Vec3, BACKWARD, UP};
use racer_engine::foundation::time::Cooldown;
use racer_engine::physics::{Collider, OrientedBox};

/// Vertical speed lost per airborne frame
pub const GRAVITY: f32 = 50.0;

/// Seconds a toggle must wait before it can fire again
pub const TOGGLE_COOLDOWN: f32 = 0.5;

/// Local rotations for the wheel bones
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelRotations {
    /// Front wheels: steering yaw applied after the rolling spin
    pub front: Mat4,
    /// Rear wheels: rolling spin only
    pub rear: Mat4,
}

/// A controllable vehicle
#[derive(Debug, Clone)]
pub struct Vehicle {
    spec: VehicleSpec,
    transform: Transform,
    direction: Vec3,
    world: Mat4,
    bounding_box: OrientedBox,

    gear: usize,
    speed: f32,
    vertical_speed: f32,
    velocity: Vec3,
    wheel_rotation: f32,
    steering_wheel_rotation: f32,

    controls: Controls,
    god_mode: bool,
    debug_overlay: bool,
    god_mode_cooldown: Cooldown,
    overlay_cooldown: Cooldown,

    boost_remaining: f32,
    missiles: u32,
    has_shield: bool,
}

impl Vehicle {
    /// Create a vehicle at rest in neutral
    ///
    /// Fails when the gear tables or body dimensions are unusable.
    pub fn new(
        spec: VehicleSpec,
        start_position: Vec3,
        start_rotation: Quat,
    ) -> Result<Self, SpecError> {
        spec.validate()?;

        let transform = Transform {
            position: start_position,
            rotation: start_rotation,
            scale: Vec3::repeat(spec.scale),
        };
        let bounding_box =
            OrientedBox::new(start_position + spec.body_offset, spec.body_extents, start_rotation);
        let world = transform.to_matrix();

        Ok(Self {
            direction: start_rotation * BACKWARD,
            transform,
            world,
            bounding_box,
            gear: NEUTRAL_GEAR,
            speed: 0.0,
            vertical_speed: 0.0,
            velocity: Vec3::zeros(),
            wheel_rotation: 0.0,
            steering_wheel_rotation: 0.0,
            controls: Controls::default(),
            god_mode: false,
            debug_overlay: false,
            god_mode_cooldown: Cooldown::new(TOGGLE_COOLDOWN),
            overlay_cooldown: Cooldown::new(TOGGLE_COOLDOWN),
            boost_remaining: 0.0,
            missiles: 0,
            has_shield: false,
            spec,
        })
    }

    /// Advance one frame
    ///
    /// `powerups` may be mutated (a collected pickup is hidden). Returns what
    /// the vehicle touched this frame.
    pub fn update(
        &mut self,
        dt: f32,
        commands: Commands,
        colliders: &[Collider],
        powerups: &mut [PowerUp],
    ) -> Contact {
        self.latch(dt, commands);
        let previous_position = self.transform.position;

        if self.is_grounded() {
            self.turn();
            self.drive(dt);
            if self.controls.jumping {
                self.jump();
            }
        } else {
            self.speed /= 1.0 + dt;
            self.vertical_speed -= GRAVITY;
        }

        self.velocity = self.direction * self.speed + UP * self.vertical_speed;
        self.transform.position += self.velocity * dt;

        if self.transform.position.y < 0.0 {
            self.transform.position.y = 0.0;
            self.vertical_speed = 0.0;
        }

        let mut contact = Contact::None;
        if self.transform.position != previous_position {
            let delta = self.transform.position - previous_position;
            contact = self.check_for_collisions(delta, colliders, powerups);
            self.transform.position -= contact.correction();
        }

        self.world = self.transform.to_matrix();
        log::trace!(
            "vehicle at {:?} gear {} speed {:.2} vertical {:.2}",
            self.transform.position,
            self.gear,
            self.speed,
            self.vertical_speed
        );
        contact
    }

    fn latch(&mut self, dt: f32, commands: Commands) {
        self.controls = Controls::resolve(commands, self.speed >= 0.0);

        if self.god_mode_cooldown.tick(dt) && commands.contains(Commands::TOGGLE_GOD_MODE) {
            self.god_mode = !self.god_mode;
            self.god_mode_cooldown.reset();
            log::info!("God mode {}", if self.god_mode { "enabled" } else { "disabled" });
        }

        if self.overlay_cooldown.tick(dt) && commands.contains(Commands::TOGGLE_DEBUG_OVERLAY) {
            self.debug_overlay = !self.debug_overlay;
            self.overlay_cooldown.reset();
            log::info!("Debug overlay {}", if self.debug_overlay { "shown" } else { "hidden" });
        }
    }

    /// Whether the vehicle touches the ground plane
    pub fn is_grounded(&self) -> bool {
        self.transform.position.y == 0.0
    }

    /// World position
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Orientation
    pub fn rotation(&self) -> Quat {
        self.transform.rotation
    }

    /// Unit direction of travel for positive speed
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// World matrix (scale, then rotation, then translation)
    pub fn world_matrix(&self) -> Mat4 {
        self.world
    }

    /// Collision box
    pub fn bounding_box(&self) -> &OrientedBox {
        &self.bounding_box
    }

    /// Tuning the vehicle was built from
    pub fn spec(&self) -> &VehicleSpec {
        &self.spec
    }

    /// Current gear index
    pub fn gear(&self) -> usize {
        self.gear
    }

    /// Signed longitudinal speed
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Vertical speed
    pub fn vertical_speed(&self) -> f32 {
        self.vertical_speed
    }

    /// Combined velocity used for the last integration step
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Controls latched this frame
    pub fn controls(&self) -> Controls {
        self.controls
    }

    /// Remaining boost fuel (seconds)
    pub fn boost_remaining(&self) -> f32 {
        self.boost_remaining
    }

    /// Missile charges held
    pub fn missiles(&self) -> u32 {
        self.missiles
    }

    /// Whether a shield is held
    pub fn has_shield(&self) -> bool {
        self.has_shield
    }

    /// Whether obstacle collisions are ignored
    pub fn god_mode(&self) -> bool {
        self.god_mode
    }

    /// Whether the collision box overlay should be drawn
    pub fn debug_overlay(&self) -> bool {
        self.debug_overlay
    }

    /// Accumulated wheel spin (radians)
    pub fn wheel_rotation(&self) -> f32 {
        self.wheel_rotation
    }

    /// Front-wheel steering angle (radians)
    pub fn steering_wheel_rotation(&self) -> f32 {
        self.steering_wheel_rotation
    }

    /// Bone rotations for the wheels, to be combined with each bone's rest transform
    pub fn wheel_bone_rotations(&self) -> WheelRotations {
        let spin = Mat4::rotation_x(self.wheel_rotation);
        WheelRotations {
            front: Mat4::rotation_y(self.steering_wheel_rotation) * spin,
            rear: spin,
        }
    }
}
