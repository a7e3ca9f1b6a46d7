//! One play session: a scene, the player's vehicle and the camera following it

use crate::camera::{CameraMode, FollowCamera};
use crate::config::RacerConfig;
use crate::input::Commands;
use crate::scene::Scene;
use crate::vehicle::{Contact, SpecError, Vehicle};
use racer_engine::foundation::math::{Mat4, Quat, Vec3};

/// Snapshot of a finished frame for renderers and logs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Frames completed, including this one
    pub frame: u64,
    /// Vehicle position
    pub position: Vec3,
    /// Vehicle speed
    pub speed: f32,
    /// Vehicle gear
    pub gear: usize,
    /// What the vehicle touched
    pub contact: Contact,
    /// Camera mode used for this frame
    pub camera_mode: CameraMode,
    /// Camera view matrix
    pub view: Mat4,
    /// Camera projection matrix
    pub projection: Mat4,
}

/// Owns the simulation state and runs frames in order
#[derive(Debug, Clone)]
pub struct Session {
    scene: Scene,
    vehicle: Vehicle,
    camera: FollowCamera,
    frame: u64,
}

impl Session {
    /// Start a session with the configured vehicle at the origin
    pub fn new(config: &RacerConfig, scene: Scene) -> Result<Self, SpecError> {
        let vehicle = Vehicle::new(config.vehicle.clone(), Vec3::zeros(), Quat::identity())?;
        let camera = FollowCamera::with_mode(config.camera.viewport, config.camera.initial_mode);
        log::info!(
            "Session started: {} colliders, {} pickups, camera {:?}",
            scene.colliders().len(),
            scene.powerups().len(),
            camera.mode()
        );
        Ok(Self::from_parts(scene, vehicle, camera))
    }

    /// Assemble a session from prepared parts
    ///
    /// The camera is placed on the vehicle's starting pose before the first
    /// frame, so it opens in its mode's geometry instead of easing towards it.
    pub fn from_parts(scene: Scene, vehicle: Vehicle, mut camera: FollowCamera) -> Self {
        camera.update(0.0, &vehicle.world_matrix());
        Self { scene, vehicle, camera, frame: 0 }
    }

    /// Run one frame
    ///
    /// Camera and overlay switches, then pickups, then the vehicle, then the
    /// camera. Pickups that reappear this frame can be collected in the same
    /// frame, and the camera always follows the vehicle's freshly integrated
    /// pose.
    pub fn step(&mut self, dt: f32, commands: Commands) -> FrameReport {
        if self.camera.is_able_to_change_camera(dt) && commands.contains(Commands::CHANGE_CAMERA) {
            self.camera.change_camera();
        }
        if self.scene.is_able_to_change_collider_visibility(dt)
            && commands.contains(Commands::TOGGLE_COLLIDER_OVERLAY)
        {
            self.scene.change_collider_visibility();
        }

        self.scene.update(dt);

        let (colliders, powerups) = self.scene.split_mut();
        let contact = self.vehicle.update(dt, commands, colliders, powerups);

        self.camera.update(dt, &self.vehicle.world_matrix());
        self.frame += 1;

        FrameReport {
            frame: self.frame,
            position: self.vehicle.position(),
            speed: self.vehicle.speed(),
            gear: self.vehicle.gear(),
            contact,
            camera_mode: self.camera.mode(),
            view: self.camera.view(),
            projection: self.camera.projection(),
        }
    }

    /// Scene being driven through
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Player vehicle
    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// Follow camera
    pub fn camera(&self) -> &FollowCamera {
        &self.camera
    }

    /// Frames completed
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Viewport;
    use crate::powerup::PowerUpKind;
    use crate::vehicle::VehicleSpec;
    use approx::assert_relative_eq;
    use racer_engine::foundation::math::Mat4Ext;

    fn empty_session() -> Session {
        Session::new(&RacerConfig::default(), Scene::default()).unwrap()
    }

    #[test]
    fn test_invalid_vehicle_rejected() {
        let mut config = RacerConfig::default();
        config.vehicle.max_speed.pop();
        assert!(Session::new(&config, Scene::default()).is_err());
    }

    #[test]
    fn test_camera_follows_fresh_pose() {
        let mut session = empty_session();
        let report = session.step(0.5, Commands::BACKWARD);

        assert_eq!(report.frame, 1);
        assert_relative_eq!(report.position, Vec3::new(0.0, 0.0, -15.0));
        assert_relative_eq!(session.camera().target(), report.position);
        assert_eq!(report.view, session.camera().view());
    }

    #[test]
    fn test_isometric_start_holds_the_diagonal() {
        let mut config = RacerConfig::default();
        config.camera.initial_mode = CameraMode::Isometric;
        let mut session = Session::new(&config, Scene::default()).unwrap();
        assert_relative_eq!(session.camera().current_direction(), Vec3::repeat(1.0));

        for _ in 0..60 {
            session.step(1.0 / 60.0, Commands::empty());
        }

        let camera = session.camera();
        assert_relative_eq!(camera.current_direction(), Vec3::repeat(1.0), epsilon = 1e-5);
        assert_relative_eq!(
            camera.eye_position(),
            camera.target() + Vec3::new(1000.0, 2000.0, 1000.0),
            epsilon = 1e-2
        );
    }

    #[test]
    fn test_near_start_sits_behind_rotated_vehicle() {
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), 2.0);
        let vehicle = Vehicle::new(VehicleSpec::racing_car(), Vec3::zeros(), rotation).unwrap();
        let behind = vehicle.world_matrix().forward().normalize();
        let camera = FollowCamera::with_mode(Viewport::default(), CameraMode::Near);

        let mut session = Session::from_parts(Scene::default(), vehicle, camera);
        assert_eq!(session.frame(), 0);
        assert_eq!(session.camera().interpolation(), 1.0);
        assert_relative_eq!(session.camera().current_direction(), behind);
        assert_relative_eq!(session.camera().target(), Vec3::new(0.0, 200.0, 0.0));

        for _ in 0..60 {
            session.step(1.0 / 60.0, Commands::empty());
        }
        assert_relative_eq!(session.camera().current_direction(), behind, epsilon = 1e-5);
    }

    #[test]
    fn test_collider_overlay_toggle_is_debounced() {
        let mut session = empty_session();
        assert!(!session.scene().show_colliders());

        session.step(0.25, Commands::TOGGLE_COLLIDER_OVERLAY);
        assert!(!session.scene().show_colliders());

        session.step(0.25, Commands::TOGGLE_COLLIDER_OVERLAY);
        assert!(session.scene().show_colliders());

        // Held key waits out the cooldown before flipping back
        session.step(0.25, Commands::TOGGLE_COLLIDER_OVERLAY);
        assert!(session.scene().show_colliders());
        session.step(0.25, Commands::TOGGLE_COLLIDER_OVERLAY);
        assert!(!session.scene().show_colliders());
    }

    #[test]
    fn test_camera_switch_is_debounced_and_snaps() {
        let mut session = empty_session();

        let report = session.step(0.25, Commands::CHANGE_CAMERA);
        assert_eq!(report.camera_mode, CameraMode::Wide);

        let report = session.step(0.25, Commands::CHANGE_CAMERA | Commands::TURN_LEFT);
        assert_eq!(report.camera_mode, CameraMode::Near);
        assert_eq!(session.camera().interpolation(), 1.0);
        assert_eq!(
            session.camera().current_direction(),
            session.vehicle().world_matrix().forward().normalize()
        );

        // Held key waits out the cooldown before cycling again
        let report = session.step(0.25, Commands::CHANGE_CAMERA);
        assert_eq!(report.camera_mode, CameraMode::Near);
    }

    #[test]
    fn test_pickups_rearm_before_vehicle_scans_them() {
        let mut builder = Scene::builder();
        let size = Vec3::repeat(250.0);
        builder.add_powerup(Vec3::new(0.0, 125.0, 0.0), size, PowerUpKind::Shield);
        let mut scene = builder.build();
        scene.split_mut().1[0].hide();

        let mut session = Session::new(&RacerConfig::default(), scene).unwrap();
        let report = session.step(5.0, Commands::FORWARD);

        let expected = Contact::PowerUp { index: 0, kind: PowerUpKind::Shield };
        assert_eq!(report.contact, expected);
        assert!(session.vehicle().has_shield());
        assert!(!session.scene().powerups()[0].is_active());
    }

    #[test]
    fn test_obstacle_bounce_reported() {
        let mut builder = Scene::builder();
        builder.add_box(Vec3::new(-500.0, 0.0, 300.0), Vec3::new(500.0, 400.0, 400.0));
        let scene = builder.build();

        let mut session = Session::new(&RacerConfig::default(), scene).unwrap();
        session.step(1.0, Commands::FORWARD);
        let report = session.step(1.0, Commands::FORWARD);
        assert_eq!(report.gear, 2);

        let mut contact = Contact::None;
        for _ in 0..20 {
            contact = session.step(1.0, Commands::FORWARD).contact;
            if contact != Contact::None {
                break;
            }
        }
        assert!(matches!(contact, Contact::Obstacle { index: 0, .. }));
        assert_eq!(session.vehicle().gear(), 1);
        assert!(session.vehicle().speed() < 0.0);
    }
}
