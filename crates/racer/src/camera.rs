//! # Follow Camera
//!
//! A chase camera that trails a vehicle's world transform. It smooths small
//! heading changes with a quadratic ease-in and lets sharp turns drift, so the
//! vehicle can swing around in frame before the camera settles behind it.
//!
//! ## Modes
//! - `Wide`: high and far behind the vehicle
//! - `Near`: low and close, looking at a point above the roof
//! - `NearLocked`: as `Near` but never re-centres behind the vehicle
//! - `Isometric`: fixed world diagonal with an orthographic projection
//!
//! Switching mode snaps the camera into the new geometry on the next update.
//! A new camera is armed the same way, so its first update places it directly.

use racer_engine::foundation::math::{constants::PI, Mat4, Mat4Ext, Vec3, FORWARD, UP};
use racer_engine::foundation::time::Cooldown;
use serde::{Deserialize, Serialize};

/// Blend rate of the interpolation factor (per second)
const FOLLOW_RATE: f32 = 0.015;

/// Seconds between accepted mode changes
pub const CAMERA_CHANGE_COOLDOWN: f32 = 0.5;

const PERSPECTIVE_FOV: f32 = PI / 3.0;
const PERSPECTIVE_NEAR: f32 = 0.1;
const PERSPECTIVE_FAR: f32 = 100_000.0;

/// Multiple of the viewport size covered by the orthographic projection
const ORTHOGRAPHIC_SPAN: f32 = 3.0;
const ORTHOGRAPHIC_NEAR: f32 = 0.01;
const ORTHOGRAPHIC_FAR: f32 = 10_000.0;

/// Viewport dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 1280.0, height: 720.0 }
    }
}

impl Viewport {
    /// Width over height
    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }
}

/// Follow camera modes, cycled in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CameraMode {
    /// High and far behind the vehicle
    #[default]
    Wide,
    /// Low and close behind the vehicle
    Near,
    /// Low and close, without re-centring
    NearLocked,
    /// Fixed diagonal, orthographic
    Isometric,
}

/// Placement of the eye relative to the tracked vehicle
#[derive(Debug, Clone, Copy)]
struct Profile {
    depth: f32,
    height: f32,
    threshold: f32,
    raised_target: bool,
}

impl CameraMode {
    /// The mode after this one, wrapping to the first
    pub fn next(self) -> Self {
        match self {
            Self::Wide => Self::Near,
            Self::Near => Self::NearLocked,
            Self::NearLocked => Self::Isometric,
            Self::Isometric => Self::Wide,
        }
    }

    /// Whether the mode renders with an orthographic projection
    pub fn is_orthographic(self) -> bool {
        matches!(self, Self::Isometric)
    }

    fn profile(self) -> Profile {
        let (depth, height, threshold, raised_target) = match self {
            Self::Wide => (2500.0, 2500.0, 0.75, false),
            Self::Near => (750.0, 100.0, 0.75, true),
            // Alignment is clamped to 1, so this never passes
            Self::NearLocked => (750.0, 100.0, 1.0, true),
            Self::Isometric => (1000.0, 1000.0, 0.75, false),
        };
        Profile { depth, height, threshold, raised_target }
    }

    fn projection(self, viewport: Viewport) -> Mat4 {
        if self.is_orthographic() {
            Mat4::orthographic(
                viewport.width * ORTHOGRAPHIC_SPAN,
                viewport.height * ORTHOGRAPHIC_SPAN,
                ORTHOGRAPHIC_NEAR,
                ORTHOGRAPHIC_FAR,
            )
        } else {
            Mat4::perspective(
                PERSPECTIVE_FOV,
                viewport.aspect_ratio(),
                PERSPECTIVE_NEAR,
                PERSPECTIVE_FAR,
            )
        }
    }
}

/// Smoothed chase camera
#[derive(Debug, Clone)]
pub struct FollowCamera {
    viewport: Viewport,
    mode: CameraMode,
    projection: Mat4,
    view: Mat4,
    eye: Vec3,
    target: Vec3,
    current_direction: Vec3,
    previous_direction: Vec3,
    interpolation: f32,
    change_cooldown: Cooldown,
}

impl FollowCamera {
    /// Create a wide perspective camera for `viewport`
    pub fn new(viewport: Viewport) -> Self {
        Self::with_mode(viewport, CameraMode::default())
    }

    /// Create a camera starting in `mode`
    pub fn with_mode(viewport: Viewport, mode: CameraMode) -> Self {
        Self {
            viewport,
            mode,
            projection: mode.projection(viewport),
            view: Mat4::identity(),
            eye: Vec3::zeros(),
            target: Vec3::zeros(),
            current_direction: FORWARD,
            previous_direction: FORWARD,
            interpolation: 0.0,
            change_cooldown: Cooldown::new(CAMERA_CHANGE_COOLDOWN),
        }
    }

    /// Follow `target_world` for one frame
    pub fn update(&mut self, dt: f32, target_world: &Mat4) {
        let profile = self.mode.profile();

        let mut target = target_world.translation_part();
        if profile.raised_target {
            target += UP * profile.height * 2.0;
        }

        let candidate = if self.mode.is_orthographic() {
            Vec3::repeat(1.0)
        } else {
            target_world.forward().normalize()
        };

        if self.change_cooldown.is_reset() {
            self.current_direction = candidate;
            self.interpolation = 1.0;
        } else if self.previous_direction.dot(&candidate).min(1.0) > profile.threshold {
            self.interpolation = (self.interpolation + dt * FOLLOW_RATE).min(1.0);
            let weight = self.interpolation * self.interpolation;
            self.current_direction = self.current_direction.lerp(&candidate, weight);
        } else {
            self.interpolation = 0.0;
        }

        let eye = target + self.current_direction * profile.depth + UP * profile.height;

        // Re-orthogonalize up so a tilted vehicle does not roll the view
        let look = (target - eye).normalize();
        let right = look.cross(&UP);
        let corrected_up = right.cross(&look);

        self.view = Mat4::look_at(eye, target, corrected_up);
        self.eye = eye;
        self.target = target;
        self.previous_direction = candidate;

        log::trace!(
            "Camera eye {:?} target {:?} interpolation {:.3}",
            eye,
            target,
            self.interpolation
        );
    }

    /// Advance to the next mode and arm the snap for the next update
    pub fn change_camera(&mut self) {
        self.change_cooldown.reset();
        let previous = self.mode;
        self.mode = self.mode.next();

        if self.mode.is_orthographic() != previous.is_orthographic() {
            self.projection = self.mode.projection(self.viewport);
        }
        log::info!("Camera mode changed: {:?} -> {:?}", previous, self.mode);
    }

    /// Advance the mode-change cooldown; true once a change may be requested
    pub fn is_able_to_change_camera(&mut self, dt: f32) -> bool {
        self.change_cooldown.tick(dt)
    }

    /// Update the viewport, rebuilding the projection
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.projection = self.mode.projection(viewport);
    }

    /// World-to-camera matrix
    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// Projection for the current mode (Y-up view space)
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Combined `P × X × V` matrix with the Vulkan axis flip applied
    pub fn view_projection(&self) -> Mat4 {
        self.projection * Mat4::vulkan_coordinate_transform() * self.view
    }

    /// Eye position from the last update
    pub fn eye_position(&self) -> Vec3 {
        self.eye
    }

    /// Look-at point from the last update
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Smoothed offset direction
    pub fn current_direction(&self) -> Vec3 {
        self.current_direction
    }

    /// Blend factor in `[0, 1]`
    pub fn interpolation(&self) -> f32 {
        self.interpolation
    }

    /// Active mode
    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Viewport the projection is sized from
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use racer_engine::foundation::math::{Point3, Quat, Transform};

    fn car_world(position: Vec3, yaw: f32) -> Mat4 {
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), yaw);
        Transform::from_position_rotation(position, rotation).to_matrix()
    }

    /// A camera whose cooldown has moved off its reset value
    fn settled_camera() -> FollowCamera {
        let mut camera = FollowCamera::new(Viewport::default());
        camera.update(0.016, &car_world(Vec3::zeros(), 0.0));
        camera.is_able_to_change_camera(0.016);
        camera
    }

    #[test]
    fn test_cycle_wraps() {
        let mut mode = CameraMode::Wide;
        for _ in 0..4 {
            mode = mode.next();
        }
        assert_eq!(mode, CameraMode::Wide);
        assert!(CameraMode::Wide.next().next().next().is_orthographic());
    }

    #[test]
    fn test_wide_eye_sits_behind_and_above() {
        let mut camera = FollowCamera::new(Viewport::default());
        camera.update(0.016, &car_world(Vec3::new(10.0, 0.0, 20.0), 0.0));

        // Travel is +Z, so the camera trails on -Z
        let expected = Vec3::new(10.0, 2500.0, -2480.0);
        assert_relative_eq!(camera.eye_position(), expected, epsilon = 1e-2);
        assert_relative_eq!(camera.target(), Vec3::new(10.0, 0.0, 20.0));
    }

    #[test]
    fn test_view_puts_target_on_negative_z() {
        let mut camera = FollowCamera::new(Viewport::default());
        camera.update(0.016, &car_world(Vec3::new(100.0, 0.0, -50.0), 0.7));

        let target = camera.view().transform_point(&Point3::from(camera.target()));
        let distance = (camera.eye_position() - camera.target()).norm();
        assert_relative_eq!(target.coords, Vec3::new(0.0, 0.0, -distance), epsilon = 1e-1);
    }

    #[test]
    fn test_snap_after_mode_change() {
        let mut camera = settled_camera();
        camera.change_camera();
        assert_eq!(camera.mode(), CameraMode::Near);

        let world = car_world(Vec3::zeros(), 2.5);
        camera.update(0.016, &world);

        assert_eq!(camera.interpolation(), 1.0);
        assert_eq!(camera.current_direction(), world.forward().normalize());
        assert_relative_eq!(camera.target(), Vec3::new(0.0, 200.0, 0.0));
    }

    #[test]
    fn test_stable_heading_eases_in() {
        let mut camera = settled_camera();
        camera.update(0.016, &car_world(Vec3::zeros(), PI / 2.0));
        assert_eq!(camera.interpolation(), 0.0);
        let before = camera.current_direction();

        let world = car_world(Vec3::zeros(), PI / 2.0 + 0.3);
        camera.update(2.0, &world);

        assert_relative_eq!(camera.interpolation(), 0.03);
        let candidate = world.forward().normalize();
        let expected = before.lerp(&candidate, 0.03 * 0.03);
        assert_relative_eq!(camera.current_direction(), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_interpolation_saturates_at_one() {
        let mut camera = settled_camera();
        camera.update(0.016, &car_world(Vec3::zeros(), PI));
        assert_eq!(camera.interpolation(), 0.0);

        for _ in 0..10 {
            camera.update(20.0, &car_world(Vec3::zeros(), PI));
            assert!(camera.interpolation() <= 1.0);
        }
        assert_eq!(camera.interpolation(), 1.0);
        assert_relative_eq!(camera.current_direction(), Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_sharp_turn_resets_interpolation() {
        let mut camera = settled_camera();
        camera.update(10.0, &car_world(Vec3::zeros(), 0.0));
        assert!(camera.interpolation() > 0.0);
        let before = camera.current_direction();

        camera.update(0.016, &car_world(Vec3::zeros(), PI / 2.0));

        assert_eq!(camera.interpolation(), 0.0);
        assert_eq!(camera.current_direction(), before);
    }

    #[test]
    fn test_locked_mode_never_recentres() {
        let mut camera = settled_camera();
        camera.change_camera();
        camera.change_camera();
        assert_eq!(camera.mode(), CameraMode::NearLocked);
        camera.update(0.016, &car_world(Vec3::zeros(), 0.0));
        camera.is_able_to_change_camera(0.016);
        let locked = camera.current_direction();

        for _ in 0..5 {
            camera.update(1.0, &car_world(Vec3::zeros(), 0.1));
            assert_eq!(camera.interpolation(), 0.0);
        }
        assert_eq!(camera.current_direction(), locked);
    }

    #[test]
    fn test_projection_swaps_with_isometric() {
        let viewport = Viewport::default();
        let mut camera = FollowCamera::new(viewport);
        let perspective = camera.projection();

        for _ in 0..3 {
            camera.change_camera();
        }
        assert_eq!(camera.mode(), CameraMode::Isometric);
        let orthographic = Mat4::orthographic(3840.0, 2160.0, 0.01, 10_000.0);
        assert_relative_eq!(camera.projection(), orthographic);

        camera.update(0.016, &car_world(Vec3::new(5.0, 0.0, 5.0), 1.0));
        assert_relative_eq!(camera.current_direction(), Vec3::repeat(1.0));
        assert_relative_eq!(camera.eye_position(), Vec3::new(1005.0, 2000.0, 1005.0));

        camera.change_camera();
        assert_eq!(camera.mode(), CameraMode::Wide);
        assert_eq!(camera.projection(), perspective);
    }

    #[test]
    fn test_with_mode_picks_matching_projection() {
        let camera = FollowCamera::with_mode(Viewport::default(), CameraMode::Isometric);
        assert_eq!(camera.projection(), Mat4::orthographic(3840.0, 2160.0, 0.01, 10_000.0));
        assert_eq!(camera.mode().next(), CameraMode::Wide);
    }

    #[test]
    fn test_isometric_start_places_eye_on_first_update() {
        let mut camera = FollowCamera::with_mode(Viewport::default(), CameraMode::Isometric);
        camera.update(0.0, &car_world(Vec3::new(5.0, 0.0, 5.0), 2.0));

        assert_eq!(camera.interpolation(), 1.0);
        assert_relative_eq!(camera.current_direction(), Vec3::repeat(1.0));
        assert_relative_eq!(camera.eye_position(), Vec3::new(1005.0, 2000.0, 1005.0));
    }

    #[test]
    fn test_set_viewport_rebuilds_orthographic_extents() {
        let mut camera = FollowCamera::with_mode(Viewport::default(), CameraMode::Isometric);
        let viewport = Viewport { width: 800.0, height: 600.0 };

        camera.set_viewport(viewport);

        assert_eq!(camera.viewport(), viewport);
        let orthographic = Mat4::orthographic(2400.0, 1800.0, 0.01, 10_000.0);
        assert_relative_eq!(camera.projection(), orthographic);

        camera.change_camera();
        let perspective = Mat4::perspective(PI / 3.0, 800.0 / 600.0, 0.1, 100_000.0);
        assert_relative_eq!(camera.projection(), perspective);
    }

    #[test]
    fn test_view_projection_applies_axis_flip() {
        let mut camera = FollowCamera::new(Viewport::default());
        camera.update(0.016, &car_world(Vec3::new(300.0, 0.0, -40.0), 0.4));

        let expected = camera.projection() * Mat4::vulkan_coordinate_transform() * camera.view();
        assert_relative_eq!(camera.view_projection(), expected);

        // The target lands in front of the eye, inside the depth range
        let clip = camera.view_projection() * Point3::from(camera.target()).to_homogeneous();
        let depth = clip.z / clip.w;
        assert!(depth > 0.0 && depth < 1.0, "target depth {depth}");
        assert_relative_eq!(clip.x / clip.w, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_change_is_debounced() {
        let mut camera = FollowCamera::new(Viewport::default());
        assert!(!camera.is_able_to_change_camera(0.25));
        assert!(camera.is_able_to_change_camera(0.25));

        camera.change_camera();
        assert!(!camera.is_able_to_change_camera(0.25));
        assert!(camera.is_able_to_change_camera(0.3));
    }
}
