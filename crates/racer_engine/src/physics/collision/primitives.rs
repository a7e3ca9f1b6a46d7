//! Primitive collision shapes and intersection algorithms
//!
//! Provides oriented boxes and upright cylinders with the pairwise overlap
//! tests the scene needs. Touching shapes count as intersecting. A shape with
//! no volume (zero or negative extent, radius or half-height) never
//! intersects anything.

use crate::foundation::math::{Mat4, Quat, Vec3};

/// Padding added to the absolute rotation terms of the box-box test so that
/// near-parallel edge pairs do not produce a false separating axis
const PARALLEL_EPSILON: f32 = 1e-6;

/// An oriented bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox {
    /// Center position in world space
    pub center: Vec3,
    /// Half sizes along the box's local axes
    pub extents: Vec3,
    /// Rotation from box-local to world axes
    pub orientation: Quat,
}

impl OrientedBox {
    /// Creates a box from its center, half sizes and orientation
    pub fn new(center: Vec3, extents: Vec3, orientation: Quat) -> Self {
        Self { center, extents, orientation }
    }

    /// Creates an unrotated box spanning the `min`..`max` corners
    pub fn from_aabb(min: Vec3, max: Vec3) -> Self {
        Self {
            center: (min + max) * 0.5,
            extents: (max - min) * 0.5,
            orientation: Quat::identity(),
        }
    }

    /// The box's local X, Y and Z axes in world space
    pub fn axes(&self) -> [Vec3; 3] {
        [
            self.orientation * Vec3::x(),
            self.orientation * Vec3::y(),
            self.orientation * Vec3::z(),
        ]
    }

    /// True when the box encloses no volume
    pub fn is_degenerate(&self) -> bool {
        self.extents.iter().any(|&extent| extent <= 0.0)
    }

    /// Closest point on or inside the box to `point`
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let offset = point - self.center;
        self.axes()
            .iter()
            .zip(self.extents.iter())
            .fold(self.center, |closest, (axis, &extent)| {
                closest + axis * offset.dot(axis).clamp(-extent, extent)
            })
    }

    /// Half height of the box's shadow on the world Y axis
    pub fn vertical_half_extent(&self) -> f32 {
        self.axes()
            .iter()
            .zip(self.extents.iter())
            .map(|(axis, &extent)| axis.y.abs() * extent)
            .sum()
    }

    /// World matrix that maps a unit cube (side 1, centered at the origin) onto this box
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.center)
            * self.orientation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&(self.extents * 2.0))
    }

    /// Separating axis test against another box (3 + 3 face axes, 9 edge axes)
    pub fn intersects_box(&self, other: &OrientedBox) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }

        let a_axes = self.axes();
        let b_axes = other.axes();
        let ae = self.extents;
        let be = other.extents;

        // Rotation expressing `other` in this box's frame
        let mut r = [[0.0_f32; 3]; 3];
        let mut abs_r = [[0.0_f32; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                r[i][j] = a_axes[i].dot(&b_axes[j]);
                abs_r[i][j] = r[i][j].abs() + PARALLEL_EPSILON;
            }
        }

        let offset = other.center - self.center;
        let t = [offset.dot(&a_axes[0]), offset.dot(&a_axes[1]), offset.dot(&a_axes[2])];

        // This box's face normals
        for i in 0..3 {
            let ra = ae[i];
            let rb = be[0] * abs_r[i][0] + be[1] * abs_r[i][1] + be[2] * abs_r[i][2];
            if t[i].abs() > ra + rb {
                return false;
            }
        }

        // The other box's face normals
        for j in 0..3 {
            let ra = ae[0] * abs_r[0][j] + ae[1] * abs_r[1][j] + ae[2] * abs_r[2][j];
            let rb = be[j];
            let distance = t[0] * r[0][j] + t[1] * r[1][j] + t[2] * r[2][j];
            if distance.abs() > ra + rb {
                return false;
            }
        }

        // Edge-edge cross products
        for i in 0..3 {
            let (i1, i2) = ((i + 1) % 3, (i + 2) % 3);
            for j in 0..3 {
                let (j1, j2) = ((j + 1) % 3, (j + 2) % 3);
                let ra = ae[i1] * abs_r[i2][j] + ae[i2] * abs_r[i1][j];
                let rb = be[j1] * abs_r[i][j2] + be[j2] * abs_r[i][j1];
                let distance = t[i2] * r[i1][j] - t[i1] * r[i2][j];
                if distance.abs() > ra + rb {
                    return false;
                }
            }
        }

        true
    }

    /// Overlap test against an upright cylinder
    ///
    /// Exact for boxes rotated only about the world Y axis (every box in a
    /// flat-ground scene); conservative in height for tilted boxes.
    pub fn intersects_cylinder(&self, cylinder: &Cylinder) -> bool {
        if self.is_degenerate() || cylinder.is_degenerate() {
            return false;
        }

        let vertical_gap = (self.center.y - cylinder.center.y).abs();
        if vertical_gap > self.vertical_half_extent() + cylinder.half_height {
            return false;
        }

        // Sample the cylinder axis at the height nearest the box center
        let axis_y = self.center.y.clamp(cylinder.bottom(), cylinder.top());
        let axis_point = Vec3::new(cylinder.center.x, axis_y, cylinder.center.z);
        let closest = self.closest_point(axis_point);

        cylinder.horizontal_distance_squared(closest) <= cylinder.radius * cylinder.radius
    }
}

/// A cylinder standing upright along the world Y axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    /// Center position in world space (halfway up the axis)
    pub center: Vec3,
    /// Radius of the circular cross-section
    pub radius: f32,
    /// Half of the cylinder's height
    pub half_height: f32,
}

impl Cylinder {
    /// Creates a new upright cylinder
    pub fn new(center: Vec3, radius: f32, half_height: f32) -> Self {
        Self { center, radius, half_height }
    }

    /// True when the cylinder encloses no volume
    pub fn is_degenerate(&self) -> bool {
        self.radius <= 0.0 || self.half_height <= 0.0
    }

    /// Lowest point of the axis
    pub fn bottom(&self) -> f32 {
        self.center.y - self.half_height
    }

    /// Highest point of the axis
    pub fn top(&self) -> f32 {
        self.center.y + self.half_height
    }

    fn horizontal_distance_squared(&self, point: Vec3) -> f32 {
        let dx = point.x - self.center.x;
        let dz = point.z - self.center.z;
        dx * dx + dz * dz
    }

    /// Overlap test against another upright cylinder
    pub fn intersects_cylinder(&self, other: &Cylinder) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }

        if (self.center.y - other.center.y).abs() > self.half_height + other.half_height {
            return false;
        }

        let radius_sum = self.radius + other.radius;
        self.horizontal_distance_squared(other.center) <= radius_sum * radius_sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::{HALF_PI, PI};
    use approx::assert_relative_eq;

    fn unit_box() -> OrientedBox {
        OrientedBox::from_aabb(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0))
    }

    fn yaw(angle: f32) -> Quat {
        Quat::from_axis_angle(&Vec3::y_axis(), angle)
    }

    /// Box with unit half sizes
    fn cube_at(x: f32, z: f32, orientation: Quat) -> OrientedBox {
        OrientedBox::new(Vec3::new(x, 0.0, z), Vec3::repeat(1.0), orientation)
    }

    #[test]
    fn test_from_aabb_center_and_extents() {
        let b = OrientedBox::from_aabb(Vec3::new(0.0, 0.0, 0.0), Vec3::new(4.0, 2.0, 6.0));
        assert_relative_eq!(b.center, Vec3::new(2.0, 1.0, 3.0));
        assert_relative_eq!(b.extents, Vec3::new(2.0, 1.0, 3.0));
        assert_eq!(b.orientation, Quat::identity());
    }

    #[test]
    fn test_box_box_overlap_and_separation() {
        let a = unit_box();
        let near = cube_at(1.5, 0.0, Quat::identity());
        let far = cube_at(3.5, 0.0, Quat::identity());

        assert!(a.intersects_box(&near));
        assert!(near.intersects_box(&a));
        assert!(!a.intersects_box(&far));
        assert!(!far.intersects_box(&a));
    }

    #[test]
    fn test_box_box_touching_faces_intersect() {
        let a = unit_box();
        let touching = cube_at(2.0, 0.0, Quat::identity());
        assert!(a.intersects_box(&touching));
    }

    #[test]
    fn test_rotated_box_separated_along_diagonal() {
        // Axis-aligned bounds of the rotated box overlap the unit box, the boxes do not
        let a = unit_box();
        let rotated = cube_at(2.2, 2.2, yaw(PI / 4.0));
        assert!(!a.intersects_box(&rotated));
        assert!(!rotated.intersects_box(&a));

        let closer = cube_at(1.5, 1.5, yaw(PI / 4.0));
        assert!(a.intersects_box(&closer));
    }

    #[test]
    fn test_rotated_box_reaches_further_along_diagonal() {
        let a = unit_box();
        let rotated = cube_at(2.3, 0.0, yaw(PI / 4.0));
        let unrotated = cube_at(2.3, 0.0, Quat::identity());

        assert!(a.intersects_box(&rotated));
        assert!(!a.intersects_box(&unrotated));
    }

    #[test]
    fn test_degenerate_shapes_never_intersect() {
        let a = unit_box();
        let flat = OrientedBox::new(Vec3::zeros(), Vec3::new(1.0, 0.0, 1.0), Quat::identity());
        let thin = Cylinder::new(Vec3::zeros(), 0.0, 1.0);

        assert!(flat.is_degenerate());
        assert!(!a.intersects_box(&flat));
        assert!(!flat.intersects_box(&a));
        assert!(!a.intersects_cylinder(&thin));
        assert!(!thin.intersects_cylinder(&Cylinder::new(Vec3::zeros(), 1.0, 1.0)));
    }

    #[test]
    fn test_box_cylinder_side_and_corner() {
        let b = OrientedBox::from_aabb(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 2.0, 1.0));

        let beside = Cylinder::new(Vec3::new(1.5, 1.0, 0.0), 0.6, 1.0);
        assert!(b.intersects_cylinder(&beside));

        // Inside the corner's bounding square but outside the rounded reach
        let off_corner = Cylinder::new(Vec3::new(1.5, 1.0, 1.5), 0.6, 1.0);
        assert!(!b.intersects_cylinder(&off_corner));
    }

    #[test]
    fn test_box_cylinder_vertical_overlap() {
        let b = OrientedBox::from_aabb(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 2.0, 1.0));

        assert!(b.intersects_cylinder(&Cylinder::new(Vec3::new(0.0, 2.4, 0.0), 1.0, 0.5)));
        assert!(!b.intersects_cylinder(&Cylinder::new(Vec3::new(0.0, 3.6, 0.0), 1.0, 0.5)));
    }

    #[test]
    fn test_box_cylinder_follows_box_rotation() {
        let long = Vec3::new(2.0, 1.0, 1.0);
        let tree = Cylinder::new(Vec3::new(0.0, 0.0, 2.5), 0.6, 1.0);

        let along_x = OrientedBox::new(Vec3::zeros(), long, Quat::identity());
        let along_z = OrientedBox::new(Vec3::zeros(), long, yaw(HALF_PI));

        assert!(!along_x.intersects_cylinder(&tree));
        assert!(along_z.intersects_cylinder(&tree));
    }

    #[test]
    fn test_cylinder_cylinder() {
        let a = Cylinder::new(Vec3::zeros(), 1.0, 1.0);
        assert!(a.intersects_cylinder(&Cylinder::new(Vec3::new(1.5, 0.5, 0.0), 0.5, 1.0)));
        assert!(!a.intersects_cylinder(&Cylinder::new(Vec3::new(1.5, 0.0, 1.5), 0.5, 1.0)));
        assert!(!a.intersects_cylinder(&Cylinder::new(Vec3::new(0.0, 3.0, 0.0), 1.0, 0.5)));
    }

    #[test]
    fn test_closest_point_is_clamped_to_box() {
        let b = OrientedBox::new(Vec3::zeros(), Vec3::new(2.0, 1.0, 1.0), yaw(HALF_PI));
        let closest = b.closest_point(Vec3::new(0.0, 0.0, 10.0));
        assert_relative_eq!(closest, Vec3::new(0.0, 0.0, 2.0), epsilon = 1e-5);
    }

    #[test]
    fn test_to_matrix_scales_unit_cube_to_full_size() {
        let b = OrientedBox::from_aabb(Vec3::new(0.0, 0.0, 0.0), Vec3::new(4.0, 2.0, 6.0));
        let corner = b.to_matrix().transform_point(&nalgebra::Point3::new(0.5, 0.5, 0.5));
        assert_relative_eq!(corner.coords, Vec3::new(4.0, 2.0, 6.0), epsilon = 1e-5);
    }
}
