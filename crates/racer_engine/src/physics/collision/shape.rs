//! High-level collider abstraction
//!
//! [`Collider`] is a closed set of shapes. Every shape pair is dispatched by an
//! exhaustive match, so adding a variant forces the intersection matrix to be
//! completed at compile time.

use super::primitives::{Cylinder, OrientedBox};
use crate::foundation::math::Vec3;

/// World-space collision shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collider {
    /// Oriented box
    Box(OrientedBox),
    /// Upright cylinder
    Cylinder(Cylinder),
}

impl Collider {
    /// Get center position
    pub fn center(&self) -> Vec3 {
        match self {
            Self::Box(b) => b.center,
            Self::Cylinder(c) => c.center,
        }
    }

    /// Test if this shape intersects with another shape
    ///
    /// Symmetric for every pair: `a.intersects(&b) == b.intersects(&a)`.
    pub fn intersects(&self, other: &Collider) -> bool {
        match (self, other) {
            (Self::Box(a), Self::Box(b)) => a.intersects_box(b),

            (Self::Box(b), Self::Cylinder(c)) | (Self::Cylinder(c), Self::Box(b)) => {
                b.intersects_cylinder(c)
            }

            (Self::Cylinder(a), Self::Cylinder(b)) => a.intersects_cylinder(b),
        }
    }

    /// True when the shape encloses no volume and therefore never intersects
    pub fn is_degenerate(&self) -> bool {
        match self {
            Self::Box(b) => b.is_degenerate(),
            Self::Cylinder(c) => c.is_degenerate(),
        }
    }
}

impl From<OrientedBox> for Collider {
    fn from(shape: OrientedBox) -> Self {
        Self::Box(shape)
    }
}

impl From<Cylinder> for Collider {
    fn from(shape: Cylinder) -> Self {
        Self::Cylinder(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Quat;

    #[test]
    fn test_dispatch_is_symmetric_across_variants() {
        let shapes = [
            Collider::from(OrientedBox::from_aabb(
                Vec3::new(-1.0, 0.0, -1.0),
                Vec3::new(1.0, 2.0, 1.0),
            )),
            Collider::from(OrientedBox::new(
                Vec3::new(1.8, 1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.5),
                Quat::from_axis_angle(&Vec3::y_axis(), 0.3),
            )),
            Collider::from(Cylinder::new(Vec3::new(0.0, 1.0, 1.5), 0.75, 1.0)),
            Collider::from(Cylinder::new(Vec3::new(5.0, 1.0, 5.0), 0.75, 1.0)),
        ];

        for a in &shapes {
            for b in &shapes {
                assert_eq!(a.intersects(b), b.intersects(a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn test_mixed_pairs() {
        let wall = OrientedBox::from_aabb(Vec3::new(-10.0, 0.0, -1.0), Vec3::new(10.0, 5.0, 1.0));
        let wall = Collider::from(wall);
        let tree = Collider::from(Cylinder::new(Vec3::new(0.0, 2.0, 2.0), 1.5, 2.0));
        let far_tree = Collider::from(Cylinder::new(Vec3::new(0.0, 2.0, 20.0), 1.5, 2.0));

        assert!(wall.intersects(&tree));
        assert!(tree.intersects(&wall));
        assert!(!wall.intersects(&far_tree));
        assert!(!tree.intersects(&far_tree));
        assert_eq!(tree.center(), Vec3::new(0.0, 2.0, 2.0));
    }

    #[test]
    fn test_degenerate_variant_reports_itself() {
        let point = Collider::from(OrientedBox::from_aabb(Vec3::zeros(), Vec3::zeros()));
        assert!(point.is_degenerate());
        assert!(!point.intersects(&point));
    }
}
