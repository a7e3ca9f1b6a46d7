//! Collision shapes and overlap tests
//!
//! # Module Organization
//!
//! - [`primitives`] - Oriented boxes and upright cylinders with their pairwise tests
//! - [`shape`] - The closed [`Collider`] enum that dispatches between them
//!
//! Shapes live in world space. Static scene shapes are never mutated after
//! construction; only a vehicle's own box is moved every frame.

pub mod primitives;
pub mod shape;

pub use primitives::{Cylinder, OrientedBox};
pub use shape::Collider;
