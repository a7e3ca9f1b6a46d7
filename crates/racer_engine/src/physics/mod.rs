//! Physics module for gameplay collision
//!
//! Provides discrete overlap tests between the shapes a scene is built from.
//! There is no continuous detection: fast movers may tunnel through thin
//! geometry.

pub mod collision;

pub use collision::{Collider, Cylinder, OrientedBox};
