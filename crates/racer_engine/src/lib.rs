//! # Racer Engine
//!
//! Shared foundations for the arcade racer: math types, frame timing and
//! debounce helpers, logging bootstrap, configuration loading and the
//! collider shapes used for gameplay collision.
//!
//! ## Quick Start
//!
//! ```rust
//! use racer_engine::prelude::*;
//!
//! let wall = Collider::from(OrientedBox::from_aabb(
//!     Vec3::new(-10.0, 0.0, -1.0),
//!     Vec3::new(10.0, 5.0, 1.0),
//! ));
//! let tree = Collider::from(Cylinder::new(Vec3::new(0.0, 2.0, 2.0), 1.5, 2.0));
//!
//! assert!(wall.intersects(&tree));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod physics;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        foundation::{
            math::{Mat3, Mat4, Mat4Ext, Quat, Transform, Vec3},
            time::{Cooldown, Timer},
        },
        physics::collision::{Collider, Cylinder, OrientedBox},
    };
}
