//! # Racer
//!
//! Arcade vehicle simulation built on the racer engine.
//!
//! ## Features
//!
//! - **Gear model**: per-gear acceleration and speed ceilings with reverse,
//!   boost and jumping
//! - **Collision response**: pickups and obstacles resolved once per frame,
//!   with a bounce-back on impact
//! - **Follow camera**: four modes with heading smoothing and drift on sharp turns
//! - **Headless sessions**: fixed-step runs driven by command snapshots
//!
//! ## Quick Start
//!
//! ```rust
//! use racer::prelude::*;
//!
//! let config = RacerConfig::default();
//! let mut session = Session::new(&config, Scene::default()).unwrap();
//!
//! for _ in 0..3 {
//!     session.step(config.simulation.fixed_dt, Commands::FORWARD);
//! }
//! assert_eq!(session.frame(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod camera;
pub mod config;
pub mod input;
pub mod powerup;
pub mod scene;
pub mod session;
pub mod vehicle;

/// Common imports for game code
pub mod prelude {
    pub use crate::{
        camera::{CameraMode, FollowCamera, Viewport},
        config::RacerConfig,
        input::Commands,
        powerup::{PowerUp, PowerUpKind},
        scene::{Scene, SceneBuilder},
        session::{FrameReport, Session},
        vehicle::{Contact, Vehicle, VehicleSpec},
    };
    pub use racer_engine::prelude::*;
}
