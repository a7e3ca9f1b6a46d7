//! Headless racer run
//!
//! Usage: `racer [config.toml|config.ron]`
//!
//! Builds the demo arena and drives the vehicle through a scripted sequence
//! of commands at a fixed timestep, logging a summary at the end.

use racer::prelude::*;
use racer_engine::foundation::logging;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Command snapshot for the scripted lap at `time` seconds
fn scripted_commands(time: f32) -> Commands {
    let mut commands = Commands::FORWARD;
    if (3.0..5.0).contains(&time) {
        commands |= Commands::TURN_LEFT;
    }
    if (5.0..6.0).contains(&time) {
        commands |= Commands::BOOST;
    }
    if (7.0..7.1).contains(&time) {
        commands |= Commands::JUMP;
    }
    if (8.0..8.1).contains(&time) {
        commands |= Commands::CHANGE_CAMERA;
    }
    if (9.0..9.1).contains(&time) {
        commands |= Commands::TOGGLE_GOD_MODE | Commands::TOGGLE_COLLIDER_OVERLAY;
    }
    commands
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args().nth(1);
    let loaded = match &path {
        Some(path) => RacerConfig::load_from_file(path),
        None => Ok(RacerConfig::default()),
    };

    let level = loaded.as_ref().map_or("info", |config| config.simulation.log_level.as_str());
    logging::init(level);

    let config = match loaded {
        Ok(config) => config,
        Err(error) => {
            log::error!("Failed to load configuration: {error}");
            return Err(error.into());
        }
    };
    match &path {
        Some(path) => log::info!("Using configuration {path}"),
        None => log::info!("Using default configuration"),
    }

    let mut rng = StdRng::seed_from_u64(config.simulation.seed);
    let scene = Scene::demo(&mut rng);
    let mut session = Session::new(&config, scene)?;

    let dt = config.simulation.fixed_dt;
    let mut timer = Timer::new();
    let mut pickups = 0;
    let mut hits = 0;

    for frame in 0..config.simulation.frames {
        #[allow(clippy::cast_precision_loss)]
        let time = frame as f32 * dt;
        let report = session.step(dt, scripted_commands(time));
        timer.update();

        match report.contact {
            Contact::PowerUp { kind, .. } => {
                pickups += 1;
                log::debug!("Frame {}: collected {kind:?}", report.frame);
            }
            Contact::Obstacle { index, .. } => {
                hits += 1;
                log::debug!("Frame {}: hit obstacle {index}", report.frame);
            }
            Contact::None => {}
        }
    }

    let vehicle = session.vehicle();
    log::info!(
        "Finished {} frames: position {:?}, speed {:.1}, gear {}, camera {:?}, overlay {}",
        session.frame(),
        vehicle.position(),
        vehicle.speed(),
        vehicle.gear(),
        session.camera().mode(),
        session.scene().show_colliders()
    );
    log::info!(
        "{pickups} pickups, {hits} obstacle hits, boost {:.2}, missiles {}, shield {}",
        vehicle.boost_remaining(),
        vehicle.missiles(),
        vehicle.has_shield()
    );
    log::info!("Simulated at {:.0} frames per second", timer.average_fps());
    Ok(())
}
