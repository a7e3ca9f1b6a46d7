//! Per-frame command snapshot
//!
//! The caller polls whatever device it owns and hands the vehicle a set of
//! raw intents. `FORWARD`/`BACKWARD` are not accelerate/brake: the vehicle
//! decides which is which from the sign of its current speed.

use bitflags::bitflags;

bitflags! {
    /// Commands held during one frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Commands: u16 {
        /// Drive towards the vehicle's nose
        const FORWARD = 1 << 0;
        /// Drive towards the vehicle's tail
        const BACKWARD = 1 << 1;
        /// Steer left
        const TURN_LEFT = 1 << 2;
        /// Steer right
        const TURN_RIGHT = 1 << 3;
        /// Spend boost fuel while accelerating
        const BOOST = 1 << 4;
        /// Jump when on the ground
        const JUMP = 1 << 5;
        /// Toggle collision immunity (debounced)
        const TOGGLE_GOD_MODE = 1 << 6;
        /// Toggle the bounding-box overlay (debounced)
        const TOGGLE_DEBUG_OVERLAY = 1 << 7;
        /// Cycle the follow camera mode (debounced)
        const CHANGE_CAMERA = 1 << 8;
        /// Toggle the scene's collider outlines (debounced)
        const TOGGLE_COLLIDER_OVERLAY = 1 << 9;
    }
}

/// Control latches derived from a [`Commands`] snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controls {
    /// Speed magnitude should grow
    pub accelerating: bool,
    /// Speed magnitude should shrink
    pub braking: bool,
    /// Boost requested
    pub boosting: bool,
    /// Left steering held
    pub turning_left: bool,
    /// Right steering held
    pub turning_right: bool,
    /// Jump requested
    pub jumping: bool,
}

impl Controls {
    /// Resolve raw intents against the direction of travel
    pub fn resolve(commands: Commands, going_forward: bool) -> Self {
        let (accelerate, brake) = if going_forward {
            (Commands::FORWARD, Commands::BACKWARD)
        } else {
            (Commands::BACKWARD, Commands::FORWARD)
        };

        Self {
            accelerating: commands.contains(accelerate),
            braking: commands.contains(brake),
            boosting: commands.contains(Commands::BOOST),
            turning_left: commands.contains(Commands::TURN_LEFT),
            turning_right: commands.contains(Commands::TURN_RIGHT),
            jumping: commands.contains(Commands::JUMP),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_intent_accelerates_when_going_forward() {
        let controls = Controls::resolve(Commands::FORWARD | Commands::BOOST, true);
        assert!(controls.accelerating);
        assert!(!controls.braking);
        assert!(controls.boosting);
    }

    #[test]
    fn test_intents_swap_when_reversing() {
        let controls = Controls::resolve(Commands::FORWARD, false);
        assert!(!controls.accelerating);
        assert!(controls.braking);

        let controls = Controls::resolve(Commands::BACKWARD, false);
        assert!(controls.accelerating);
        assert!(!controls.braking);
    }

    #[test]
    fn test_empty_snapshot_latches_nothing() {
        assert_eq!(Controls::resolve(Commands::empty(), true), Controls::default());
    }
}
