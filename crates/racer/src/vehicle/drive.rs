//! Gear model, steering and jumping

use super::{Vehicle, NEUTRAL_GEAR, REVERSE_GEAR};
use racer_engine::foundation::math::{utils::deg_to_rad, Quat, Vec3, BACKWARD};

impl Vehicle {
    /// Apply the forward or reverse gear model for this frame
    pub(super) fn drive(&mut self, dt: f32) {
        if self.speed < 0.0 {
            self.reverse(dt);
            return;
        }

        let accelerating = self.controls.accelerating;
        let braking = self.controls.braking;

        if accelerating {
            if self.controls.boosting && (self.boost_remaining > 0.0 || self.god_mode) {
                self.speed += self.spec.acceleration[self.gear] * self.spec.boost_multiplier;
                self.shift_up();
                let ceiling = self.spec.max_speed[self.gear] * (self.spec.boost_multiplier / 10.0);
                self.speed = self.speed.min(ceiling);
                self.boost_remaining = (self.boost_remaining - dt).max(0.0);
            } else {
                self.speed += self.spec.acceleration[self.gear];
                self.shift_up();
                self.speed = self.speed.min(self.spec.max_speed[self.gear]);
            }
        }

        if braking {
            self.speed -= self.spec.braking_force;
            self.shift_down();
        }

        if !accelerating && !braking {
            self.speed /= 1.0 + dt;
            self.shift_down();
        }

        self.wheel_rotation += deg_to_rad(self.speed / 10.0);
    }

    /// Reverse model; braking and coasting pull the vehicle back out of reverse
    fn reverse(&mut self, dt: f32) {
        if self.controls.accelerating {
            self.gear = REVERSE_GEAR;
            self.speed -= self.spec.acceleration[REVERSE_GEAR];
            self.speed = self.speed.max(-self.spec.max_speed[REVERSE_GEAR]);
        }

        if self.controls.braking {
            self.speed += self.spec.braking_force;
            self.leave_reverse();
        }

        if !self.controls.accelerating && !self.controls.braking {
            self.speed /= 1.0 + dt;
            self.leave_reverse();
        }

        self.wheel_rotation += deg_to_rad(self.speed / 10.0);
    }

    fn shift_up(&mut self) {
        if self.speed > self.spec.max_speed[self.gear] && self.gear + 1 < self.spec.gear_count() {
            self.gear += 1;
            log::debug!("Shifted up to gear {}", self.gear);
        }
    }

    fn shift_down(&mut self) {
        if self.gear > NEUTRAL_GEAR && self.speed < self.spec.max_speed[self.gear - 1] {
            self.gear -= 1;
            log::debug!("Shifted down to gear {}", self.gear);
        }
    }

    fn leave_reverse(&mut self) {
        let has_forward_gear = self.gear + 1 < self.spec.gear_count();
        if self.speed > self.spec.max_speed[NEUTRAL_GEAR] && has_forward_gear {
            self.gear += 1;
        }
    }

    /// Yaw the vehicle by the held steering input
    ///
    /// Authority scales with the fraction of the current gear's top speed, so a
    /// stationary vehicle does not turn. Neutral never steers.
    pub(super) fn turn(&mut self) {
        let steer = match (self.controls.turning_left, self.controls.turning_right) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        };

        if steer == 0.0 {
            self.steering_wheel_rotation = 0.0;
            return;
        }

        let ceiling = self.spec.max_speed[self.gear];
        if self.gear != NEUTRAL_GEAR && ceiling != 0.0 {
            let yaw = steer * self.spec.steering_speed * (self.speed / ceiling);
            let turn = Quat::from_axis_angle(&Vec3::y_axis(), yaw);
            self.transform.rotation = turn * self.transform.rotation;
            self.direction = self.transform.rotation * BACKWARD;
        }

        self.steering_wheel_rotation = steer * deg_to_rad(self.spec.steering_angle);
    }

    pub(super) fn jump(&mut self) {
        self.vertical_speed += self.spec.jump_speed;
    }
}
