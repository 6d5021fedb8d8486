//! Damped spring used to ease the dial face into its resting angle.

use std::f64::consts::{PI, TAU};
use std::time::Duration;

pub const SNAP_RESPONSE: f64 = 0.32;
pub const SNAP_DAMPING_FRACTION: f64 = 0.82;

const REST_DISTANCE: f64 = 0.01;
const REST_VELOCITY: f64 = 0.01;
const MAX_SUBSTEP: f64 = 1.0 / 240.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringAnimation {
    stiffness: f64,
    damping: f64,
    position: f64,
    velocity: f64,
    target: f64,
}

impl SpringAnimation {
    /// `response` is the undamped period in seconds, `damping_fraction` the
    /// ratio to critical damping.
    pub fn new(response: f64, damping_fraction: f64, position: f64) -> Self {
        let response = response.max(f64::EPSILON);
        Self {
            stiffness: (TAU / response).powi(2),
            damping: 4.0 * PI * damping_fraction / response,
            position,
            velocity: 0.0,
            target: position,
        }
    }

    pub fn snap(position: f64) -> Self {
        Self::new(SNAP_RESPONSE, SNAP_DAMPING_FRACTION, position)
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn animate_to(&mut self, target: f64) {
        self.target = target;
    }

    /// Moves straight to `position`, dropping any motion in flight.
    pub fn jump_to(&mut self, position: f64) {
        self.position = position;
        self.target = position;
        self.velocity = 0.0;
    }

    pub fn is_settled(&self) -> bool {
        (self.target - self.position).abs() < REST_DISTANCE && self.velocity.abs() < REST_VELOCITY
    }

    /// Advances by `dt` and returns the new position.
    pub fn step(&mut self, dt: Duration) -> f64 {
        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 && !self.is_settled() {
            let h = remaining.min(MAX_SUBSTEP);
            let accel =
                -self.stiffness * (self.position - self.target) - self.damping * self.velocity;
            self.velocity += accel * h;
            self.position += self.velocity * h;
            remaining -= h;
        }
        if self.is_settled() {
            self.position = self.target;
            self.velocity = 0.0;
        }
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settles_on_target() {
        let mut spring = SpringAnimation::snap(0.0);
        spring.animate_to(9.0);
        assert!(!spring.is_settled());
        for _ in 0..120 {
            spring.step(Duration::from_millis(16));
        }
        assert!(spring.is_settled());
        assert_eq!(spring.position(), 9.0);
    }

    #[test]
    fn test_moves_towards_target_first() {
        let mut spring = SpringAnimation::snap(100.0);
        spring.animate_to(63.0);
        let p = spring.step(Duration::from_millis(16));
        assert!(p < 100.0 && p > 63.0);
    }

    #[test]
    fn test_underdamped_overshoot_is_small() {
        let mut spring = SpringAnimation::snap(0.0);
        spring.animate_to(10.0);
        let mut peak: f64 = 0.0;
        for _ in 0..200 {
            peak = peak.max(spring.step(Duration::from_millis(5)));
        }
        assert!(peak > 10.0);
        assert!(peak < 11.0);
    }

    #[test]
    fn test_jump_cancels_motion() {
        let mut spring = SpringAnimation::snap(0.0);
        spring.animate_to(90.0);
        spring.step(Duration::from_millis(30));
        spring.jump_to(45.0);
        assert!(spring.is_settled());
        assert_eq!(spring.step(Duration::from_millis(16)), 45.0);
    }
}
