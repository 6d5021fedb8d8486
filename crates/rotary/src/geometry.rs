//! Angle math for the dial face.
//!
//! Angles are in degrees, 0 at the top of the dial. Pointer coordinates are
//! widget coordinates with `y` growing downwards.

use serde::{Deserialize, Serialize};

pub const FULL_TURN: f64 = 360.0;
pub const HALF_TURN: f64 = 180.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Clockwise angle of `point` around `center` in `[0, 360)`.
///
/// A pointer sitting exactly on `center` has no direction; the result is still
/// in range but carries no meaning.
pub fn angle_cw(center: Point, point: Point) -> f64 {
    let (dx, dy) = (point.x - center.x, point.y - center.y);
    let deg = (dy.atan2(dx).to_degrees() + 90.0).rem_euclid(FULL_TURN);
    // rem_euclid may round up to the modulus itself
    let cw = (FULL_TURN - deg).rem_euclid(FULL_TURN);
    if cw >= FULL_TURN { 0.0 } else { cw }
}

/// Signed shortest turn from `a` to `b`, in `(-180, 180]`.
pub fn shortest_delta(a: f64, b: f64) -> f64 {
    let d = (b - a).rem_euclid(FULL_TURN);
    if d > HALF_TURN { d - FULL_TURN } else { d }
}

/// Degrees between two adjacent dial positions. `range` is floored to 1.
pub fn step_angle(range: i64) -> f64 {
    FULL_TURN / range.max(1) as f64
}

/// Dial position under the indicator for an accumulated `rotation`.
pub fn discretize(rotation: f64, range: i64) -> i64 {
    let range = range.max(1);
    let steps = (rotation / step_angle(range)).round() as i64;
    steps.rem_euclid(range)
}

/// Nearest multiple of the step angle. Keeps the number of whole turns.
pub fn snap(rotation: f64, range: i64) -> f64 {
    let step = step_angle(range);
    (rotation / step).round() * step
}

/// Inverse of [`angle_cw`]: the point at `radius` from `center` whose
/// clockwise angle is `angle`.
pub fn point_on_circle(center: Point, radius: f64, angle: f64) -> Point {
    let rad = (-angle - 90.0).to_radians();
    center.offset(radius * rad.cos(), radius * rad.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_angle_cw_cardinal_points() {
        let c = Point::new(100.0, 100.0);
        assert!(close(angle_cw(c, Point::new(100.0, 50.0)), 0.0));
        assert!(close(angle_cw(c, Point::new(50.0, 100.0)), 90.0));
        assert!(close(angle_cw(c, Point::new(100.0, 150.0)), 180.0));
        assert!(close(angle_cw(c, Point::new(150.0, 100.0)), 270.0));
    }

    #[test]
    fn test_angle_cw_stays_in_range() {
        let c = Point::new(0.0, 0.0);
        for i in 0..3600 {
            let a = (i as f64 * 0.1).to_radians();
            for r in [1e-12, 0.5, 1.0, 1e6] {
                let deg = angle_cw(c, Point::new(r * a.cos(), r * a.sin()));
                assert!((0.0..FULL_TURN).contains(&deg), "{deg} out of range");
            }
        }
        let degenerate = angle_cw(c, c);
        assert!((0.0..FULL_TURN).contains(&degenerate));
    }

    #[test]
    fn test_shortest_delta_wraps() {
        assert!(close(shortest_delta(350.0, 10.0), 20.0));
        assert!(close(shortest_delta(10.0, 350.0), -20.0));
        assert!(close(shortest_delta(0.0, 180.0), 180.0));
        assert!(close(shortest_delta(90.0, 90.0), 0.0));
        for (a, b) in [(0.0, 359.9), (1e5, -3.0), (-720.0, 45.0), (180.0, 0.0)] {
            let d = shortest_delta(a, b);
            assert!((-HALF_TURN..=HALF_TURN).contains(&d), "{d} out of range");
        }
    }

    #[test]
    fn test_full_circle_nets_one_turn() {
        let c = Point::default();
        let mut last = angle_cw(c, point_on_circle(c, 10.0, 0.0));
        let mut total = 0.0;
        for i in 1..=72 {
            let next = angle_cw(c, point_on_circle(c, 10.0, i as f64 * 5.0));
            total += shortest_delta(last, next);
            last = next;
        }
        // one clockwise lap, no jumps at the 0/360 seam
        assert!((total - FULL_TURN).abs() < 1e-6);
    }

    #[test]
    fn test_discretize_range_and_multiples() {
        for range in [1, 7, 10, 40, 100] {
            for k in -250i64..250 {
                let rotation = k as f64 * FULL_TURN / range as f64;
                assert_eq!(discretize(rotation, range), k.rem_euclid(range));
            }
        }
        for rotation in [-1e9, -361.3, -0.1, 0.0, 4.4, 4.5, 359.99, 1e9] {
            let v = discretize(rotation, 40);
            assert!((0..40).contains(&v));
        }
    }

    #[test]
    fn test_discretize_floors_bad_range() {
        assert_eq!(discretize(123.0, 0), 0);
        assert_eq!(discretize(-50.0, -4), 0);
        assert!(close(step_angle(0), FULL_TURN));
    }

    #[test]
    fn test_snap_keeps_turns() {
        assert!(close(snap(4.4, 40), 0.0));
        assert!(close(snap(4.6, 40), 9.0));
        assert!(close(snap(-13.0, 40), -9.0));
        assert!(close(snap(722.0, 40), 720.0));
    }

    #[test]
    fn test_point_on_circle_round_trips_angle() {
        let c = Point::new(3.0, -2.0);
        for deg in [0.0, 45.0, 90.0, 135.5, 270.0, 359.0] {
            assert!(close(angle_cw(c, point_on_circle(c, 5.0, deg)), deg));
        }
    }
}
