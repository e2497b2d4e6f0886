//! Circular orbit state for the bodies around the core.
//!
//! Kept in f64 and wrapped into [0, 2π) so long-running pages don't lose
//! angular precision; converted to f32 only when written to a node.

use std::f64::consts::TAU;
use crate::api::types::NodeId;

/// Wrap an angle into [0, 2π).
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Per-body animation state: where on its circle it is and how fast it moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    /// Multiplier on the global orbit rate.
    pub speed: f64,
    /// Current angle in radians, in [0, 2π).
    pub angle: f64,
    /// Fixed orbit radius.
    pub radius: f64,
}

impl OrbitState {
    pub fn new(angle: f64, speed: f64, radius: f64) -> Self {
        Self {
            speed,
            angle: wrap_angle(angle),
            radius,
        }
    }

    /// Advance by one frame: `angle += rate * speed`.
    pub fn advance(&mut self, rate: f64) {
        self.angle = wrap_angle(self.angle + rate * self.speed);
    }

    /// Position on the XZ plane: `(cos(angle)·radius, sin(angle)·radius)`.
    pub fn position(&self) -> (f64, f64) {
        (self.angle.cos() * self.radius, self.angle.sin() * self.radius)
    }
}

/// One orbiting body: its scene node, its place on the circle, and its local spin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Satellite {
    pub node: NodeId,
    pub orbit: OrbitState,
    /// Accumulated local X and Y rotation, in [0, 2π).
    pub spin: f64,
}

impl Satellite {
    pub fn new(node: NodeId, orbit: OrbitState) -> Self {
        Self {
            node,
            orbit,
            spin: 0.0,
        }
    }

    /// Advance one frame along the orbit and around the body's own axes.
    pub fn advance(&mut self, orbit_rate: f64, self_spin: f64) {
        self.orbit.advance(orbit_rate);
        self.spin = wrap_angle(self.spin + self_spin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Distance between two angles on the circle.
    fn angular_distance(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(TAU);
        d.min(TAU - d)
    }

    #[test]
    fn wrap_keeps_range() {
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!((wrap_angle(TAU + 1.0) - 1.0).abs() < 1e-12);
        assert!((wrap_angle(-1.0) - (TAU - 1.0)).abs() < 1e-12);
        assert!(wrap_angle(-1e-18) < TAU);
    }

    #[test]
    fn advance_scales_by_speed() {
        let mut orbit = OrbitState::new(0.0, 0.75, 2.0);
        orbit.advance(0.01);
        assert!((orbit.angle - 0.0075).abs() < 1e-12);
    }

    #[test]
    fn n_steps_match_closed_form() {
        let speed = 0.8;
        let start = 2.0 * std::f64::consts::PI / 3.0;
        let mut orbit = OrbitState::new(start, speed, 2.2);
        let n = 5000;
        for _ in 0..n {
            orbit.advance(0.01);
        }
        let expected = start + n as f64 * 0.01 * speed;
        assert!(angular_distance(orbit.angle, expected) < 1e-9);
    }

    #[test]
    fn position_is_on_circle() {
        let orbit = OrbitState::new(1.234, 0.5, 2.3);
        let (x, z) = orbit.position();
        assert!((x - 1.234f64.cos() * 2.3).abs() < 1e-12);
        assert!((z - 1.234f64.sin() * 2.3).abs() < 1e-12);
        assert!(((x * x + z * z).sqrt() - 2.3).abs() < 1e-12);
    }

    #[test]
    fn satellite_spins_independently_of_orbit() {
        let mut sat = Satellite::new(NodeId(4), OrbitState::new(0.0, 0.5, 2.0));
        for _ in 0..10 {
            sat.advance(0.01, 0.01);
        }
        assert!((sat.spin - 0.1).abs() < 1e-12);
        assert!((sat.orbit.angle - 0.05).abs() < 1e-12);
    }
}
