//! Scene lighting: one ambient term plus directional lights.
//!
//! Lights are persistent and stay until explicitly cleared. Each frame the
//! render system folds them into the frame uniforms.

use glam::Vec3;
use crate::api::types::Color;

/// Uniform light applied to every surface regardless of orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

impl AmbientLight {
    pub fn new(color: Color, intensity: f32) -> Self {
        Self { color, intensity }
    }

    /// Color premultiplied by intensity.
    pub fn radiance(&self) -> [f32; 3] {
        self.color.scaled(self.intensity)
    }
}

/// Parallel light shining from `position` toward `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
    /// Point the light aims at (default: origin).
    pub target: Vec3,
}

impl DirectionalLight {
    /// Create a light above the scene (0, 1, 0) aimed at the origin.
    pub fn new(color: Color, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            position: Vec3::Y,
            target: Vec3::ZERO,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Unit vector from the surface toward the light.
    /// Falls back to +Y when position and target coincide.
    pub fn direction(&self) -> Vec3 {
        (self.position - self.target).try_normalize().unwrap_or(Vec3::Y)
    }

    /// Color premultiplied by intensity.
    pub fn radiance(&self) -> [f32; 3] {
        self.color.scaled(self.intensity)
    }
}

/// Manages the ambient term and the directional lights for the scene.
///
/// The ambient defaults to black at zero intensity, so an empty state leaves
/// everything unlit.
pub struct LightState {
    ambient: AmbientLight,
    directional: Vec<DirectionalLight>,
}

impl LightState {
    pub fn new() -> Self {
        Self {
            ambient: AmbientLight::new(Color::BLACK, 0.0),
            directional: Vec::new(),
        }
    }

    pub fn set_ambient(&mut self, ambient: AmbientLight) {
        self.ambient = ambient;
    }

    pub fn ambient(&self) -> AmbientLight {
        self.ambient
    }

    /// Add a directional light to the scene.
    pub fn add_directional(&mut self, light: DirectionalLight) {
        self.directional.push(light);
    }

    /// Iterate over directional lights in insertion order.
    pub fn directional(&self) -> impl Iterator<Item = &DirectionalLight> {
        self.directional.iter()
    }

    /// Remove all lights and reset the ambient term.
    pub fn clear(&mut self) {
        self.directional.clear();
        self.ambient = AmbientLight::new(Color::BLACK, 0.0);
    }

    /// Number of directional lights.
    pub fn count(&self) -> usize {
        self.directional.len()
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_points_from_target_to_light() {
        let light = DirectionalLight::new(Color::WHITE, 0.8).with_position(Vec3::new(5.0, 5.0, 5.0));
        let d = light.direction();
        let expected = Vec3::splat(1.0 / 3f32.sqrt());
        assert!((d - expected).length() < 1e-6);
    }

    #[test]
    fn degenerate_direction_falls_back_to_up() {
        let light = DirectionalLight::new(Color::WHITE, 1.0).with_position(Vec3::ZERO);
        assert_eq!(light.direction(), Vec3::Y);
    }

    #[test]
    fn radiance_scales_color() {
        let ambient = AmbientLight::new(Color::WHITE, 0.6);
        assert_eq!(ambient.radiance(), [0.6, 0.6, 0.6]);
        let light = DirectionalLight::new(Color::from_hex(0xff0000), 0.5);
        assert_eq!(light.radiance(), [0.5, 0.0, 0.0]);
    }

    #[test]
    fn light_state_add_and_clear() {
        let mut state = LightState::new();
        assert_eq!(state.count(), 0);
        assert_eq!(state.ambient().intensity, 0.0);

        state.set_ambient(AmbientLight::new(Color::WHITE, 0.6));
        state.add_directional(DirectionalLight::new(Color::WHITE, 0.8));
        assert_eq!(state.count(), 1);
        assert_eq!(state.ambient().intensity, 0.6);

        state.clear();
        assert_eq!(state.count(), 0);
        assert_eq!(state.ambient().intensity, 0.0);
    }
}
