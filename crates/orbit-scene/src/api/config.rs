use serde::{Deserialize, Serialize};
use crate::api::error::SceneError;
use crate::api::types::Color;

/// Number of orbiting bodies. Fixed: colors and starting angles are assigned by index.
pub const SATELLITE_COUNT: usize = 3;

/// Full scene configuration. Every field has a default, so a partial JSON
/// document (or `{}`) is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Clear color behind the scene (default: #f8fafc).
    pub background: Color,
    pub camera: CameraConfig,
    pub lights: LightingConfig,
    /// The central sphere.
    pub core: CoreConfig,
    /// The orbiting cubes.
    pub satellites: SatelliteConfig,
    pub motion: MotionConfig,
    /// Fixed seed for the per-body speed/radius draws.
    /// `None` seeds from the host's entropy source.
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background: Color::from_hex(0xf8fafc),
            camera: CameraConfig::default(),
            lights: LightingConfig::default(),
            core: CoreConfig::default(),
            satellites: SatelliteConfig::default(),
            motion: MotionConfig::default(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees (default: 75).
    pub fov_degrees: f32,
    /// Near clip plane (default: 0.1).
    pub near: f32,
    /// Far clip plane (default: 1000).
    pub far: f32,
    /// Distance back along +Z from the origin (default: 5).
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            distance: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient_color: Color,
    /// Default: 0.6.
    pub ambient_intensity: f32,
    pub directional_color: Color,
    /// Default: 0.8.
    pub directional_intensity: f32,
    /// Light position; it shines toward the origin (default: [5, 5, 5]).
    pub directional_position: [f32; 3],
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_color: Color::WHITE,
            ambient_intensity: 0.6,
            directional_color: Color::WHITE,
            directional_intensity: 0.8,
            directional_position: [5.0, 5.0, 5.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub color: Color,
    /// Phong specular exponent (default: 100).
    pub shininess: f32,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            width_segments: 32,
            height_segments: 32,
            color: Color::from_hex(0x2563eb),
            shininess: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SatelliteConfig {
    /// Cube side length (default: 0.5).
    pub size: f32,
    /// Color per body index: amber, green, purple.
    pub colors: [Color; SATELLITE_COUNT],
    /// Default: 50.
    pub shininess: f32,
    /// `speed = speed_base + random() * speed_jitter`.
    pub speed_base: f64,
    pub speed_jitter: f64,
    /// `radius = radius_base + random() * radius_jitter`.
    pub radius_base: f64,
    pub radius_jitter: f64,
}

impl Default for SatelliteConfig {
    fn default() -> Self {
        Self {
            size: 0.5,
            colors: [
                Color::from_hex(0xf59e0b),
                Color::from_hex(0x10b981),
                Color::from_hex(0x8b5cf6),
            ],
            shininess: 50.0,
            speed_base: 0.5,
            speed_jitter: 0.5,
            radius_base: 2.0,
            radius_jitter: 0.5,
        }
    }
}

/// Per-frame increments, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Orbit group Y rotation per frame (default: 0.005).
    pub group_spin: f64,
    /// Orbital angle per frame, multiplied by each body's speed (default: 0.01).
    pub orbit_rate: f64,
    /// Local X and Y spin of each body per frame (default: 0.01).
    pub self_spin: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            group_spin: 0.005,
            orbit_rate: 0.01,
            self_spin: 0.01,
        }
    }
}

impl SceneConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the camera, geometry, or animation cannot work with.
    pub fn validate(&self) -> Result<(), SceneError> {
        let cam = &self.camera;
        ensure(cam.fov_degrees > 0.0 && cam.fov_degrees < 180.0, "camera.fov_degrees must be in (0, 180)")?;
        ensure(cam.near > 0.0, "camera.near must be positive")?;
        ensure(cam.far > cam.near, "camera.far must be greater than camera.near")?;
        ensure(cam.distance.is_finite(), "camera.distance must be finite")?;

        let lights = &self.lights;
        ensure(lights.ambient_intensity >= 0.0, "lights.ambient_intensity must not be negative")?;
        ensure(lights.directional_intensity >= 0.0, "lights.directional_intensity must not be negative")?;

        let core = &self.core;
        ensure(core.radius > 0.0, "core.radius must be positive")?;
        ensure(core.width_segments >= 3, "core.width_segments must be at least 3")?;
        ensure(core.height_segments >= 2, "core.height_segments must be at least 2")?;
        // u16 index buffer
        let vertices = (u64::from(core.width_segments) + 1).checked_mul(u64::from(core.height_segments) + 1);
        ensure(
            vertices.is_some_and(|n| n <= u64::from(u16::MAX)),
            "core segment counts exceed the vertex limit",
        )?;

        let sat = &self.satellites;
        ensure(sat.size > 0.0, "satellites.size must be positive")?;
        ensure(sat.speed_base > 0.0, "satellites.speed_base must be positive")?;
        ensure(sat.speed_jitter >= 0.0, "satellites.speed_jitter must not be negative")?;
        ensure(sat.radius_base > 0.0, "satellites.radius_base must be positive")?;
        ensure(sat.radius_jitter >= 0.0, "satellites.radius_jitter must not be negative")?;

        let motion = &self.motion;
        ensure(
            motion.group_spin.is_finite() && motion.orbit_rate.is_finite() && motion.self_spin.is_finite(),
            "motion rates must be finite",
        )?;
        Ok(())
    }
}

fn ensure(condition: bool, message: &str) -> Result<(), SceneError> {
    if condition {
        Ok(())
    } else {
        Err(SceneError::Config(message.to_string()))
    }
}
