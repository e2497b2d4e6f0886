use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Perspective camera looking down -Z from `position`.
/// Produces a GL-convention projection (clip Z in [-1, 1]).
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Camera position in world space.
    pub position: Vec3,
    projection: Mat4,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_projection: [[f32; 4]; 4],
    pub position: [f32; 4],
}

/// `width / height`, or `None` when the height is zero.
pub fn aspect_ratio(width: u32, height: u32) -> Option<f32> {
    (height > 0).then(|| width as f32 / height as f32)
}

impl PerspectiveCamera {
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov_degrees,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set the aspect ratio from viewport dimensions.
    /// A zero-height viewport leaves the aspect unchanged and returns false.
    pub fn set_aspect(&mut self, width: u32, height: u32) -> bool {
        match aspect_ratio(width, height) {
            Some(aspect) => {
                self.aspect = aspect;
                true
            }
            None => false,
        }
    }

    /// Recompute the projection matrix after changing fov, aspect or clip planes.
    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh_gl(self.fov_degrees.to_radians(), self.aspect, self.near, self.far);
    }

    /// Projection matrix as of the last `update_projection_matrix` call.
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// World-to-view transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(-self.position)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_projection: self.view_projection().to_cols_array_2d(),
            position: self.position.extend(1.0).to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratio_guards_zero_height() {
        assert_eq!(aspect_ratio(800, 400), Some(2.0));
        assert_eq!(aspect_ratio(800, 0), None);
    }

    #[test]
    fn set_aspect_needs_explicit_update() {
        let mut cam = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);
        let before = cam.projection_matrix();
        assert!(cam.set_aspect(1920, 1080));
        assert_eq!(cam.projection_matrix(), before);
        cam.update_projection_matrix();
        assert_ne!(cam.projection_matrix(), before);
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn zero_height_keeps_aspect() {
        let mut cam = PerspectiveCamera::new(75.0, 1.5, 0.1, 1000.0);
        assert!(!cam.set_aspect(640, 0));
        assert_eq!(cam.aspect, 1.5);
    }

    #[test]
    fn origin_projects_to_center() {
        let cam = PerspectiveCamera::new(75.0, 16.0 / 9.0, 0.1, 1000.0)
            .with_position(Vec3::new(0.0, 0.0, 5.0));
        let clip = cam.view_projection() * Vec3::ZERO.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
    }

    #[test]
    fn fov_edge_maps_to_ndc_edge() {
        let cam = PerspectiveCamera::new(90.0, 1.0, 0.1, 100.0);
        // At distance 1 a 90° vertical fov spans y in [-1, 1].
        let clip = cam.projection_matrix() * glam::Vec4::new(0.0, 1.0, -1.0, 1.0);
        assert!((clip.y / clip.w - 1.0).abs() < 1e-5);
    }

    #[test]
    fn wider_aspect_shrinks_horizontal_scale() {
        let narrow = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);
        let wide = PerspectiveCamera::new(75.0, 2.0, 0.1, 1000.0);
        let sx = |c: &PerspectiveCamera| c.projection_matrix().x_axis.x;
        assert!((sx(&narrow) / sx(&wide) - 2.0).abs() < 1e-5);
    }
}
