use std::f64::consts::TAU;
use glam::Vec3;
use crate::api::config::{SceneConfig, SATELLITE_COUNT};
use crate::api::error::SceneError;
use crate::api::host::{Container, RandomSource};
use crate::api::types::NodeId;
use crate::components::mesh::{Geometry, MeshComponent, PhongMaterial};
use crate::components::node::Node;
use crate::components::orbit::{OrbitState, Satellite};
use crate::core::frame_loop::FrameLoop;
use crate::core::scene::Scene;
use crate::renderer::camera::{aspect_ratio, PerspectiveCamera};
use crate::renderer::traits::{Renderer, RendererOptions};
use crate::systems::animation::OrbitRig;
use crate::systems::lighting::{AmbientLight, DirectionalLight};

/// The tech-orbit scene: a sphere orbited by three spinning cubes.
///
/// Owns everything the frame loop and the resize handler touch. Built once by
/// [`TechOrbit::init`], advanced by [`TechOrbit::tick`], torn down by
/// [`TechOrbit::dispose`].
pub struct TechOrbit<R: Renderer> {
    config: SceneConfig,
    scene: Scene,
    camera: PerspectiveCamera,
    renderer: R,
    rig: OrbitRig,
    frame_loop: FrameLoop,
}

impl<R: Renderer> TechOrbit<R> {
    /// Build the scene inside `container` and start the frame loop.
    ///
    /// With no container nothing is constructed (the renderer factory is not
    /// called, `rng` is not drawn from) and `Ok(None)` is returned.
    /// `create_renderer` receives the container so it can mount its output there.
    pub fn init<C, F>(
        container: Option<&C>,
        config: SceneConfig,
        rng: &mut dyn RandomSource,
        create_renderer: F,
    ) -> Result<Option<Self>, SceneError>
    where
        C: Container + ?Sized,
        F: FnOnce(&C, &RendererOptions) -> Result<R, SceneError>,
    {
        let Some(container) = container else {
            log::debug!("no container, scene not created");
            return Ok(None);
        };
        config.validate()?;

        let mut scene = Scene::new(config.background);
        let lights = &config.lights;
        scene
            .lights
            .set_ambient(AmbientLight::new(lights.ambient_color, lights.ambient_intensity));
        scene.lights.add_directional(
            DirectionalLight::new(lights.directional_color, lights.directional_intensity)
                .with_position(Vec3::from_array(lights.directional_position)),
        );

        let cam = &config.camera;
        let aspect = aspect_ratio(container.client_width(), container.client_height()).unwrap_or(1.0);
        let camera = PerspectiveCamera::new(cam.fov_degrees, aspect, cam.near, cam.far)
            .with_position(Vec3::new(0.0, 0.0, cam.distance));

        let renderer = create_renderer(container, &RendererOptions::default())?;
        let rig = build_orbit_group(&mut scene, &config, rng);
        rig.sync(&mut scene);

        let mut orbit = Self {
            config,
            scene,
            camera,
            renderer,
            rig,
            frame_loop: FrameLoop::new(),
        };
        orbit.resize(container);
        orbit.frame_loop.start();

        log::info!(
            "tech-orbit: {} nodes on {} at {}x{}",
            orbit.scene.len(),
            orbit.renderer.backend(),
            container.client_width(),
            container.client_height()
        );
        for (i, sat) in orbit.rig.satellites.iter().enumerate() {
            log::debug!(
                "satellite {i}: speed {:.3}, radius {:.3}",
                sat.orbit.speed,
                sat.orbit.radius
            );
        }
        Ok(Some(orbit))
    }

    /// Advance the animation by one frame without drawing.
    pub fn update(&mut self) {
        self.rig.step(&mut self.scene, &self.config.motion);
    }

    /// Draw the current state.
    pub fn render(&mut self) -> Result<(), SceneError> {
        self.renderer.render(&self.scene, &self.camera)
    }

    /// One frame: update then render. Returns `Ok(false)` without doing
    /// anything when the loop is not running. A render failure stops the loop.
    pub fn tick(&mut self) -> Result<bool, SceneError> {
        if !self.frame_loop.begin_frame() {
            return Ok(false);
        }
        self.update();
        if let Err(err) = self.render() {
            self.frame_loop.stop();
            return Err(err);
        }
        Ok(true)
    }

    /// Match the camera and the drawing surface to the container's current size.
    pub fn resize<C: Container + ?Sized>(&mut self, container: &C) {
        let (width, height) = (container.client_width(), container.client_height());
        if !self.camera.set_aspect(width, height) {
            log::debug!("container height is 0, keeping aspect {}", self.camera.aspect);
        }
        self.camera.update_projection_matrix();
        self.renderer.set_pixel_ratio(container.device_pixel_ratio());
        self.renderer.set_size(width, height);
    }

    /// Resume after [`stop`](Self::stop). Frame count carries over.
    pub fn start(&mut self) {
        self.frame_loop.start();
    }

    /// Halt the loop; further `tick` calls are no-ops.
    pub fn stop(&mut self) {
        self.frame_loop.stop();
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    /// Frames advanced since init.
    pub fn frame_count(&self) -> u64 {
        self.frame_loop.frames()
    }

    /// Stop the loop and release the renderer's resources.
    /// Returns the released renderer.
    pub fn dispose(mut self) -> R {
        self.frame_loop.stop();
        self.renderer.dispose();
        log::debug!("tech-orbit disposed after {} frames", self.frame_loop.frames());
        self.renderer
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn satellites(&self) -> &[Satellite] {
        &self.rig.satellites
    }

    /// Accumulated Y rotation of the orbit group, in [0, 2π).
    pub fn group_rotation(&self) -> f64 {
        self.rig.group_rotation
    }

    pub fn group(&self) -> NodeId {
        self.rig.group
    }

    pub fn core(&self) -> NodeId {
        self.rig.core
    }
}

/// Add the orbit group with its core sphere and satellite cubes to the scene.
/// Each cube draws its speed then its radius; cubes are seeded in index order.
fn build_orbit_group(scene: &mut Scene, config: &SceneConfig, rng: &mut dyn RandomSource) -> OrbitRig {
    let group = scene.next_id();
    scene.add(Node::group(group).with_tag("orbit-group"));

    let core_cfg = &config.core;
    let core = scene.next_id();
    let core_mesh = MeshComponent::new(
        Geometry::sphere(core_cfg.radius, core_cfg.width_segments, core_cfg.height_segments),
        PhongMaterial::new(core_cfg.color).with_shininess(core_cfg.shininess),
    );
    scene.add_child(group, Node::mesh(core, core_mesh).with_tag("core"));

    let sat_cfg = &config.satellites;
    let satellites = std::array::from_fn(|i| {
        let speed = sat_cfg.speed_base + rng.next_f64() * sat_cfg.speed_jitter;
        let radius = sat_cfg.radius_base + rng.next_f64() * sat_cfg.radius_jitter;
        let angle = TAU * i as f64 / SATELLITE_COUNT as f64;

        let id = scene.next_id();
        let mesh = MeshComponent::new(
            Geometry::cube(sat_cfg.size),
            PhongMaterial::new(sat_cfg.colors[i]).with_shininess(sat_cfg.shininess),
        );
        scene.add_child(group, Node::mesh(id, mesh).with_tag(format!("satellite-{i}")));
        Satellite::new(id, OrbitState::new(angle, speed, radius))
    });

    OrbitRig {
        group,
        core,
        group_rotation: 0.0,
        satellites,
    }
}
