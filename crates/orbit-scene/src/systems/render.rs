use crate::components::node::NodeKind;
use crate::core::scene::Scene;
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::instance::{FrameUniforms, MeshInstance, RenderBuffer, RenderItem, MAX_DIRECTIONAL_LIGHTS};

/// Build the render buffer for one frame.
/// Walks the scene graph parent-first, composing world transforms, and emits one
/// item per visible mesh in traversal order. Lights beyond
/// `MAX_DIRECTIONAL_LIGHTS` are dropped.
pub fn build_render_buffer(scene: &Scene, camera: &PerspectiveCamera, buffer: &mut RenderBuffer) {
    buffer.clear();
    buffer.uniforms = frame_uniforms(scene, camera);

    scene.visit_visible(|node, world| {
        let mesh = match &node.kind {
            NodeKind::Mesh(mesh) => mesh,
            NodeKind::Group => return,
        };

        buffer.push(RenderItem {
            geometry: mesh.geometry,
            instance: MeshInstance {
                model: world.to_cols_array_2d(),
                normal_matrix: world.inverse().transpose().to_cols_array_2d(),
                color: mesh.material.color.to_rgb(),
                shininess: mesh.material.shininess,
            },
        });
    });
}

fn frame_uniforms(scene: &Scene, camera: &PerspectiveCamera) -> FrameUniforms {
    let cam = camera.uniform();
    let mut uniforms = FrameUniforms {
        view_projection: cam.view_projection,
        camera_position: [cam.position[0], cam.position[1], cam.position[2]],
        background: scene.background.to_rgb(),
        ambient: scene.lights.ambient().radiance(),
        ..FrameUniforms::default()
    };

    let mut count = 0;
    for (slot, light) in scene.lights.directional().take(MAX_DIRECTIONAL_LIGHTS).enumerate() {
        uniforms.light_directions[slot] = light.direction().to_array();
        uniforms.light_colors[slot] = light.radiance();
        count += 1;
    }
    if scene.lights.count() > MAX_DIRECTIONAL_LIGHTS {
        log::warn!(
            "scene has {} directional lights, only the first {} are used",
            scene.lights.count(),
            MAX_DIRECTIONAL_LIGHTS
        );
    }
    uniforms.light_count = count;
    uniforms
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec3};
    use crate::api::types::Color;
    use crate::components::mesh::{Geometry, MeshComponent, PhongMaterial};
    use crate::components::node::Node;
    use crate::systems::lighting::{AmbientLight, DirectionalLight};

    fn cube(color: u32) -> MeshComponent {
        MeshComponent::new(Geometry::cube(0.5), PhongMaterial::new(Color::from_hex(color)))
    }

    #[test]
    fn groups_are_not_drawn() {
        let mut scene = Scene::default();
        let group = scene.next_id();
        scene.add(Node::group(group));
        let a = scene.next_id();
        scene.add_child(group, Node::mesh(a, cube(0xff0000)));
        let b = scene.next_id();
        scene.add_child(group, Node::mesh(b, cube(0x00ff00)));

        let camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 100.0);
        let mut buffer = RenderBuffer::new();
        build_render_buffer(&scene, &camera, &mut buffer);

        assert_eq!(buffer.item_count(), 2);
        assert_eq!(buffer.items[0].instance.color, [1.0, 0.0, 0.0]);
        assert_eq!(buffer.items[1].instance.color, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn model_matrix_includes_parent_transform() {
        let mut scene = Scene::default();
        let group = scene.next_id();
        scene.add(Node::group(group).with_position(Vec3::new(0.0, 1.0, 0.0)));
        let child = scene.next_id();
        scene.add_child(group, Node::mesh(child, cube(0xffffff)).with_position(Vec3::new(2.0, 0.0, 0.0)));

        let camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 100.0);
        let mut buffer = RenderBuffer::new();
        build_render_buffer(&scene, &camera, &mut buffer);

        let model = Mat4::from_cols_array_2d(&buffer.items[0].instance.model);
        let origin = model.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(2.0, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn rebuild_replaces_previous_frame() {
        let mut scene = Scene::default();
        let id = scene.next_id();
        scene.add(Node::mesh(id, cube(0xffffff)));
        let camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 100.0);
        let mut buffer = RenderBuffer::new();
        build_render_buffer(&scene, &camera, &mut buffer);
        build_render_buffer(&scene, &camera, &mut buffer);
        assert_eq!(buffer.item_count(), 1);
    }

    #[test]
    fn uniforms_carry_lights_and_camera() {
        let mut scene = Scene::new(Color::from_hex(0xf8fafc));
        scene.lights.set_ambient(AmbientLight::new(Color::WHITE, 0.6));
        scene.lights.add_directional(
            DirectionalLight::new(Color::WHITE, 0.8).with_position(Vec3::new(5.0, 5.0, 5.0)),
        );
        let camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 100.0).with_position(Vec3::new(0.0, 0.0, 5.0));

        let mut buffer = RenderBuffer::new();
        build_render_buffer(&scene, &camera, &mut buffer);
        let u = &buffer.uniforms;

        assert_eq!(u.light_count, 1);
        assert_eq!(u.ambient, [0.6, 0.6, 0.6]);
        assert_eq!(u.light_colors[0], [0.8, 0.8, 0.8]);
        assert!((Vec3::from_array(u.light_directions[0]).length() - 1.0).abs() < 1e-6);
        assert_eq!(u.camera_position, [0.0, 0.0, 5.0]);
        assert_eq!(u.background, scene.background.to_rgb());
    }

    #[test]
    fn excess_lights_are_dropped() {
        let mut scene = Scene::default();
        for _ in 0..MAX_DIRECTIONAL_LIGHTS + 2 {
            scene.lights.add_directional(DirectionalLight::new(Color::WHITE, 0.1));
        }
        let camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 100.0);
        let mut buffer = RenderBuffer::new();
        build_render_buffer(&scene, &camera, &mut buffer);
        assert_eq!(buffer.uniforms.light_count as usize, MAX_DIRECTIONAL_LIGHTS);
    }
}
