//! Animation system: spins the orbit group and moves its satellites.

use crate::api::config::{MotionConfig, SATELLITE_COUNT};
use crate::api::types::NodeId;
use crate::components::orbit::{wrap_angle, Satellite};
use crate::core::scene::Scene;

/// Handles to the animated part of the scene plus the state that drives it.
#[derive(Debug, Clone)]
pub struct OrbitRig {
    pub group: NodeId,
    /// Central body. Never moves on its own; it turns with the group.
    pub core: NodeId,
    /// Accumulated group Y rotation, in [0, 2π).
    pub group_rotation: f64,
    pub satellites: [Satellite; SATELLITE_COUNT],
}

impl OrbitRig {
    /// Advance one frame and write the new transforms into the scene.
    ///
    /// Satellites are independent of each other, so their order does not matter.
    pub fn step(&mut self, scene: &mut Scene, motion: &MotionConfig) {
        self.group_rotation = wrap_angle(self.group_rotation + motion.group_spin);
        if let Some(group) = scene.get_mut(self.group) {
            group.rotation.y = self.group_rotation as f32;
        }

        for satellite in &mut self.satellites {
            satellite.advance(motion.orbit_rate, motion.self_spin);
            sync_satellite(scene, satellite);
        }
    }

    /// Write every satellite's current state into its node.
    pub fn sync(&self, scene: &mut Scene) {
        for satellite in &self.satellites {
            sync_satellite(scene, satellite);
        }
    }
}

/// Place a satellite's node on its orbit (XZ plane) and apply its local spin.
pub fn sync_satellite(scene: &mut Scene, satellite: &Satellite) {
    let Some(node) = scene.get_mut(satellite.node) else {
        return;
    };
    let (x, z) = satellite.orbit.position();
    node.position.x = x as f32;
    node.position.z = z as f32;
    node.rotation.x = satellite.spin as f32;
    node.rotation.y = satellite.spin as f32;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::node::Node;
    use crate::components::orbit::OrbitState;
    use std::f64::consts::TAU;

    fn rig(scene: &mut Scene) -> OrbitRig {
        let group = scene.next_id();
        scene.add(Node::group(group));
        let core = scene.next_id();
        scene.add_child(group, Node::group(core));
        let satellites = std::array::from_fn(|i| {
            let id = scene.next_id();
            scene.add_child(group, Node::group(id));
            let angle = TAU * i as f64 / SATELLITE_COUNT as f64;
            Satellite::new(id, OrbitState::new(angle, 0.5 + 0.1 * i as f64, 2.0 + 0.1 * i as f64))
        });
        OrbitRig {
            group,
            core,
            group_rotation: 0.0,
            satellites,
        }
    }

    #[test]
    fn step_rotates_group() {
        let mut scene = Scene::default();
        let mut rig = rig(&mut scene);
        let motion = MotionConfig::default();
        for _ in 0..4 {
            rig.step(&mut scene, &motion);
        }
        assert!((rig.group_rotation - 0.02).abs() < 1e-12);
        let group = scene.get(rig.group).unwrap();
        assert!((group.rotation.y - 0.02).abs() < 1e-6);
        assert_eq!(group.rotation.x, 0.0);
    }

    #[test]
    fn step_keeps_satellites_on_their_circles() {
        let mut scene = Scene::default();
        let mut rig = rig(&mut scene);
        let motion = MotionConfig::default();
        for _ in 0..100 {
            rig.step(&mut scene, &motion);
            for sat in &rig.satellites {
                let node = scene.get(sat.node).unwrap();
                let (x, z) = sat.orbit.position();
                assert!((node.position.x as f64 - x).abs() < 1e-6);
                assert!((node.position.z as f64 - z).abs() < 1e-6);
                assert_eq!(node.position.y, 0.0);
                assert_eq!(node.rotation.x, node.rotation.y);
            }
        }
    }

    #[test]
    fn core_is_left_alone() {
        let mut scene = Scene::default();
        let mut rig = rig(&mut scene);
        rig.step(&mut scene, &MotionConfig::default());
        let core = scene.get(rig.core).unwrap();
        assert_eq!(core.position, glam::Vec3::ZERO);
        assert_eq!(core.rotation, glam::Vec3::ZERO);
    }

    #[test]
    fn sync_places_satellites_without_advancing() {
        let mut scene = Scene::default();
        let rig = rig(&mut scene);
        rig.sync(&mut scene);
        let second = scene.get(rig.satellites[1].node).unwrap();
        let expected = rig.satellites[1].orbit.position();
        assert!((second.position.x as f64 - expected.0).abs() < 1e-6);
        assert!((second.position.z as f64 - expected.1).abs() < 1e-6);
        assert_eq!(second.rotation, glam::Vec3::ZERO);
    }
}
