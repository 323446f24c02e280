/*
 * Scene Module
 *
 * The scene composer owns everything drawable about a fish: one clone of the
 * mesh per fish, keyed by fish id, plus the orthographic projection. The
 * simulation never touches these handles directly; it produces transforms
 * and the frame driver writes them in through this interface.
 */

use std::collections::BTreeMap;

use glam::{Mat4, Quat, Vec3};

use crate::asset::MeshAsset;
use crate::camera::{Projection, Viewport};
use crate::fish::{FishColor, FishId, FishTransform};

/// The write path from the simulation into a renderable scene.
pub trait SceneComposer {
    /// Clone the mesh for one fish. Called once per fish, when the flock is created.
    fn instantiate(&mut self, id: FishId, color: FishColor, mesh: &MeshAsset);

    /// Move and turn the clone bound to `transform.id`. Unknown ids are ignored.
    fn set_transform(&mut self, transform: FishTransform);

    fn set_projection(&mut self, projection: Projection);

    fn projection(&self) -> Projection;

    /// Drop every clone. Safe to call more than once.
    fn release(&mut self);
}

// One fish worth of mesh, ready to draw
#[derive(Debug, Clone)]
pub struct MeshInstance {
    pub color: FishColor,
    pub vertices: Vec<Vec3>,
    pub indices: Vec<usize>,
    pub scale: f32,
    pub position: Vec3,
    pub orientation: Quat,
}

impl MeshInstance {
    fn from_asset(mesh: &MeshAsset, color: FishColor, scale: f32) -> Self {
        Self {
            color,
            vertices: mesh.vertices.iter().map(|&v| Vec3::from_array(v)).collect(),
            indices: mesh.indices.clone(),
            scale: mesh.scale * scale,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.orientation, self.position)
    }
}

/// Mesh instances and camera state for the nannou renderer.
#[derive(Debug)]
pub struct MeshScene {
    instances: BTreeMap<FishId, MeshInstance>,
    projection: Projection,
    fish_scale: f32,
}

impl MeshScene {
    pub fn new(viewport: Viewport, fish_scale: f32) -> Self {
        Self {
            instances: BTreeMap::new(),
            projection: Projection::for_viewport(viewport),
            fish_scale,
        }
    }

    pub fn instances(&self) -> impl Iterator<Item = (&FishId, &MeshInstance)> {
        self.instances.iter()
    }

    pub fn instance(&self, id: FishId) -> Option<&MeshInstance> {
        self.instances.get(&id)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl SceneComposer for MeshScene {
    fn instantiate(&mut self, id: FishId, color: FishColor, mesh: &MeshAsset) {
        let scale = self.fish_scale;
        self.instances
            .entry(id)
            .or_insert_with(|| MeshInstance::from_asset(mesh, color, scale));
    }

    fn set_transform(&mut self, transform: FishTransform) {
        if let Some(instance) = self.instances.get_mut(&transform.id) {
            instance.position = transform.position;
            instance.orientation = transform.orientation;
        }
    }

    fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
    }

    fn projection(&self) -> Projection {
        self.projection
    }

    fn release(&mut self) {
        self.instances.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fish::PALETTE;

    fn mesh() -> MeshAsset {
        MeshAsset {
            vertices: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            indices: vec![0, 1, 2],
            scale: 2.0,
        }
    }

    #[test]
    fn instantiate_is_once_per_id() {
        let mut scene = MeshScene::new(Viewport::new(100.0, 100.0), 1.0);
        scene.instantiate(FishId(0), PALETTE[0], &mesh());
        scene.instantiate(FishId(0), PALETTE[1], &mesh());
        scene.instantiate(FishId(1), PALETTE[2], &mesh());

        assert_eq!(scene.len(), 2);
        assert_eq!(scene.instance(FishId(0)).map(|i| i.color), Some(PALETTE[0]));
    }

    #[test]
    fn transforms_land_on_the_matching_instance() {
        let mut scene = MeshScene::new(Viewport::new(100.0, 100.0), 1.5);
        scene.instantiate(FishId(4), PALETTE[0], &mesh());

        let transform = FishTransform {
            id: FishId(4),
            position: Vec3::new(1.0, 2.0, 3.0),
            orientation: Quat::from_rotation_z(0.5),
        };
        scene.set_transform(transform);
        scene.set_transform(FishTransform {
            id: FishId(99),
            ..transform
        });

        let instance = scene.instance(FishId(4)).expect("instance exists");
        assert_eq!(instance.position, transform.position);
        assert_eq!(instance.orientation, transform.orientation);
        assert_eq!(instance.scale, 3.0);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn release_is_idempotent() {
        let mut scene = MeshScene::new(Viewport::new(100.0, 100.0), 1.0);
        scene.instantiate(FishId(0), PALETTE[0], &mesh());
        scene.release();
        scene.release();
        assert!(scene.is_empty());
    }
}
