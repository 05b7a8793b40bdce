use wgpu::Device;

use crate::{
    gfx::camera::camera_utils::CameraManager,
    math::Vec3f,
    mesh::Mesh,
};

use super::object::Object;

/// Main scene containing the loaded objects and the camera looking at them
pub struct Scene {
    pub camera_manager: CameraManager,
    pub objects: Vec<Object>,
}

impl Scene {
    pub fn new(camera_manager: CameraManager) -> Self {
        Self {
            camera_manager,
            objects: Vec::new(),
        }
    }

    /// Updates the scene (camera matrices, etc.)
    pub fn update(&mut self) {
        self.camera_manager.camera.update_view_proj();
    }

    /// Adds a mesh centered on the origin and frames the camera around it.
    pub fn add_mesh(&mut self, name: &str, mesh: Mesh) -> &mut Object {
        let radius = mesh.bounding_radius();
        log::debug!(
            "Adding '{}' ({} triangles, radius {:.3})",
            name,
            mesh.triangle_count(),
            radius
        );

        self.camera_manager.camera.frame(Vec3f::new(0.0, 0.0, 0.0), radius);
        self.objects.push(Object::centered(name, mesh));
        let index = self.objects.len() - 1;
        &mut self.objects[index]
    }

    /// Initializes GPU resources for all objects
    ///
    /// Must be called after the GPU context is available and before rendering.
    pub fn init_gpu_resources(&mut self, device: &Device, transform_layout: &wgpu::BindGroupLayout) {
        for object in self.objects.iter_mut() {
            object.init_gpu_resources(device, transform_layout);
        }
    }

    /// Syncs object transforms to the GPU
    pub fn update_all_transforms(&mut self, queue: &wgpu::Queue) {
        for object in &mut self.objects {
            object.update_transform(queue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        gfx::camera::{CameraController, OrbitCamera},
        mesh::{load_mesh_from_bytes, LoadOptions},
    };

    fn scene() -> Scene {
        let camera = OrbitCamera::new(2.0, 0.0, 0.0, Vec3f::new(0.0, 0.0, 0.0), 1.0);
        Scene::new(CameraManager::new(camera, CameraController::new(0.005, 0.1)))
    }

    #[test]
    fn test_add_mesh_frames_camera() {
        let mut scene = scene();
        let obj = b"v 10 0 0\nv 30 0 0\nv 30 20 0\nf 1 2 3\n";
        let mesh = load_mesh_from_bytes(obj, LoadOptions::default()).unwrap();
        let radius = mesh.bounding_radius();

        let object = scene.add_mesh("tri", mesh);
        assert_eq!(object.name, "tri");

        let camera = &scene.camera_manager.camera;
        assert_eq!(camera.target, Vec3f::new(0.0, 0.0, 0.0));
        assert!(camera.distance > radius);
        assert_eq!(scene.objects.len(), 1);
    }
}
