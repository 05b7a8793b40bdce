use cgmath::SquareMatrix;
use winit::{
    event::{DeviceEvent, ElementState, MouseButton},
    keyboard::KeyCode,
};

use super::{camera_controller::CameraController, orbit_camera::OrbitCamera};
use crate::math::{Mat4f, Vec3f};

pub struct CameraManager {
    pub camera: OrbitCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: OrbitCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    /// Returns true when the camera moved.
    pub fn process_event(&mut self, event: &DeviceEvent) -> bool {
        self.controller.process_events(event, &mut self.camera)
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.controller.process_mouse_button(button, state);
    }

    /// Returns true when the camera moved.
    pub fn process_keyboard_event(&mut self, key: KeyCode, state: ElementState) -> bool {
        self.controller.process_key(key, state, &mut self.camera)
    }
}

pub trait Camera: Sized {
    fn build_view_projection_matrix(&self) -> Mat4f;
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(eye: Vec3f, view_proj: Mat4f) -> Self {
        Self {
            view_position: eye.extend(1.0).into(),
            view_proj: view_proj.into(),
        }
    }
}

impl Default for CameraUniform {
    /// Creates a default [CameraUniform].
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: Mat4f::identity().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_layout() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 80);
    }

    #[test]
    fn test_uniform_matrix_is_column_major() {
        let m = Mat4f::from_translation(Vec3f::new(1.0, 2.0, 3.0));
        let uniform = CameraUniform::new(Vec3f::new(4.0, 5.0, 6.0), m);

        assert_eq!(uniform.view_position, [4.0, 5.0, 6.0, 1.0]);
        assert_eq!(uniform.view_proj[3], [1.0, 2.0, 3.0, 1.0]);
    }
}
