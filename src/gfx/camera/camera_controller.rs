use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, MouseButton, MouseScrollDelta},
    keyboard::KeyCode,
};

use super::orbit_camera::OrbitCamera;

/// Pixel-precise scroll deltas are divided by this to match one wheel line.
const PIXELS_PER_LINE: f32 = 40.0;

/// Turns raw mouse and keyboard input into orbit camera motion.
///
/// Left drag orbits, shift + left drag pans, the wheel zooms and shift + C
/// restores the framed pose.
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    is_shift_held: bool,
    is_mouse_pressed: bool,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed: 0.0015,
            is_shift_held: false,
            is_mouse_pressed: false,
        }
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.is_mouse_pressed = state == ElementState::Pressed;
        }
    }

    /// Returns true when the camera moved.
    pub fn process_events(&mut self, event: &DeviceEvent, camera: &mut OrbitCamera) -> bool {
        match event {
            DeviceEvent::MouseWheel { delta } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32 / PIXELS_PER_LINE
                    }
                };
                camera.add_distance(scroll_amount * self.zoom_speed);
                true
            }
            DeviceEvent::MouseMotion { delta } if self.is_mouse_pressed => {
                let (dx, dy) = (delta.0 as f32, delta.1 as f32);
                if self.is_shift_held {
                    camera.pan((-dx * self.pan_speed, dy * self.pan_speed));
                } else {
                    camera.add_yaw(-dx * self.rotate_speed);
                    camera.add_pitch(dy * self.rotate_speed);
                }
                true
            }
            _ => false,
        }
    }

    /// Returns true when the camera moved.
    pub fn process_key(
        &mut self,
        key: KeyCode,
        state: ElementState,
        camera: &mut OrbitCamera,
    ) -> bool {
        match (key, state) {
            (KeyCode::ShiftLeft | KeyCode::ShiftRight, state) => {
                let was_shift_held = self.is_shift_held;
                self.is_shift_held = state == ElementState::Pressed;
                if was_shift_held != self.is_shift_held {
                    log::trace!("Shift state changed: {}", self.is_shift_held);
                }
                false
            }
            (KeyCode::KeyC, ElementState::Pressed) if self.is_shift_held => {
                log::debug!("Resetting camera to its framed position");
                camera.reset_to_default();
                true
            }
            _ => false,
        }
    }

    /// Returns true if currently panning
    pub fn is_panning(&self) -> bool {
        self.is_mouse_pressed && self.is_shift_held
    }

    /// Returns true if currently rotating
    pub fn is_rotating(&self) -> bool {
        self.is_mouse_pressed && !self.is_shift_held
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Approx, Vec3f};

    fn setup() -> (CameraController, OrbitCamera) {
        let camera = OrbitCamera::new(5.0, 0.0, 0.0, Vec3f::new(0.0, 0.0, 0.0), 1.0);
        (CameraController::new(0.01, 0.1), camera)
    }

    fn motion(dx: f64, dy: f64) -> DeviceEvent {
        DeviceEvent::MouseMotion { delta: (dx, dy) }
    }

    #[test]
    fn test_motion_without_button_is_ignored() {
        let (mut controller, mut camera) = setup();
        assert!(!controller.process_events(&motion(10.0, 10.0), &mut camera));
        assert_eq!(camera.yaw, 0.0);
        assert_eq!(camera.pitch, 0.0);
    }

    #[test]
    fn test_drag_orbits() {
        let (mut controller, mut camera) = setup();
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(controller.is_rotating());

        assert!(controller.process_events(&motion(10.0, 5.0), &mut camera));
        assert!(camera.yaw.approx_eq(&-0.1, 1e-6));
        assert!(camera.pitch.approx_eq(&0.05, 1e-6));

        controller.process_mouse_button(MouseButton::Left, ElementState::Released);
        assert!(!controller.process_events(&motion(10.0, 5.0), &mut camera));
    }

    #[test]
    fn test_shift_drag_pans() {
        let (mut controller, mut camera) = setup();
        controller.process_key(KeyCode::ShiftLeft, ElementState::Pressed, &mut camera);
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(controller.is_panning());

        controller.process_events(&motion(100.0, 0.0), &mut camera);
        assert_eq!(camera.yaw, 0.0);
        // Dragging right moves the target to the camera's left.
        assert!(camera.target.x < 0.0);
        assert!(camera.target.y.approx_zero(1e-6));
    }

    #[test]
    fn test_wheel_zooms() {
        let (mut controller, mut camera) = setup();
        let wheel_in = DeviceEvent::MouseWheel {
            delta: MouseScrollDelta::LineDelta(0.0, 1.0),
        };
        assert!(controller.process_events(&wheel_in, &mut camera));
        assert!(camera.distance.approx_eq(&4.5, 1e-6));

        let wheel_out = DeviceEvent::MouseWheel {
            delta: MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -80.0)),
        };
        controller.process_events(&wheel_out, &mut camera);
        assert!(camera.distance.approx_eq(&5.4, 1e-5));
    }

    #[test]
    fn test_shift_c_resets() {
        let (mut controller, mut camera) = setup();
        camera.add_yaw(1.0);

        assert!(!controller.process_key(KeyCode::KeyC, ElementState::Pressed, &mut camera));
        assert_eq!(camera.yaw, 1.0);

        controller.process_key(KeyCode::ShiftRight, ElementState::Pressed, &mut camera);
        assert!(controller.process_key(KeyCode::KeyC, ElementState::Pressed, &mut camera));
        assert_eq!(camera.yaw, 0.0);
    }
}
