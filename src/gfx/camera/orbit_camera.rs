use cgmath::{InnerSpace, Rad, SquareMatrix};

use super::camera_utils::{Camera, CameraUniform};
use crate::math::{inverted, look_at, perspective, Mat4f, Vec3f};

/// Framing distance multiplier that leaves a border around the model.
const FRAME_MARGIN: f32 = 1.15;

#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub eye: Vec3f,
    pub target: Vec3f,
    pub up: Vec3f,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
    home: OrbitPose,
}

/// The part of the camera state restored by [`OrbitCamera::reset_to_default`].
#[derive(Debug, Clone, Copy)]
struct OrbitPose {
    distance: f32,
    pitch: f32,
    yaw: f32,
    target: Vec3f,
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Mat4f {
        let projection = perspective(self.fovy, self.aspect, self.znear, self.zfar);
        projection * self.view_matrix()
    }
}

impl OrbitCamera {
    pub fn new(distance: f32, pitch: f32, yaw: f32, target: Vec3f, aspect: f32) -> Self {
        let mut camera = Self {
            distance,
            pitch,
            yaw,
            eye: Vec3f::new(0.0, 0.0, 0.0), // Will be auto-calculated in `update()` nevertheless.
            target,
            up: Vec3f::unit_y(),
            bounds: OrbitCameraBounds::default(),
            aspect,
            fovy: Rad(std::f32::consts::FRAC_PI_4),
            znear: 0.1,
            zfar: 1000.0,
            uniform: CameraUniform::default(),
            home: OrbitPose {
                distance,
                pitch,
                yaw,
                target,
            },
        };
        camera.update();
        camera
    }

    /// Points the camera at a sphere and moves back until it fits the view.
    ///
    /// Clip planes and zoom bounds are scaled to the sphere, and the resulting
    /// pose becomes the one restored by [`reset_to_default`](Self::reset_to_default).
    pub fn frame(&mut self, center: Vec3f, radius: f32) {
        let radius = radius.max(1e-3);
        let half_fov_y = self.fovy.0 * 0.5;
        let half_fov_x = (half_fov_y.tan() * self.aspect).atan();
        let half_fov = half_fov_y.min(half_fov_x);
        let distance = radius / half_fov.sin() * FRAME_MARGIN;

        self.bounds.min_distance = Some(radius * 0.05);
        self.bounds.max_distance = Some(distance * 20.0);
        self.znear = radius * 0.01;
        self.zfar = distance * 20.0 + radius * 2.0;

        self.target = center;
        self.distance = distance;
        self.home = OrbitPose {
            distance,
            pitch: self.pitch,
            yaw: self.yaw,
            target: center,
        };
        self.update();
        log::debug!(
            "Camera framed on {:?} (radius {:.3}) at distance {:.3}",
            center,
            radius,
            distance
        );
    }

    pub fn reset_to_default(&mut self) {
        self.distance = self.home.distance;
        self.pitch = self.home.pitch;
        self.yaw = self.home.yaw;
        self.target = self.home.target;

        self.update(); // Recalculate eye position
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(
            self.bounds.min_distance.unwrap_or(f32::EPSILON),
            self.bounds.max_distance.unwrap_or(f32::MAX),
        );
        self.update();
    }

    /// Zooms by a fraction of the current distance, so steps feel the same at every scale.
    pub fn add_distance(&mut self, delta: f32) {
        let factor = (1.0 + delta).max(0.1);
        self.set_distance(self.distance * factor);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.update();
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        let mut bounded_yaw = yaw;
        if let Some(min_yaw) = self.bounds.min_yaw {
            bounded_yaw = bounded_yaw.max(min_yaw);
        }
        if let Some(max_yaw) = self.bounds.max_yaw {
            bounded_yaw = bounded_yaw.min(max_yaw);
        }
        self.yaw = bounded_yaw;
        self.update();
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw + delta);
    }

    /// Pans the camera relative to the current view direction
    /// delta.0 = horizontal pan (left/right relative to camera view)
    /// delta.1 = vertical pan (up/down relative to camera view)
    ///
    /// Both are fractions of the orbit distance.
    pub fn pan(&mut self, delta: (f32, f32)) {
        let basis = look_at(self.eye, self.target, self.up);
        let right = basis.x.truncate();
        let up = basis.y.truncate();

        let movement = (right * delta.0 + up * delta.1) * self.distance;
        self.target += movement;
        self.update();
    }

    /// Updates the camera after changing `distance`, `pitch`, `yaw` or `target`.
    fn update(&mut self) {
        self.eye =
            calculate_cartesian_eye_position(self.pitch, self.yaw, self.distance, self.target);
    }

    pub fn view_matrix(&self) -> Mat4f {
        inverted(&look_at(self.eye, self.target, self.up)).unwrap_or_else(|| {
            log::warn!("Camera transform is singular, using identity view");
            Mat4f::identity()
        })
    }

    pub fn forward(&self) -> Vec3f {
        (self.target - self.eye).normalize()
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn update_view_proj(&mut self) {
        self.uniform = CameraUniform::new(self.eye, self.build_view_projection_matrix());
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub min_yaw: Option<f32>,
    pub max_yaw: Option<f32>,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: None,
            max_distance: None,
            // Stay clear of the poles, where the up vector and view direction line up.
            min_pitch: -std::f32::consts::FRAC_PI_2 + 0.01,
            max_pitch: std::f32::consts::FRAC_PI_2 - 0.01,
            min_yaw: None,
            max_yaw: None,
        }
    }
}

fn calculate_cartesian_eye_position(pitch: f32, yaw: f32, distance: f32, target: Vec3f) -> Vec3f {
    Vec3f::new(
        distance * yaw.sin() * pitch.cos(),
        distance * pitch.sin(),
        distance * yaw.cos() * pitch.cos(),
    ) + target
}
