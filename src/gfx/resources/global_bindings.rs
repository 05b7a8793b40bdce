//! Global uniform bindings for camera and light data
//!
//! Everything in here is shared by every object drawn in a frame and is bound
//! to slot 0 of the mesh pipeline.

use crate::{gfx::camera::camera_utils::CameraUniform, wgpu_utils::uniform_buffer::UniformBuffer};

/// Global uniform buffer content structure
///
/// MUST match the `Globals` struct in `mesh.wgsl` exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
    /// `w` is unused padding.
    light_position: [f32; 4],
    /// `w` is the ambient term.
    light_color: [f32; 4],
}

impl GlobalUBOContent {
    pub fn new(camera: CameraUniform, light: LightConfig) -> Self {
        let [x, y, z] = light.position;
        let [r, g, b] = light.color;
        Self {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            light_position: [x, y, z, 1.0],
            light_color: [r * light.intensity, g * light.intensity, b * light.intensity, light.ambient],
        }
    }
}

/// Point light used by the mesh shader
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightConfig {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
    /// Fraction of the base color that stays lit on the dark side.
    pub ambient: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: [5.0, 10.0, 5.0],
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
            ambient: 0.15,
        }
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Writes the camera and light for the next frame.
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: CameraUniform,
    light: LightConfig,
) {
    ubo.update_content(queue, GlobalUBOContent::new(camera, light));
}

/// Bind group layout and bind group for the global uniforms
pub struct GlobalBindings {
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Globals Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Globals Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.binding_resource(),
            }],
        });

        Self {
            bind_group_layout,
            bind_group,
        }
    }

    /// Used when creating render pipelines that need access to global uniforms.
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
