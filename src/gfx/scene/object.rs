use std::ops::Range;

use cgmath::SquareMatrix;

use crate::{
    math::Mat4f,
    mesh::Mesh,
    wgpu_utils::uniform_buffer::UniformBuffer,
};

/// Per-object uniform, bound to group 1 of the mesh pipeline.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    pub transform: [[f32; 4]; 4],
}

impl ModelUniform {
    pub fn new(transform: Mat4f) -> Self {
        Self {
            transform: transform.into(),
        }
    }
}

// GPU resources struct to hold all buffers and bind groups of one object
pub struct ObjectGpuResources {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub transform_ubo: UniformBuffer<ModelUniform>,
    pub transform_bind_group: wgpu::BindGroup,
}

/// A loaded mesh placed in the scene
pub struct Object {
    pub name: String,
    pub mesh: Mesh,
    pub transform: Mat4f,
    pub visible: bool,
    pub gpu_resources: Option<ObjectGpuResources>, // None until init_gpu_resources called
}

impl Object {
    /// Create a new Object with identity transformation
    pub fn new(name: &str, mesh: Mesh) -> Self {
        Self {
            name: name.to_owned(),
            mesh,
            transform: Mat4f::identity(),
            visible: true,
            gpu_resources: None,
        }
    }

    /// Object whose bounding box center sits at the world origin.
    pub fn centered(name: &str, mesh: Mesh) -> Self {
        let mut object = Self::new(name, mesh);
        object.transform = Mat4f::from_translation(-object.mesh.center());
        object
    }

    /// Layout of the per-object bind group expected by the mesh pipeline.
    pub fn transform_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Transform Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        })
    }

    /// Update the transformation uniform if GPU resources exist
    pub fn update_transform(&mut self, queue: &wgpu::Queue) {
        if let Some(gpu_resources) = &mut self.gpu_resources {
            gpu_resources
                .transform_ubo
                .update_content(queue, ModelUniform::new(self.transform));
        }
    }

    pub fn init_gpu_resources(&mut self, device: &wgpu::Device, layout: &wgpu::BindGroupLayout) {
        let vertex_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Vertex Buffer", self.name)),
                contents: bytemuck::cast_slice(&self.mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );

        let index_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Index Buffer", self.name)),
                contents: bytemuck::cast_slice(&self.mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        let transform_ubo = UniformBuffer::new_with_data(device, &ModelUniform::new(self.transform));

        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Transform Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_ubo.binding_resource(),
            }],
        });

        log::debug!(
            "Uploaded '{}': {} vertices, {} indices",
            self.name,
            self.mesh.vertices.len(),
            self.mesh.indices.len()
        );

        self.gpu_resources = Some(ObjectGpuResources {
            vertex_buffer,
            index_buffer,
            index_count: self.mesh.indices.len() as u32,
            transform_ubo,
            transform_bind_group,
        });
    }
}

pub trait DrawObject<'a> {
    fn draw_object(&mut self, object: &'a Object) {
        self.draw_object_instanced(object, 0..1);
    }
    fn draw_object_instanced(&mut self, object: &'a Object, instances: Range<u32>);
}

impl<'a, 'b> DrawObject<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    /// Binds the object's transform at group 1; skips objects never uploaded.
    fn draw_object_instanced(&mut self, object: &'b Object, instances: Range<u32>) {
        let Some(gpu) = &object.gpu_resources else {
            return;
        };

        self.set_bind_group(1, &gpu.transform_bind_group, &[]);
        self.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
        self.set_index_buffer(gpu.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..gpu.index_count, 0, instances);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3f;
    use crate::mesh::{load_mesh_from_bytes, LoadOptions};
    use cgmath::Transform;

    fn offset_triangle() -> Mesh {
        let obj = b"v 2 2 2\nv 4 2 2\nv 4 6 2\nf 1 2 3\n";
        load_mesh_from_bytes(obj, LoadOptions::default()).unwrap()
    }

    #[test]
    fn test_centered_moves_bbox_center_to_origin() {
        let object = Object::centered("tri", offset_triangle());
        let center = object.mesh.center();
        assert_eq!(center, Vec3f::new(3.0, 4.0, 2.0));

        let moved = object.transform.transform_point(cgmath::Point3::new(center.x, center.y, center.z));
        assert!(moved.x.abs() < 1e-6 && moved.y.abs() < 1e-6 && moved.z.abs() < 1e-6);
    }

    #[test]
    fn test_new_object_defaults() {
        let object = Object::new("tri", offset_triangle());
        assert!(object.visible);
        assert!(object.gpu_resources.is_none());
        assert_eq!(object.transform, Mat4f::identity());
    }

    #[test]
    fn test_model_uniform_is_column_major() {
        let uniform = ModelUniform::new(Mat4f::from_translation(Vec3f::new(1.0, 2.0, 3.0)));
        assert_eq!(uniform.transform[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(std::mem::size_of::<ModelUniform>(), 64);
    }
}
