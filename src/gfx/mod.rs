//! # Graphics Module
//!
//! Everything needed to put a loaded [`Mesh`](crate::mesh::Mesh) on screen:
//!
//! - **Camera System** ([`camera`]) - orbit camera driven by mouse and keyboard
//! - **Rendering Pipeline** ([`rendering`]) - surface, depth buffer and the mesh pipeline
//! - **Scene Management** ([`scene`]) - GPU-side objects and the camera looking at them
//! - **Resource Management** ([`resources`]) - depth texture and global uniforms

pub mod camera;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
