// src/wgpu_utils/mod.rs
//! Small typed wrappers over wgpu buffers.

pub mod uniform_buffer;

// Re-export main types
pub use uniform_buffer::UniformBuffer;
