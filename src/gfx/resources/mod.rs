// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Depth buffer and the uniform bindings shared by every draw call.

pub mod global_bindings;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO, LightConfig};
pub use texture_resource::TextureResource;
