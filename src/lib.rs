// src/lib.rs
//! Scop
//!
//! A Wavefront OBJ loader and a small wgpu/winit viewer for the meshes it
//! produces.

pub mod app;
pub mod gfx;
pub mod math;
pub mod mesh;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::{ViewerApp, ViewerConfig};
pub use mesh::{load_mesh, load_mesh_from_bytes, LoadOptions, Mesh, MeshError};
