//! # Scene Management Module
//!
//! Holds the loaded meshes as GPU-ready [`Object`]s together with the orbit
//! camera looking at them.
//!
//! - [`Scene`] - objects plus camera
//! - [`Object`] - one mesh with its buffers and model transform
//! - [`vertex`] - wgpu layout of [`crate::mesh::Vertex`]

pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use object::{DrawObject, Object};
pub use scene::Scene;
