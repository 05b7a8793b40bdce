//! # Mesh Module
//!
//! Turns Wavefront OBJ files into GPU-ready vertex and index buffers.
//!
//! ## Pipeline
//!
//! 1. [`obj::parse_obj`] reads the text into attribute arrays and triangulated
//!    faces, keeping 1-based indices.
//! 2. [`postprocess::build_mesh`] expands one vertex per face corner, welds
//!    identical vertices and fills in whatever attributes the file did not
//!    supply (normals, texture coordinates, tangents).
//!
//! ## Usage
//!
//! ```no_run
//! use scop::mesh::{load_mesh, LoadOptions};
//!
//! let mesh = load_mesh("models/teapot.obj", LoadOptions::default())?;
//! println!("{} vertices, {} triangles", mesh.vertices.len(), mesh.triangle_count());
//! # Ok::<(), scop::mesh::MeshError>(())
//! ```

pub mod error;
pub mod obj;
pub mod postprocess;
pub mod scanner;

pub use error::{Attribute, MeshError, SyntaxError};
pub use obj::{parse_obj, ObjData};
pub use postprocess::build_mesh;

use std::path::Path;

use bytemuck::{Pod, Zeroable};

use crate::math::{Vec2f, Vec3f, Vec4f};

bitflags::bitflags! {
    /// Postprocessing steps applied while building a [`Mesh`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LoadOptions: u32 {
        /// Merge vertices whose position, normal and texture coordinates are bit-identical.
        const WELD = 1 << 0;
        /// Average face normals into shared vertices when the file has none.
        const SMOOTH_NORMALS = 1 << 1;
        /// Give every triangle its own face normal when the file has none. Wins over `SMOOTH_NORMALS`.
        const FLAT_NORMALS = 1 << 2;
        /// Drop `vn` data and the normal indices that refer to it.
        const IGNORE_SUPPLIED_NORMALS = 1 << 3;
        const COMPUTE_TANGENTS = 1 << 4;
        /// Project texture coordinates from the bounding box when the file has none.
        const COMPUTE_TEX_COORDS = 1 << 5;
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self::WELD | Self::SMOOTH_NORMALS | Self::COMPUTE_TANGENTS | Self::COMPUTE_TEX_COORDS
    }
}

/// Vertex layout shared with the mesh shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    /// `xyz` is the tangent direction, `w` the bitangent sign.
    pub tangent: [f32; 4],
    pub tex_coords: [f32; 2],
}

impl Vertex {
    pub fn position(&self) -> Vec3f {
        self.position.into()
    }

    pub fn normal(&self) -> Vec3f {
        self.normal.into()
    }

    pub fn tangent(&self) -> Vec4f {
        self.tangent.into()
    }

    pub fn tex_coords(&self) -> Vec2f {
        self.tex_coords.into()
    }

    /// Bit patterns of the attributes that decide whether two vertices weld.
    ///
    /// Negative zero is folded into positive zero, so two keys are equal
    /// exactly when the components compare equal, NaN aside.
    pub(crate) fn weld_key(&self) -> [u32; 8] {
        let [px, py, pz] = self.position;
        let [nx, ny, nz] = self.normal;
        let [u, v] = self.tex_coords;
        [px, py, pz, nx, ny, nz, u, v].map(|c| (c + 0.0).to_bits())
    }

    /// A NaN component never compares equal, so such a vertex welds with nothing.
    pub(crate) fn has_nan(&self) -> bool {
        self.position
            .iter()
            .chain(&self.normal)
            .chain(&self.tex_coords)
            .any(|c| c.is_nan())
    }
}

/// Indexed triangle list plus its bounding box.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub aabb_min: Vec3f,
    pub aabb_max: Vec3f,
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn center(&self) -> Vec3f {
        (self.aabb_min + self.aabb_max) * 0.5
    }

    pub fn extent(&self) -> Vec3f {
        self.aabb_max - self.aabb_min
    }

    /// Radius of the sphere around [`center`](Self::center) that encloses the bounding box.
    pub fn bounding_radius(&self) -> f32 {
        use cgmath::InnerSpace;
        self.extent().magnitude() * 0.5
    }
}

/// Reads and builds the OBJ file at `path`.
pub fn load_mesh(path: impl AsRef<Path>, options: LoadOptions) -> Result<Mesh, MeshError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| MeshError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mesh = load_mesh_from_bytes(&bytes, options)?;
    log::info!(
        "Loaded {}: {} vertices, {} triangles",
        path.display(),
        mesh.vertices.len(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Same as [`load_mesh`] for OBJ text already in memory.
pub fn load_mesh_from_bytes(bytes: &[u8], options: LoadOptions) -> Result<Mesh, MeshError> {
    let mut obj = parse_obj(bytes)?;
    if options.contains(LoadOptions::IGNORE_SUPPLIED_NORMALS) {
        obj.discard_normals();
    }
    build_mesh(&obj, options)
}
