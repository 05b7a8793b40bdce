//! Builds a [`Mesh`] from parsed OBJ data.
//!
//! Steps run in a fixed order: corner expansion, flat normals, weld, smooth
//! normals, bounding box, basic texture coordinates, tangents. Flat normals
//! run before the weld so that corners with different face normals stay
//! apart; everything after the weld works on the indexed mesh.

use std::collections::HashMap;

use cgmath::{InnerSpace, Zero};

use super::error::{Attribute, MeshError};
use super::obj::{ObjData, ObjIndex};
use super::{LoadOptions, Mesh, Vertex};
use crate::math::{inverse_lerp, max_components, min_components, Vec3f, VectorExt};

pub fn build_mesh(obj: &ObjData, options: LoadOptions) -> Result<Mesh, MeshError> {
    if obj.faces.is_empty() {
        return Err(MeshError::Empty);
    }
    let corner_count = obj.corner_count();
    if u32::try_from(corner_count).is_err() {
        return Err(MeshError::TooManyVertices {
            count: corner_count,
        });
    }

    let mut has_normals = obj.has_normals();
    let mut has_tex_coords = obj.has_tex_coords();

    let mut raw = expand_corners(obj)?;

    if options.contains(LoadOptions::FLAT_NORMALS) && !has_normals {
        log::debug!("Computing flat normals for {} triangles", obj.faces.len());
        compute_flat_normals(&mut raw);
        has_normals = true;
    }

    let (mut vertices, indices) = if options.contains(LoadOptions::WELD) {
        weld(&raw)
    } else {
        let indices: Vec<u32> = (0..raw.len() as u32).collect();
        (raw, indices)
    };
    log::debug!(
        "{} corners reduced to {} vertices",
        indices.len(),
        vertices.len()
    );

    if options.contains(LoadOptions::SMOOTH_NORMALS) && !has_normals {
        log::debug!("Computing smooth normals");
        compute_smooth_normals(&mut vertices, &indices);
        has_normals = true;
    }

    let (aabb_min, aabb_max) = compute_bounding_box(&vertices);

    if options.contains(LoadOptions::COMPUTE_TEX_COORDS) && !has_tex_coords {
        log::debug!("Projecting texture coordinates from the bounding box");
        compute_basic_tex_coords(&mut vertices, aabb_min, aabb_max);
        has_tex_coords = true;
    }

    if options.contains(LoadOptions::COMPUTE_TANGENTS) {
        if has_normals && has_tex_coords {
            log::debug!("Computing tangents");
            compute_tangents(&mut vertices, &indices);
        } else {
            log::debug!("Skipping tangents: mesh has no normals or texture coordinates");
        }
    }

    Ok(Mesh {
        vertices,
        indices,
        aabb_min,
        aabb_max,
    })
}

fn resolve<T: Copy>(
    items: &[T],
    index: ObjIndex,
    attribute: Attribute,
    line: usize,
) -> Result<T, MeshError> {
    index.resolve(items).ok_or(MeshError::Reference {
        line,
        attribute,
        index: index.get(),
        available: items.len(),
    })
}

/// One vertex per face corner.
///
/// Every reference is range checked and copied; attributes a corner does not
/// reference stay zero.
pub fn expand_corners(obj: &ObjData) -> Result<Vec<Vertex>, MeshError> {
    let mut vertices = Vec::with_capacity(obj.corner_count());

    for face in &obj.faces {
        for corner in &face.corners {
            let mut vertex = Vertex {
                position: resolve(&obj.positions, corner.position, Attribute::Position, face.line)?
                    .into(),
                ..Vertex::default()
            };

            if let Some(index) = corner.tex_coord {
                vertex.tex_coords =
                    resolve(&obj.tex_coords, index, Attribute::TexCoord, face.line)?.into();
            }
            if let Some(index) = corner.normal {
                vertex.normal = resolve(&obj.normals, index, Attribute::Normal, face.line)?.into();
            }

            vertices.push(vertex);
        }
    }

    Ok(vertices)
}

/// Normal of the triangle `(a, b, c)`, facing the side it winds counter-clockwise on.
fn face_normal(a: Vec3f, b: Vec3f, c: Vec3f) -> Vec3f {
    (c - b).cross(a - b).normalized_or_zero()
}

/// Assigns each unindexed triangle its face normal.
pub fn compute_flat_normals(vertices: &mut [Vertex]) {
    for triangle in vertices.chunks_exact_mut(3) {
        let normal = face_normal(
            triangle[0].position(),
            triangle[1].position(),
            triangle[2].position(),
        );
        for vertex in triangle {
            vertex.normal = normal.into();
        }
    }
}

/// Merges vertices whose position, normal and texture coordinates compare
/// equal component by component.
///
/// Output vertices keep the order in which each distinct vertex first
/// appears, and the returned indices map every input vertex to its slot.
pub fn weld(vertices: &[Vertex]) -> (Vec<Vertex>, Vec<u32>) {
    let mut slots: HashMap<[u32; 8], u32> = HashMap::with_capacity(vertices.len());
    let mut welded = Vec::new();
    let mut indices = Vec::with_capacity(vertices.len());

    for vertex in vertices {
        if vertex.has_nan() {
            welded.push(*vertex);
            indices.push((welded.len() - 1) as u32);
            continue;
        }
        let slot = *slots.entry(vertex.weld_key()).or_insert_with(|| {
            welded.push(*vertex);
            (welded.len() - 1) as u32
        });
        indices.push(slot);
    }

    (welded, indices)
}

/// Area-independent average of the adjacent face normals.
pub fn compute_smooth_normals(vertices: &mut [Vertex], indices: &[u32]) {
    let mut sums = vec![Vec3f::zero(); vertices.len()];

    for triangle in indices.chunks_exact(3) {
        let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
        let normal = face_normal(
            vertices[a].position(),
            vertices[b].position(),
            vertices[c].position(),
        );
        sums[a] += normal;
        sums[b] += normal;
        sums[c] += normal;
    }

    for (vertex, sum) in vertices.iter_mut().zip(sums) {
        vertex.normal = sum.normalized_or_zero().into();
    }
}

/// Component-wise minimum and maximum of all positions. Zero for an empty slice.
pub fn compute_bounding_box(vertices: &[Vertex]) -> (Vec3f, Vec3f) {
    let mut positions = vertices.iter().map(Vertex::position);
    let Some(first) = positions.next() else {
        return (Vec3f::zero(), Vec3f::zero());
    };

    positions.fold((first, first), |(min, max), p| {
        (min_components(min, p), max_components(max, p))
    })
}

/// Side projection: `u` runs along Z and `v` along Y of the bounding box.
pub fn compute_basic_tex_coords(vertices: &mut [Vertex], min: Vec3f, max: Vec3f) {
    for vertex in vertices {
        let p = vertex.position();
        vertex.tex_coords = [
            inverse_lerp(min.z, max.z, p.z),
            inverse_lerp(min.y, max.y, p.y),
        ];
    }
}

/// Per-vertex tangent frames from positions, normals and texture coordinates.
///
/// Triangles whose texture coordinates are degenerate contribute nothing. The
/// tangent is made orthogonal to the normal, and `w` records whether the
/// texture space is mirrored relative to `cross(normal, tangent)`.
pub fn compute_tangents(vertices: &mut [Vertex], indices: &[u32]) {
    let mut tangents = vec![Vec3f::zero(); vertices.len()];
    let mut bitangents = vec![Vec3f::zero(); vertices.len()];

    for triangle in indices.chunks_exact(3) {
        let [i0, i1, i2] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
        let (v0, v1, v2) = (&vertices[i0], &vertices[i1], &vertices[i2]);

        let e1 = v1.position() - v0.position();
        let e2 = v2.position() - v0.position();
        let d1 = v1.tex_coords() - v0.tex_coords();
        let d2 = v2.tex_coords() - v0.tex_coords();

        let determinant = d1.x * d2.y - d2.x * d1.y;
        if determinant == 0.0 {
            continue;
        }
        let r = 1.0 / determinant;

        let tangent = (e1 * d2.y - e2 * d1.y) * r;
        let bitangent = (e2 * d1.x - e1 * d2.x) * r;

        for i in [i0, i1, i2] {
            tangents[i] += tangent;
            bitangents[i] += bitangent;
        }
    }

    for ((vertex, t), b) in vertices.iter_mut().zip(tangents).zip(bitangents) {
        let n = vertex.normal();
        let tangent = t.reject(n).normalized_or_zero();
        let handedness = if t.cross(b).dot(n) > 0.0 { 1.0 } else { -1.0 };
        vertex.tangent = tangent.extend(handedness).into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Approx, Vec2f};
    use crate::mesh::obj::parse_obj;

    const CUBE: &str = "\
v -1 -1  1
v  1 -1  1
v  1  1  1
v -1  1  1
v -1 -1 -1
v  1 -1 -1
v  1  1 -1
v -1  1 -1
f 1 2 3 4
f 6 5 8 7
f 2 6 7 3
f 5 1 4 8
f 4 3 7 8
f 5 6 2 1
";

    fn build(text: &str, options: LoadOptions) -> Result<Mesh, MeshError> {
        build_mesh(&parse_obj(text.as_bytes())?, options)
    }

    fn vertex(position: [f32; 3], normal: [f32; 3], tex_coords: [f32; 2]) -> Vertex {
        Vertex {
            position,
            normal,
            tex_coords,
            ..Vertex::default()
        }
    }

    /// Quadratic reference: the first earlier vertex that compares equal.
    fn naive_weld(vertices: &[Vertex]) -> (Vec<Vertex>, Vec<u32>) {
        let mut welded: Vec<Vertex> = Vec::new();
        let mut indices = Vec::new();
        for v in vertices {
            let same = |w: &Vertex| {
                w.position == v.position && w.normal == v.normal && w.tex_coords == v.tex_coords
            };
            match welded.iter().position(same) {
                Some(slot) => indices.push(slot as u32),
                None => {
                    indices.push(welded.len() as u32);
                    welded.push(*v);
                }
            }
        }
        (welded, indices)
    }

    fn keys(vertices: &[Vertex]) -> Vec<[u32; 8]> {
        vertices.iter().map(Vertex::weld_key).collect()
    }

    fn sample_corners() -> Vec<Vertex> {
        vec![
            vertex([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
            vertex([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0]),
            vertex([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0]),
            vertex([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0]),
            vertex([1.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 1.0]),
            vertex([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0]),
            // Same position, different normal.
            vertex([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0]),
            // Negative zero equals positive zero.
            vertex([-0.0, 0.0, 0.0], [0.0, -0.0, 1.0], [0.0, 0.0]),
            vertex([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
            // NaN equals nothing, not even itself.
            vertex([f32::NAN, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
            vertex([f32::NAN, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
        ]
    }

    #[test]
    fn test_weld_round_trip() {
        let corners = sample_corners();
        let (welded, indices) = weld(&corners);

        assert_eq!(indices.len(), corners.len());
        assert!(welded.len() <= corners.len());
        for (corner, &index) in corners.iter().zip(&indices) {
            assert_eq!(welded[index as usize].weld_key(), corner.weld_key());
        }
    }

    #[test]
    fn test_weld_matches_pairwise_comparison() {
        let corners = sample_corners();
        let (welded, indices) = weld(&corners);
        let (expected_vertices, expected_indices) = naive_weld(&corners);

        assert_eq!(indices, expected_indices);
        assert_eq!(welded.len(), expected_vertices.len());
        for (a, b) in welded.iter().zip(&expected_vertices) {
            assert_eq!(a.weld_key(), b.weld_key());
        }
        assert_eq!(welded.len(), 7);
        assert_eq!(indices, vec![0, 1, 2, 1, 3, 2, 4, 0, 0, 5, 6]);
    }

    #[test]
    fn test_weld_is_idempotent() {
        let (welded, indices) = weld(&sample_corners());
        let expanded: Vec<Vertex> = indices.iter().map(|&i| welded[i as usize]).collect();
        let (rewelded, reindices) = weld(&expanded);

        assert_eq!(keys(&rewelded), keys(&welded));
        assert_eq!(reindices, indices);
    }

    #[test]
    fn test_weld_of_welded_buffer_is_identity() {
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let mesh = build(text, LoadOptions::WELD).unwrap();
        assert_eq!(mesh.vertices.len(), 4);

        let (welded, indices) = weld(&mesh.vertices);
        assert_eq!(welded, mesh.vertices);
        assert_eq!(indices, vec![0, 1, 2, 3]);

        let (welded, indices) = weld(&welded);
        assert_eq!(welded, mesh.vertices);
        assert_eq!(indices, (0..welded.len() as u32).collect::<Vec<_>>());
    }

    #[test]
    fn test_flat_quad_welds_across_signed_zero() {
        // The two halves of a flat quad can produce -0.0 and 0.0 normal components.
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let mesh = build(text, LoadOptions::WELD | LoadOptions::FLAT_NORMALS).unwrap();

        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_partially_referenced_attributes_are_copied() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 1 0 0\nvt 0.5 0.25\nf 1/1/1 2/1/1 3\n";
        let mesh = build(text, LoadOptions::WELD).unwrap();

        assert_eq!(mesh.vertices.len(), 3);
        for v in &mesh.vertices[..2] {
            assert_eq!(v.normal, [1.0, 0.0, 0.0]);
            assert_eq!(v.tex_coords, [0.5, 0.25]);
        }
        assert_eq!(mesh.vertices[2].normal, [0.0, 0.0, 0.0]);
        assert_eq!(mesh.vertices[2].tex_coords, [0.0, 0.0]);
    }

    #[test]
    fn test_smooth_normals_of_flat_fan() {
        // Five triangles fanned around the origin in the XY plane.
        let mut text = String::from("v 0 0 0\n");
        for i in 0..6 {
            let angle = i as f32 * std::f32::consts::TAU / 6.0;
            text.push_str(&format!("v {} {} 0\n", angle.cos(), angle.sin()));
        }
        for i in 2..7 {
            text.push_str(&format!("f 1 {} {}\n", i, i + 1));
        }

        let mesh = build(&text, LoadOptions::WELD | LoadOptions::SMOOTH_NORMALS).unwrap();
        assert_eq!(mesh.vertices.len(), 7);
        for v in &mesh.vertices {
            assert!(v.normal().approx_eq(&Vec3f::unit_z(), 1e-5), "normal {:?}", v.normal);
        }
    }

    #[test]
    fn test_smooth_normal_at_pyramid_apex() {
        let text = "\
v 0 1 0
v -1 0 1
v 1 0 1
v 1 0 -1
v -1 0 -1
f 1 2 3
f 1 3 4
f 1 4 5
f 1 5 2
";
        let mesh = build(text, LoadOptions::WELD | LoadOptions::SMOOTH_NORMALS).unwrap();
        let apex = mesh.vertices[0];

        assert!(apex.normal().approx_eq(&Vec3f::unit_y(), 1e-5));
        // Base corners lean outward and up.
        for v in &mesh.vertices[1..] {
            let outward = Vec3f::new(v.position[0], 0.0, v.position[2]);
            assert!(v.normal().dot(outward) > 0.0);
            assert!(v.normal[1] > 0.0);
            assert!(v.normal().magnitude().approx_eq(&1.0, 1e-5));
        }
    }

    #[test]
    fn test_degenerate_triangle_gets_zero_normal() {
        let mesh = build(
            "v 0 0 0\nv 1 0 0\nv 2 0 0\nf 1 2 3\n",
            LoadOptions::WELD | LoadOptions::SMOOTH_NORMALS,
        )
        .unwrap();
        assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 0.0, 0.0]));
    }

    #[test]
    fn test_flat_normals_split_shared_corners() {
        let options = LoadOptions::WELD | LoadOptions::FLAT_NORMALS | LoadOptions::SMOOTH_NORMALS;
        let mesh = build(CUBE, options).unwrap();

        assert_eq!(mesh.indices.len(), 36);
        assert_eq!(mesh.vertices.len(), 24);
        for triangle in mesh.indices.chunks_exact(3) {
            let normal = mesh.vertices[triangle[0] as usize].normal();
            let axis_aligned = [normal.x.abs(), normal.y.abs(), normal.z.abs()];
            assert_eq!(axis_aligned.iter().filter(|&&c| c == 1.0).count(), 1);
            for &i in triangle {
                let p = mesh.vertices[i as usize].position();
                assert!(p.dot(normal).approx_eq(&1.0, 1e-6));
            }
        }
    }

    #[test]
    fn test_supplied_normals_are_kept() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 1 0 0\nf 1//1 2//1 3//1\n";
        let mesh = build(text, LoadOptions::default() | LoadOptions::FLAT_NORMALS).unwrap();
        assert!(mesh.vertices.iter().all(|v| v.normal == [1.0, 0.0, 0.0]));
    }

    #[test]
    fn test_partial_normals_are_replaced() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 1 0 0\nf 1//1 2 3\n";
        let mesh = build(text, LoadOptions::default()).unwrap();
        assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_bounding_box() {
        let vertices = [
            vertex([0.0, 0.0, 0.0], [0.0; 3], [0.0; 2]),
            vertex([2.0, 3.0, -1.0], [0.0; 3], [0.0; 2]),
            vertex([-1.0, 5.0, 4.0], [0.0; 3], [0.0; 2]),
        ];
        let (min, max) = compute_bounding_box(&vertices);

        assert_eq!(min, Vec3f::new(-1.0, 0.0, -1.0));
        assert_eq!(max, Vec3f::new(2.0, 5.0, 4.0));
        assert_eq!(compute_bounding_box(&[]), (Vec3f::zero(), Vec3f::zero()));
    }

    #[test]
    fn test_basic_tex_coords() {
        let text = "v 0 0 0\nv 0 2 4\nv 0 1 1\nf 1 2 3\n";
        let mesh = build(text, LoadOptions::WELD | LoadOptions::COMPUTE_TEX_COORDS).unwrap();

        assert_eq!(mesh.vertices[0].tex_coords, [0.0, 0.0]);
        assert_eq!(mesh.vertices[1].tex_coords, [1.0, 1.0]);
        assert_eq!(mesh.vertices[2].tex_coords, [0.25, 0.5]);
    }

    #[test]
    fn test_supplied_tex_coords_are_kept() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0.5 0.25\nf 1/1 2/1 3/1\n";
        let mesh = build(text, LoadOptions::WELD | LoadOptions::COMPUTE_TEX_COORDS).unwrap();
        assert!(mesh.vertices.iter().all(|v| v.tex_coords == [0.5, 0.25]));
    }

    fn tangent_triangle(u_sign: f32) -> Vec<Vertex> {
        let mut vertices = vec![
            vertex([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
            vertex([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [u_sign, 0.0]),
            vertex([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0]),
        ];
        compute_tangents(&mut vertices, &[0, 1, 2]);
        vertices
    }

    #[test]
    fn test_tangents_follow_u() {
        for v in tangent_triangle(1.0) {
            assert!(v.tangent().approx_eq(&Vec3f::unit_x().extend(1.0), 1e-6));
        }
    }

    #[test]
    fn test_mirrored_u_flips_handedness() {
        for v in tangent_triangle(-1.0) {
            assert!(v.tangent().approx_eq(&(-Vec3f::unit_x()).extend(-1.0), 1e-6));
        }
    }

    #[test]
    fn test_tangent_is_orthogonal_to_normal() {
        let mut vertices = vec![
            vertex([0.0, 0.0, 0.0], [0.0, 0.6, 0.8], [0.0, 0.0]),
            vertex([1.0, 0.0, 0.5], [0.0, 0.6, 0.8], [1.0, 0.0]),
            vertex([0.0, 1.0, 1.0], [0.0, 0.6, 0.8], [0.0, 1.0]),
        ];
        compute_tangents(&mut vertices, &[0, 1, 2]);

        for v in &vertices {
            let t = v.tangent().truncate();
            assert!(t.dot(v.normal()).approx_zero(1e-5));
            assert!(t.magnitude().approx_eq(&1.0, 1e-5));
        }
    }

    #[test]
    fn test_degenerate_tex_coords_skip_triangle() {
        let mut vertices = vec![
            vertex([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.5, 0.5]),
            vertex([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.5, 0.5]),
            vertex([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.5, 0.5]),
        ];
        compute_tangents(&mut vertices, &[0, 1, 2]);

        for v in &vertices {
            assert_eq!(v.tangent, [0.0, 0.0, 0.0, -1.0]);
        }
    }

    #[test]
    fn test_out_of_range_reference() {
        let err = build("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 99\n", LoadOptions::default()).unwrap_err();

        match err {
            MeshError::Reference {
                line,
                attribute,
                index,
                available,
            } => {
                assert_eq!(line, 4);
                assert_eq!(attribute, Attribute::Position);
                assert_eq!(index, 99);
                assert_eq!(available, 3);
            }
            other => panic!("expected a reference error, got {:?}", other),
        }
    }

    #[test]
    fn test_partial_tex_coord_reference_is_still_checked() {
        let err = build("v 0 0 0\nf 1/5 1 1\n", LoadOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            MeshError::Reference {
                attribute: Attribute::TexCoord,
                index: 5,
                available: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_no_faces_is_an_error() {
        assert!(matches!(build("v 0 0 0\n", LoadOptions::default()), Err(MeshError::Empty)));
    }

    #[test]
    fn test_without_weld_indices_are_identity() {
        let mesh = build(CUBE, LoadOptions::SMOOTH_NORMALS).unwrap();
        assert_eq!(mesh.vertices.len(), 36);
        assert_eq!(mesh.indices, (0..36).collect::<Vec<u32>>());
    }

    #[test]
    fn test_cube_end_to_end() {
        let mesh = build(CUBE, LoadOptions::default()).unwrap();

        assert_eq!(mesh.indices.len(), 36);
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.aabb_min, Vec3f::new(-1.0, -1.0, -1.0));
        assert_eq!(mesh.aabb_max, Vec3f::new(1.0, 1.0, 1.0));

        for v in &mesh.vertices {
            let p = v.position();
            let n = v.normal();
            assert!(n.magnitude().approx_eq(&1.0, 1e-5));
            assert!(n.dot(p) > 0.0, "normal {:?} points inward at {:?}", n, p);

            let uv = v.tex_coords();
            let expected = Vec2f::new((p.z + 1.0) * 0.5, (p.y + 1.0) * 0.5);
            assert!(uv.approx_eq(&expected, 1e-6));

            let t = v.tangent();
            assert!(t.w == 1.0 || t.w == -1.0);
            assert!(t.truncate().dot(n).approx_zero(1e-5));
        }
    }
}
