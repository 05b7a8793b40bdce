//! Matrix construction and inversion.
//!
//! `cgmath` stores matrices column-major; the functions below read the four
//! columns as 3-vectors plus the bottom row, which is exactly the block layout
//! the cofactor inverse works on.

use cgmath::{InnerSpace, Matrix, Rad, Vector4};

use super::{Mat3f, Mat4f, Vec3f, VectorExt, NORMALIZE_EPSILON};

/// Remaps OpenGL clip depth (-1..1) to the 0..1 range wgpu expects.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Mat4f = Mat4f::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// General 4x4 inverse using the cofactor method on 3-vector blocks.
///
/// Does not assume the matrix is orthogonal or affine. Returns `None` when the
/// determinant is exactly zero.
pub fn inverted(m: &Mat4f) -> Option<Mat4f> {
    let a = m.x.truncate();
    let b = m.y.truncate();
    let c = m.z.truncate();
    let d = m.w.truncate();

    let x = m.x.w;
    let y = m.y.w;
    let z = m.z.w;
    let w = m.w.w;

    let mut s = a.cross(b);
    let mut t = c.cross(d);
    let mut u = a * y - b * x;
    let mut v = c * w - d * z;

    let determinant = s.dot(v) + t.dot(u);
    if determinant == 0.0 {
        return None;
    }

    let inv_det = 1.0 / determinant;
    s *= inv_det;
    t *= inv_det;
    u *= inv_det;
    v *= inv_det;

    let r0 = b.cross(v) + t * y;
    let r1 = v.cross(a) - t * x;
    let r2 = d.cross(u) + s * w;
    let r3 = u.cross(c) - s * z;

    // Built row by row, then transposed into cgmath's column storage.
    let rows = Mat4f::from_cols(
        Vector4::new(r0.x, r0.y, r0.z, -b.dot(t)),
        Vector4::new(r1.x, r1.y, r1.z, a.dot(t)),
        Vector4::new(r2.x, r2.y, r2.z, -d.dot(s)),
        Vector4::new(r3.x, r3.y, r3.z, c.dot(s)),
    );

    Some(rows.transpose())
}

/// Orthonormal basis whose Z column points along `z_axis`.
///
/// The Y column is `up` made perpendicular to Z. When `up` is parallel to Z
/// the X axis is tried instead, then the Z axis.
pub fn align_z(z_axis: Vec3f, up: Vec3f) -> Mat3f {
    let z = z_axis.normalized_or_zero();

    let mut y = up.reject(z);
    if y.magnitude() <= NORMALIZE_EPSILON {
        y = Vec3f::unit_x().reject(z);
        if y.magnitude() <= NORMALIZE_EPSILON {
            y = Vec3f::unit_z().reject(z);
        }
    }
    let y = y.normalized_or_zero();
    let x = y.cross(z).normalized_or_zero();

    Mat3f::from_cols(x, y, z)
}

/// Camera-to-world transform for a right-handed camera at `eye` looking at
/// `target`. The camera looks down its local -Z axis.
///
/// Invert the result with [`inverted`] to get a view matrix.
pub fn look_at(eye: Vec3f, target: Vec3f, up: Vec3f) -> Mat4f {
    let basis = align_z(eye - target, up);

    Mat4f::from_cols(
        basis.x.extend(0.0),
        basis.y.extend(0.0),
        basis.z.extend(0.0),
        eye.extend(1.0),
    )
}

/// Right-handed perspective projection with wgpu's 0..1 depth range.
pub fn perspective(fovy: Rad<f32>, aspect: f32, znear: f32, zfar: f32) -> Mat4f {
    OPENGL_TO_WGPU_MATRIX * cgmath::perspective(fovy, aspect, znear, zfar)
}
