//! # Math Module
//!
//! Value-typed linear algebra used by the mesh pipeline and the camera.
//!
//! The vector, quaternion and matrix types are the `cgmath` types used across
//! the rest of the crate; this module names them and adds the pieces `cgmath`
//! does not provide in the exact form the mesh pipeline needs:
//!
//! - [`VectorExt::normalized_or`] - normalization with an explicit fallback for
//!   near-zero vectors, so no call site ever divides by a zero length
//! - [`VectorExt::reject`] - Gram-Schmidt rejection of one vector from another
//! - [`Approx`] - epsilon comparisons for scalars, vectors and quaternions
//! - [`transform`] - block-method inverse, look-at / align-z with a degenerate
//!   up fallback, and a wgpu-ready perspective projection

pub mod transform;

pub use transform::{align_z, inverted, look_at, perspective, OPENGL_TO_WGPU_MATRIX};

use cgmath::{InnerSpace, Quaternion, Vector2, Vector3, Vector4, Zero};

pub type Vec2f = Vector2<f32>;
pub type Vec3f = Vector3<f32>;
pub type Vec4f = Vector4<f32>;
pub type Quatf = Quaternion<f32>;
pub type Mat3f = cgmath::Matrix3<f32>;
pub type Mat4f = cgmath::Matrix4<f32>;

/// Lengths at or below this are treated as zero by [`VectorExt::normalized_or`].
pub const NORMALIZE_EPSILON: f32 = 1e-5;

/// Extra operations for `cgmath` vectors.
pub trait VectorExt: InnerSpace<Scalar = f32> + Zero {
    /// Returns `self / |self|`, or `fallback` when `|self| <= NORMALIZE_EPSILON`.
    fn normalized_or(self, fallback: Self) -> Self {
        let length = self.magnitude();
        if length <= NORMALIZE_EPSILON {
            fallback
        } else {
            self / length
        }
    }

    /// Same as [`normalized_or`](Self::normalized_or) with the zero vector as fallback.
    fn normalized_or_zero(self) -> Self {
        self.normalized_or(Self::zero())
    }

    /// Removes the component of `self` that lies along `onto`.
    ///
    /// Rejecting from a zero vector returns `self` unchanged.
    fn reject(self, onto: Self) -> Self {
        let denominator = onto.magnitude2();
        if denominator == 0.0 {
            return self;
        }
        self - onto * (self.dot(onto) / denominator)
    }
}

impl VectorExt for Vec2f {}
impl VectorExt for Vec3f {}
impl VectorExt for Vec4f {}

/// Epsilon comparisons.
pub trait Approx {
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
    fn approx_zero(&self, epsilon: f32) -> bool;
}

impl Approx for f32 {
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() <= epsilon
    }

    fn approx_zero(&self, epsilon: f32) -> bool {
        self.abs() <= epsilon
    }
}

macro_rules! impl_approx {
    ($($ty:ty => [$($field:ident),+]);+ $(;)?) => {
        $(
            impl Approx for $ty {
                fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
                    $(self.$field.approx_eq(&other.$field, epsilon))&&+
                }

                fn approx_zero(&self, epsilon: f32) -> bool {
                    $(self.$field.approx_zero(epsilon))&&+
                }
            }
        )+
    };
}

impl_approx! {
    Vec2f => [x, y];
    Vec3f => [x, y, z];
    Vec4f => [x, y, z, w];
    Quatf => [v, s];
}

impl Approx for Mat4f {
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.x.approx_eq(&other.x, epsilon)
            && self.y.approx_eq(&other.y, epsilon)
            && self.z.approx_eq(&other.z, epsilon)
            && self.w.approx_eq(&other.w, epsilon)
    }

    fn approx_zero(&self, epsilon: f32) -> bool {
        self.x.approx_zero(epsilon)
            && self.y.approx_zero(epsilon)
            && self.z.approx_zero(epsilon)
            && self.w.approx_zero(epsilon)
    }
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Where `value` sits between `a` and `b`, as a fraction.
///
/// An empty range (`a == b`) maps everything to `0.0`.
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    let range = b - a;
    if range == 0.0 {
        0.0
    } else {
        (value - a) / range
    }
}

/// Component-wise minimum.
pub fn min_components(a: Vec3f, b: Vec3f) -> Vec3f {
    Vec3f::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z))
}

/// Component-wise maximum.
pub fn max_components(a: Vec3f, b: Vec3f) -> Vec3f {
    Vec3f::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_zero_returns_fallback() {
        let zero = Vec3f::zero();
        let normalized = zero.normalized_or_zero();
        assert_eq!(normalized, Vec3f::zero());
        assert!(normalized.x.is_finite() && normalized.y.is_finite() && normalized.z.is_finite());

        let fallback = Vec3f::unit_y();
        assert_eq!(zero.normalized_or(fallback), fallback);
        assert_eq!(Vec3f::new(1e-6, 0.0, 0.0).normalized_or(fallback), fallback);
    }

    #[test]
    fn test_normalize_regular_vector() {
        let v = Vec3f::new(3.0, 0.0, 4.0).normalized_or_zero();
        assert!(v.approx_eq(&Vec3f::new(0.6, 0.0, 0.8), 1e-6));
    }

    #[test]
    fn test_reject_removes_parallel_component() {
        let v = Vec3f::new(1.0, 2.0, 3.0);
        let n = Vec3f::new(0.0, 0.0, 2.0);
        let rejected = v.reject(n);
        assert!(rejected.approx_eq(&Vec3f::new(1.0, 2.0, 0.0), 1e-6));
        assert_eq!(v.reject(Vec3f::zero()), v);
    }

    #[test]
    fn test_approx_comparisons() {
        assert!(Vec2f::new(1.0, 2.0).approx_eq(&Vec2f::new(1.0005, 2.0), 1e-3));
        assert!(!Vec4f::new(1.0, 2.0, 3.0, 4.0).approx_eq(&Vec4f::new(1.0, 2.0, 3.0, 4.1), 1e-3));
        assert!(Quatf::new(1.0, 0.0, 0.0, 0.0).approx_eq(&Quatf::new(1.0, 0.0, 1e-7, 0.0), 1e-5));
        assert!(Vec3f::new(1e-6, -1e-6, 0.0).approx_zero(1e-5));
    }

    #[test]
    fn test_inverse_lerp() {
        assert_eq!(inverse_lerp(0.0, 10.0, 2.5), 0.25);
        assert_eq!(inverse_lerp(-1.0, 1.0, 1.0), 1.0);
        assert_eq!(inverse_lerp(3.0, 3.0, 3.0), 0.0);
        assert_eq!(lerp(2.0, 4.0, inverse_lerp(2.0, 4.0, 3.0)), 3.0);
    }
}
