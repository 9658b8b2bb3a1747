//! Math types and helpers
//!
//! Provides the vector types used throughout the crate.

pub use nalgebra::Vector3;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Check that every component of a vector is finite (not NaN or infinite)
pub fn is_finite(v: &Vec3) -> bool {
    v.iter().all(|c| c.is_finite())
}
