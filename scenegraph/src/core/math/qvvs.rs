//! Absolute and local transforms built on glam
//!
//! A [`TransformQvvs`] carries rotation, position, a per-axis stretch and a
//! uniform scale. Composition inherits rotation, position and uniform scale
//! from the parent; stretch only affects the parent's own frame (it scales the
//! child's offset) and is never inherited, so composition stays free of shear
//! and always has an exact inverse.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Rotation, position, stretch and uniform scale
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TransformQvvs {
    /// Rotation quaternion, kept normalized
    pub rotation: Quat,
    /// Position
    pub position: Vec3,
    /// Secondary per-axis scale, not inherited by children
    pub stretch: Vec3,
    /// Uniform scale, positive by convention
    pub scale: f32,
}

impl Default for TransformQvvs {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TransformQvvs {
    /// The identity transform
    pub const IDENTITY: Self = Self {
        rotation: Quat::IDENTITY,
        position: Vec3::ZERO,
        stretch: Vec3::ONE,
        scale: 1.0,
    };

    /// Create a transform with the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Create a transform with the given position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation: rotation.normalize(),
            ..Self::IDENTITY
        }
    }

    /// Create a transform from all four fields
    pub fn new(position: Vec3, rotation: Quat, scale: f32, stretch: Vec3) -> Self {
        Self {
            rotation: rotation.normalize(),
            position,
            stretch,
            scale,
        }
    }

    /// Set the uniform scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the stretch
    pub fn with_stretch(mut self, stretch: Vec3) -> Self {
        self.stretch = stretch;
        self
    }

    /// Compose `self` (a parent's absolute transform) with `local`,
    /// producing the child's absolute transform
    pub fn mul(&self, local: &TransformQvvs) -> TransformQvvs {
        TransformQvvs {
            rotation: (self.rotation * local.rotation).normalize(),
            position: self.position
                + self.rotation * (local.position * self.stretch * self.scale),
            stretch: local.stretch,
            scale: self.scale * local.scale,
        }
    }

    /// Express `absolute` relative to `self`, the inverse of [`TransformQvvs::mul`]
    ///
    /// `self.mul(&self.inverse_mul(&absolute)) == absolute` within float tolerance
    /// while `self` has no zero scale or stretch axis. A zero axis cannot be
    /// undone; the local value along it is 0.
    pub fn inverse_mul(&self, absolute: &TransformQvvs) -> TransformQvvs {
        let inverse_rotation = self.rotation.conjugate();
        let extent = self.stretch * self.scale;
        let inverse_extent = Vec3::select(extent.cmpeq(Vec3::ZERO), Vec3::ZERO, extent.recip());
        let inverse_scale = if self.scale == 0.0 { 0.0 } else { self.scale.recip() };
        TransformQvvs {
            rotation: (inverse_rotation * absolute.rotation).normalize(),
            position: (inverse_rotation * (absolute.position - self.position)) * inverse_extent,
            stretch: absolute.stretch,
            scale: absolute.scale * inverse_scale,
        }
    }

    /// Apply a full delta field by field
    pub fn apply_delta(&self, delta: &TransformDelta) -> TransformQvvs {
        TransformQvvs {
            rotation: (delta.rotation * self.rotation).normalize(),
            position: self.position + delta.position,
            stretch: self.stretch + delta.stretch,
            scale: self.scale * delta.scale,
        }
    }

    /// Approximate equality; `q` and `-q` count as the same rotation
    pub fn abs_diff_eq(&self, other: &TransformQvvs, max_abs_diff: f32) -> bool {
        self.position.abs_diff_eq(other.position, max_abs_diff)
            && self.stretch.abs_diff_eq(other.stretch, max_abs_diff)
            && (self.scale - other.scale).abs() <= max_abs_diff
            && self.rotation.dot(other.rotation).abs() >= 1.0 - max_abs_diff
    }
}

/// A change applied to every field of a transform at once
///
/// Position and stretch are added, rotation is composed on the left and scale
/// is multiplied. The default is the no-op delta.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TransformDelta {
    /// Added to the position
    pub position: Vec3,
    /// Composed on the left of the rotation
    pub rotation: Quat,
    /// Multiplies the uniform scale
    pub scale: f32,
    /// Added to the stretch
    pub stretch: Vec3,
}

impl Default for TransformDelta {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
            stretch: Vec3::ZERO,
        }
    }
}

impl TransformDelta {
    /// A delta that only translates
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// A delta that only rotates
    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            rotation: rotation.normalize(),
            ..Default::default()
        }
    }

    /// The delta that undoes this one
    pub fn inverse(&self) -> TransformDelta {
        TransformDelta {
            position: -self.position,
            rotation: self.rotation.conjugate(),
            scale: 1.0 / self.scale,
            stretch: -self.stretch,
        }
    }
}
