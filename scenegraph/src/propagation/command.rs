//! Write commands consumed by the propagation engine
//!
//! Every public mutation funnels into one [`WriteCommand`]: a target index, the
//! space the payload is expressed in, and a [`TransformWrite`] naming which
//! fields change and how.

use crate::core::math::{TransformDelta, TransformQvvs};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Frame a write's payload is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Space {
    /// Relative to the target's live parent
    Local,
    /// The common reference frame
    World,
}

/// Which fields a write changes, and whether it replaces or accumulates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TransformWrite {
    /// Replace the position
    SetPosition(Vec3),
    /// Replace the rotation
    SetRotation(Quat),
    /// Replace the uniform scale
    SetScale(f32),
    /// Replace the stretch
    SetStretch(Vec3),
    /// Replace every field
    SetTransform(TransformQvvs),
    /// Add to the position
    DeltaPosition(Vec3),
    /// Rotate by the given quaternion, applied after the current rotation
    DeltaRotation(Quat),
    /// Multiply the uniform scale
    DeltaScale(f32),
    /// Add to the stretch
    DeltaStretch(Vec3),
    /// Apply a full delta to every field
    DeltaTransform(TransformDelta),
}

impl TransformWrite {
    /// Apply this write to `target`, leaving unspecified fields as they are
    pub fn apply(&self, target: &TransformQvvs) -> TransformQvvs {
        let mut result = *target;
        match *self {
            TransformWrite::SetPosition(position) => result.position = position,
            TransformWrite::SetRotation(rotation) => result.rotation = rotation.normalize(),
            TransformWrite::SetScale(scale) => result.scale = scale,
            TransformWrite::SetStretch(stretch) => result.stretch = stretch,
            TransformWrite::SetTransform(transform) => {
                result = TransformQvvs {
                    rotation: transform.rotation.normalize(),
                    ..transform
                }
            }
            TransformWrite::DeltaPosition(delta) => result.position += delta,
            TransformWrite::DeltaRotation(delta) => {
                result.rotation = (delta * result.rotation).normalize()
            }
            TransformWrite::DeltaScale(factor) => result.scale *= factor,
            TransformWrite::DeltaStretch(delta) => result.stretch += delta,
            TransformWrite::DeltaTransform(delta) => result = target.apply_delta(&delta),
        }
        result
    }
}

/// One mutation of one node in a hierarchy array
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WriteCommand {
    /// Index of the target node
    pub index: u32,
    /// Frame the payload is expressed in
    pub space: Space,
    /// The change to make
    pub write: TransformWrite,
}

impl WriteCommand {
    /// Create a new command
    pub fn new(index: u32, space: Space, write: TransformWrite) -> Self {
        Self {
            index,
            space,
            write,
        }
    }

    /// Compute the target's new absolute transform.
    ///
    /// `parent` is the absolute transform of the target's live parent. Without
    /// one, local space is world space.
    pub fn resolve(&self, current: &TransformQvvs, parent: Option<&TransformQvvs>) -> TransformQvvs {
        match (self.space, parent) {
            (Space::Local, Some(parent)) => {
                let local = parent.inverse_mul(current);
                parent.mul(&self.write.apply(&local))
            }
            _ => self.write.apply(current),
        }
    }
}
