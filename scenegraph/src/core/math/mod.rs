//! Quaternion / vector / vector / scale transform math

mod qvvs;

pub use qvvs::{TransformDelta, TransformQvvs};
