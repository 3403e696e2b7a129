//! Core data: transform math, flattened hierarchies and entity components

pub mod entity;
pub mod hierarchy;
pub mod math;
