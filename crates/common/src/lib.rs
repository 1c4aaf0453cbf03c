//! Shared value types for the flagflight workspace.
//!
//! Everything here is plain data: no crate in the workspace needs more than
//! `Copy` values to talk to another.

pub mod angle;
pub mod types;

pub use types::{Axis, ControlInput, PlanePart, TextureHandle};
