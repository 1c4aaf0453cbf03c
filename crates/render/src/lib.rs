//! Rendering adapter: everything a draw loop reads from the scene each frame.
//!
//! # Invariants
//! - Rendering never mutates the scene; a [`FrameView`] is captured after the
//!   update and is read-only from then on.
//! - The flag uniform block uses the same wave formula inputs as the kernel.
//!
//! The GPU backend itself lives outside this workspace. [`DebugTextRenderer`]
//! implements the [`Renderer`] trait for headless runs and tests.

mod light;
mod renderer;
mod uniforms;

pub use light::{
    PLANE_LIGHT_DIRECTIONS, PLANE_LIGHT_PARTS, PLANE_LIGHT_POSITIONS, PlaneLight, SceneLight,
};
pub use renderer::{DebugTextRenderer, FrameView, PartView, RenderMode, Renderer};
pub use uniforms::FlagUniforms;

pub fn crate_info() -> &'static str {
    "flagflight-render v0.1.0"
}
