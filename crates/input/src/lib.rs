//! Input: keyboard state mapped onto flight controls and scene actions.
//!
//! # Invariants
//! - The kernel consumes [`ControlInput`] and [`Action`], never raw keys.
//! - A held key stays held until its release event, whatever arrives between.

pub mod action;
pub mod script;

pub use action::{Action, Control, InputState, Key, KeyEvent};
pub use flagflight_common::ControlInput;
pub use script::{FlightScript, ScriptError, Segment};

pub fn crate_info() -> &'static str {
    "flagflight-input v0.1.0"
}
