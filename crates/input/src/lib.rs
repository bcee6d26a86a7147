//! Keyboard and mouse handling for the retrowave demo.
//!
//! Raw winit key codes go in; discrete [`Action`]s and held [`Movement`]s
//! come out.
//!
//! # Invariants
//! - Toggles flip once per physical press, never on key repeat.
//! - The camera only sees mouse motion while the cursor is locked.

pub mod action;
mod state;

pub use action::{Action, Movement};
pub use state::InputState;

pub fn crate_info() -> &'static str {
    "retrowave-input v0.1.0"
}
