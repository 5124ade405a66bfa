//! Commands Layer
//!
//! The session object a host drives: board gestures plus row/tier edits.

mod board_cmd;
mod registry_cmd;

pub use board_cmd::TierBoard;
