//! Application module
//!
//! The App owns the display model and the input state machine, organized
//! into sub-modules for state, key handling, async results and rendering.

pub mod state;

mod async_ops;
mod core;
mod events;
mod rendering;

pub use async_ops::{Job, UiEvent};
pub use core::*;
pub use state::{ContextState, InputMode, SharedContext};
