//! TUI view components
//!
//! Each component renders one region of the screen from the display model.

mod detail;
mod footer;
mod header;
pub mod helpers;
mod prompt;
mod resource_list;

pub use detail::*;
pub use footer::*;
pub use header::*;
pub use prompt::*;
pub use resource_list::*;
