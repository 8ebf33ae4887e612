//! Model layer
//!
//! - `resource_kind` - resource kinds and the closed set of view identifiers
//! - `records` - typed records decoded from the OpenStack APIs

pub mod records;
pub mod resource_kind;

pub use records::*;
pub use resource_kind::{ResourceKind, ViewId};
