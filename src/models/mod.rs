//! Defines the data structures and models used throughout the application.
//!
//! Upstream payloads are deserialized into typed structs. Structs that are
//! forwarded to clients unchanged keep unknown fields in a flattened `extra`
//! map so nothing NASA sends is dropped on the way through.

mod apod;
mod epic;
mod library;
mod mars;
mod neo;

pub use apod::*;
pub use epic::*;
pub use library::*;
pub use mars::*;
pub use neo::*;
