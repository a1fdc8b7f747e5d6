//! Reshaping between NASA's payloads and what the proxy and CLI serve.
//!
//! Everything here is pure except `resolve_videos`, which fetches asset
//! manifests through the client.

mod dates;
mod epic;
mod library;
mod mars;
mod neo;
mod pagination;

pub use dates::*;
pub use epic::*;
pub use library::*;
pub use mars::*;
pub use neo::*;
pub use pagination::*;
