//! Terminal front end: one-shot query subcommands, rendered tables and an
//! interactive menu, all built on the same client and reshaping layer as the
//! HTTP server.

mod commands;
mod display;
mod interactive;

pub use commands::*;
pub use interactive::run_interactive;
