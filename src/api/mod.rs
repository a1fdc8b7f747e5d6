//! Provides clients and utilities for interacting with external APIs.
//!
//! Includes:
//! - `nasa`: Client for api.nasa.gov and the Image and Video Library.

mod nasa;

pub use nasa::*;
