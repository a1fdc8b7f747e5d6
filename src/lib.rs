//! NASA Explorer: an HTTP proxy and terminal dashboard for NASA's public APIs
//! (APOD, Mars Rover Photos, NeoWs, EPIC and the Image and Video Library).

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod server;
pub mod service;
