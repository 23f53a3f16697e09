//! stockroom-hex: hexagonal inventory API library (core + inbound HTTP)

pub mod config;
pub mod errors;

pub mod application;
pub mod auth;

pub use stockroom_types::{domain, ports};

pub mod inbound; // HTTP adapter (server + handlers)
