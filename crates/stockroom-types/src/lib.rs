//! stockroom-types: domain model and repository ports for the inventory API.

pub mod domain;
pub mod ports;
