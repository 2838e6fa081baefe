//! Application layer.
//!
//! Ports describe the two upstream providers; use cases run exactly one
//! port call per inbound request.

pub mod ports;
pub mod use_cases;
