//! HTTP/REST API adapter.
//!
//! Inbound adapter exposing the proxy endpoints and delegating to the use cases.

mod controller;
mod request;
mod response;
mod server;

pub use controller::{AppState, create_router};
pub use request::*;
pub use response::*;
pub use server::{HttpServer, ServerError};
