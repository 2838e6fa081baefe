//! Ports (interfaces) for external systems.

mod index_price_port;
mod token_exchange_port;
mod upstream_error;

pub use index_price_port::IndexPricePort;
pub use token_exchange_port::TokenExchangePort;
pub use upstream_error::{UpstreamError, UpstreamFailureKind, UpstreamProvider};
