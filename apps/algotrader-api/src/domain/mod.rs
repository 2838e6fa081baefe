//! Domain layer.
//!
//! Pure types and normalization rules with no I/O:
//!
//! - `market_data`: index price quotes and the fixed instrument
//! - `price_extraction`: ordered synonym lookup over loosely-typed payloads
//! - `oauth`: token exchange request/result types

pub mod market_data;
pub mod oauth;
pub mod price_extraction;

pub use market_data::{IndexInstrument, PriceQuote};
pub use oauth::{
    AUTHORIZATION_CODE_GRANT, InvalidTokenRequest, TokenExchangeRequest, TokenExchangeResult,
};
pub use price_extraction::{PRICE_FIELD_SYNONYMS, PriceExtractionError, extract_price};
