//! Index Price Port (Driven Port)
//!
//! Interface for fetching the last traded price of the quoted index.

use async_trait::async_trait;

use crate::domain::PriceQuote;

use super::UpstreamError;

/// Port for the market-feed provider.
#[async_trait]
pub trait IndexPricePort: Send + Sync {
    /// Fetch the current index price with a single outbound call.
    async fn fetch_index_price(&self) -> Result<PriceQuote, UpstreamError>;
}
