//! Fetch Index Price Use Case

use std::sync::Arc;

use crate::application::ports::{IndexPricePort, UpstreamError};
use crate::domain::PriceQuote;

/// Fetches the index price from the market-feed provider.
///
/// Every call goes upstream; nothing is cached between requests.
pub struct FetchIndexPriceUseCase<P>
where
    P: IndexPricePort,
{
    price_feed: Arc<P>,
}

impl<P> FetchIndexPriceUseCase<P>
where
    P: IndexPricePort,
{
    /// Create a new use case.
    pub const fn new(price_feed: Arc<P>) -> Self {
        Self { price_feed }
    }

    /// Execute the use case.
    pub async fn execute(&self) -> Result<PriceQuote, UpstreamError> {
        match self.price_feed.fetch_index_price().await {
            Ok(quote) => {
                tracing::info!(price = quote.price, "Index price fetched");
                Ok(quote)
            }
            Err(e) => {
                tracing::warn!(kind = e.kind().as_str(), error = %e, "Index price fetch failed");
                Err(e)
            }
        }
    }
}
