//! Index price quotes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The index instrument this service quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexInstrument {
    /// BSE Sensex, as addressed on the NSE market feed.
    #[default]
    Sensex,
}

impl IndexInstrument {
    /// Identifier used in the market-feed `index` query parameter.
    #[must_use]
    pub const fn feed_id(&self) -> &'static str {
        match self {
            Self::Sensex => "NSE:SENSEX",
        }
    }
}

impl std::fmt::Display for IndexInstrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.feed_id())
    }
}

/// Last traded price of an index at the moment it was fetched.
///
/// Recreated on every request; never cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Last traded price.
    pub price: f64,
    /// When the upstream call completed.
    pub fetched_at: DateTime<Utc>,
}

impl PriceQuote {
    /// Create a quote stamped with the current time.
    #[must_use]
    pub fn now(price: f64) -> Self {
        Self {
            price,
            fetched_at: Utc::now(),
        }
    }
}
