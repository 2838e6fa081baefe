//! Use cases orchestrating a single upstream call each.

mod exchange_token;
mod fetch_index_price;

pub use exchange_token::ExchangeTokenUseCase;
pub use fetch_index_price::FetchIndexPriceUseCase;
