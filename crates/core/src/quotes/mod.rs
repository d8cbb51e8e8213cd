//! Price gateway for the portfolio engine.
//!
//! - [`quotes_model`] - price bars as consumed by the history summary
//! - [`quotes_traits`] - gateway contracts the engine depends on
//! - [`quote_service`] - gateway implementations over the market-data crate
//!
//! ```text
//! PortfolioService -> PriceGatewayTrait  -> QuoteService     -> MarketDataProvider
//!                  -> FxRateGatewayTrait -> ProviderFxGateway -> ExchangeRateProvider
//! ```

mod quote_service;
mod quotes_model;
mod quotes_traits;

pub use quote_service::{ProviderFxGateway, QuoteService};
pub use quotes_model::PriceBar;
pub use quotes_traits::{FxRateGatewayTrait, PriceGatewayTrait};
