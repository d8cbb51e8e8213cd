//! Stockfolio Market Data Crate
//!
//! Provider-agnostic price and exchange-rate fetching for Stockfolio.
//!
//! # Overview
//!
//! - [`MarketDataProvider`] - latest and historical security quotes
//! - [`ExchangeRateProvider`] - latest spot FX rates
//! - [`YahooProvider`] - Yahoo Finance implementation of `MarketDataProvider`
//! - [`ExchangeRateApiProvider`] - exchangerate-api.com implementation of
//!   `ExchangeRateProvider`
//!
//! ```text
//! +------------------+      +---------------------+
//! | stockfolio-core  | ---> | MarketDataProvider  | ---> Yahoo Finance
//! |  (QuoteService,  |      +---------------------+
//! |   FxService)     | ---> | ExchangeRateProvider| ---> exchangerate-api
//! +------------------+      +---------------------+
//! ```

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{ExchangeRate, Quote, SessionRange};
pub use provider::exchange_rate_api::ExchangeRateApiProvider;
pub use provider::yahoo::YahooProvider;
pub use provider::{ExchangeRateProvider, MarketDataProvider};
