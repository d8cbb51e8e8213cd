//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` and `ExchangeRateProvider` traits
//! - Concrete implementations (Yahoo Finance, ExchangeRate-API)
//!
//! The core crate never names a concrete provider; it receives trait
//! objects and treats every failure as "data unavailable".

mod traits;

pub mod exchange_rate_api;
pub mod yahoo;

pub use traits::{ExchangeRateProvider, MarketDataProvider};
