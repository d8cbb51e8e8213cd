//! Market data models
//!
//! - `quote` - per-session security prices (Quote, SessionRange)
//! - `exchange_rate` - Spot FX rates (ExchangeRate)

mod exchange_rate;
mod quote;

pub use exchange_rate::ExchangeRate;
pub use quote::{Quote, SessionRange};
