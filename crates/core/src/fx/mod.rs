//! Exchange-rate resolution for converting foreign positions.

mod fx_model;
mod fx_service;

pub use fx_model::{FxQuote, FxRateSource};
pub use fx_service::FxService;
