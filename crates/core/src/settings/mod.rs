//! Settings module - currency pair, feed addressing and fallbacks.

mod settings_model;

pub use settings_model::PortfolioSettings;
