pub mod aggregate;
pub mod history;
pub mod portfolio_service;
pub mod valuation;


pub use aggregate::*;
pub use history::*;
pub use portfolio_service::{PortfolioReport, PortfolioService};
pub use valuation::*;
