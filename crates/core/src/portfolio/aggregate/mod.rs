//! Portfolio aggregation: totals, rankings and distribution.

mod aggregate_calculator;
mod aggregate_model;

pub use aggregate_calculator::*;
pub use aggregate_model::*;
