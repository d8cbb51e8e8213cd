use std::sync::Arc;

use log::{debug, warn};
use rust_decimal::Decimal;

use super::fx_model::{FxQuote, FxRateSource};
use crate::quotes::FxRateGatewayTrait;

/// Resolves the foreign-to-home rate for a refresh, falling back to a
/// configured constant when the live source is unavailable.
pub struct FxService {
    gateway: Arc<dyn FxRateGatewayTrait>,
    fallback_rate: Decimal,
}

impl FxService {
    pub fn new(gateway: Arc<dyn FxRateGatewayTrait>, fallback_rate: Decimal) -> Self {
        Self {
            gateway,
            fallback_rate,
        }
    }

    /// Returns the live rate, or the fallback rate tagged as such.
    ///
    /// A non-positive live rate is treated as a failure. Identical currencies
    /// resolve to 1 without calling the gateway.
    pub async fn resolve(&self, from: &str, to: &str) -> FxQuote {
        if from.eq_ignore_ascii_case(to) {
            return FxQuote {
                rate: Decimal::ONE,
                from: from.to_string(),
                to: to.to_string(),
                source: FxRateSource::Live,
                fallback_reason: None,
            };
        }

        let reason = match self.gateway.get_fx_rate(from, to).await {
            Ok(rate) if rate > Decimal::ZERO => {
                debug!("Resolved {}/{} at {}", from, to, rate);
                return FxQuote {
                    rate,
                    from: from.to_string(),
                    to: to.to_string(),
                    source: FxRateSource::Live,
                    fallback_reason: None,
                };
            }
            Ok(rate) => format!("live source returned non-positive rate {}", rate),
            Err(e) => e.to_string(),
        };

        warn!(
            "Using fallback {}/{} rate {}: {}",
            from, to, self.fallback_rate, reason
        );
        FxQuote {
            rate: self.fallback_rate,
            from: from.to_string(),
            to: to.to_string(),
            source: FxRateSource::Fallback,
            fallback_reason: Some(reason),
        }
    }
}
