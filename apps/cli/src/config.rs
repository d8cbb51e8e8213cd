use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use stockfolio_core::settings::PortfolioSettings;

const DEFAULT_LEDGER_PATH: &str = "my_portfolio.json";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

pub struct Config {
    pub ledger_path: PathBuf,
    pub settings: PortfolioSettings,
    pub request_timeout: Duration,
    pub log_format: String,
    /// Values that could not be parsed and were replaced by defaults
    pub issues: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut issues = Vec::new();
        let defaults = PortfolioSettings::default();

        let text = |key: &str, default: &str| -> String {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let ledger_path = PathBuf::from(text("STOCKFOLIO_LEDGER_PATH", DEFAULT_LEDGER_PATH));
        let home_currency =
            text("STOCKFOLIO_HOME_CURRENCY", &defaults.home_currency).to_uppercase();
        let foreign_currency =
            text("STOCKFOLIO_FOREIGN_CURRENCY", &defaults.foreign_currency).to_uppercase();
        // An explicitly empty suffix is allowed
        let domestic_symbol_suffix = lookup("STOCKFOLIO_DOMESTIC_SUFFIX")
            .map(|v| v.trim().to_string())
            .unwrap_or(defaults.domestic_symbol_suffix);

        let fallback_fx_rate = parse_or_default(
            &lookup,
            "STOCKFOLIO_FALLBACK_FX_RATE",
            defaults.fallback_fx_rate,
            &mut issues,
        );
        let history_lookback_days = parse_or_default(
            &lookup,
            "STOCKFOLIO_HISTORY_DAYS",
            defaults.history_lookback_days,
            &mut issues,
        );
        let timeout_ms = parse_or_default(
            &lookup,
            "STOCKFOLIO_REQUEST_TIMEOUT_MS",
            DEFAULT_REQUEST_TIMEOUT_MS,
            &mut issues,
        );

        Self {
            ledger_path,
            settings: PortfolioSettings {
                home_currency,
                foreign_currency,
                domestic_symbol_suffix,
                fallback_fx_rate,
                history_lookback_days,
            },
            request_timeout: Duration::from_millis(timeout_ms),
            log_format: text("STOCKFOLIO_LOG_FORMAT", "text"),
            issues,
        }
    }
}

fn parse_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
    issues: &mut Vec<String>,
) -> T
where
    T: FromStr + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse().unwrap_or_else(|_| {
            issues.push(format!("invalid {}={:?}, using {}", key, raw, default));
            default
        }),
        _ => default,
    }
}
