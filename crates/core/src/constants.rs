use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Decimal places kept on every monetary and percentage output
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Home currency used when none is configured
pub const DEFAULT_HOME_CURRENCY: &str = "TWD";

/// Foreign currency used when none is configured
pub const DEFAULT_FOREIGN_CURRENCY: &str = "USD";

/// Suffix appended to domestic symbols when addressing the price feed
pub const DEFAULT_DOMESTIC_SYMBOL_SUFFIX: &str = ".TW";

/// Foreign-to-home rate used when the live FX source is unreachable
pub const DEFAULT_FALLBACK_FX_RATE: Decimal = dec!(30);

/// Look-back window for price history, roughly six months
pub const DEFAULT_HISTORY_LOOKBACK_DAYS: u32 = 182;

/// Largest accepted transaction price. Keeps price x quantity of one trade
/// well inside the `Decimal` range.
pub const MAX_TRANSACTION_PRICE: Decimal = dec!(1_000_000_000_000);

/// Ceiling on the summed magnitudes of all valued amounts in one run, so
/// portfolio totals and their ratios cannot overflow.
pub const MAX_VALUATION_TOTAL: Decimal = dec!(100_000_000_000_000_000_000);
