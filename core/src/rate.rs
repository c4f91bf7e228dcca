//! Display-only output estimate. The contract decides actual settlement amounts.

use crate::types::Token;

/// Native units per volatile-rate step.
pub const NATIVE_PER_STEP: f64 = 0.001;
/// Volatile units per volatile-rate step.
pub const VOLATILE_PER_STEP: f64 = 8.333333333;

/// Decimal places shown in the estimated output.
pub const ESTIMATE_PLACES: usize = 6;

fn to_native(token: &Token, amount: f64) -> f64 {
    if token.is_volatile() {
        (amount / VOLATILE_PER_STEP) * NATIVE_PER_STEP
    } else {
        amount
    }
}

fn from_native(token: &Token, amount: f64) -> f64 {
    if token.is_volatile() {
        (amount / NATIVE_PER_STEP) * VOLATILE_PER_STEP
    } else {
        amount
    }
}

/// Converts `amount` of `input` into `output` at the fixed rates. Native and stable tokens
/// trade 1:1; the volatile token is priced against the native asset, and every other pair is
/// routed through the native value.
pub fn convert(input: &Token, output: &Token, amount: f64) -> f64 {
    if input.symbol == output.symbol {
        return amount;
    }
    from_native(output, to_native(input, amount))
}

/// Returns the estimate formatted for the read-only output field. Empty or unparsable input
/// shows as zero.
pub fn estimate_output(input: &Token, output: &Token, amount: &str) -> String {
    let value = amount
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
        .map(|value| convert(input, output, value))
        .unwrap_or_default();

    format!("{value:.places$}", places = ESTIMATE_PLACES)
}
