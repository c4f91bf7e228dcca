use crate::error::Error;
use alloy_primitives::U256;
use leptos::prelude::window;

pub fn alert(msg: impl AsRef<str>) {
    let _ = window().alert_with_message(msg.as_ref());
}

pub fn confirm(msg: impl AsRef<str>) -> bool {
    window()
        .confirm_with_message(msg.as_ref())
        .unwrap_or(false)
}

pub fn shorten_address(address: impl ToString) -> String {
    let address = address.to_string();
    if address.len() > 8 {
        format!("{}...{}", &address[..4], &address[address.len() - 4..])
    } else {
        address // Return the address as is if it's too short to shorten
    }
}

/// Formats a base-unit amount with all significant decimals, trailing zeros trimmed.
pub fn display_token_amount(amount: U256, decimals: u8) -> String {
    let digits = amount.to_string();
    let decimals = decimals as usize;

    if decimals == 0 {
        return digits;
    }

    let padded = format!("{digits:0>width$}", width = decimals + 1);
    let (integer_part, fractional_part) = padded.split_at(padded.len() - decimals);

    // Trim trailing zeros for a cleaner display
    let trimmed_fractional = fractional_part.trim_end_matches('0');

    if trimmed_fractional.is_empty() {
        integer_part.to_string()
    } else {
        format!("{integer_part}.{trimmed_fractional}")
    }
}

/// Formats a base-unit amount with exactly `places` decimals. Extra precision is truncated,
/// never rounded up.
pub fn format_token_amount(amount: U256, decimals: u8, places: usize) -> String {
    let full = display_token_amount(amount, decimals);
    let (integer_part, fractional_part) = full.split_once('.').unwrap_or((&full, ""));

    if places == 0 {
        return integer_part.to_string();
    }

    let mut fractional_str: String = fractional_part.chars().take(places).collect();
    fractional_str.push_str(&"0".repeat(places - fractional_str.len()));

    format!("{integer_part}.{fractional_str}")
}

/// Parses a decimal string like `"1.5"` into base units. Digits beyond `decimals` are
/// truncated.
pub fn parse_token_amount(amount: impl AsRef<str>, decimals: u8) -> Result<U256, Error> {
    let amount = amount.as_ref().trim().replace(',', ".");
    let decimals = decimals as usize;

    let (whole_part, fractional_part) = amount.split_once('.').unwrap_or((&amount, ""));

    let is_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if (whole_part.is_empty() && fractional_part.is_empty())
        || !is_digits(whole_part)
        || !is_digits(fractional_part)
    {
        return Err(Error::InvalidAmount);
    }

    // Pad or truncate the fractional part to match the precision
    let mut decimal_str = fractional_part.to_string();
    if decimal_str.len() > decimals {
        decimal_str.truncate(decimals);
    } else {
        decimal_str.push_str(&"0".repeat(decimals - decimal_str.len()));
    }

    let digits = format!("{whole_part}{decimal_str}");
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }

    U256::from_str_radix(&digits, 10).map_err(|_| Error::InvalidAmount)
}
