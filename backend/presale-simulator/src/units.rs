//! Decimal amount strings ("0.3") to and from integer base units.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitsError {
    #[error("invalid amount `{0}`")]
    Invalid(String),
    #[error("amount `{amount}` has more than {decimals} decimal places")]
    TooPrecise { amount: String, decimals: u32 },
    #[error("amount `{0}` does not fit in 128 bits")]
    Overflow(String),
}

/// Scale a decimal string by `10^decimals`, e.g. `parse_units("0.3", 18)`.
pub fn parse_units(amount: &str, decimals: u32) -> Result<i128, UnitsError> {
    let text = amount.trim();
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return Err(UnitsError::Invalid(amount.to_string()));
    }
    if fraction.len() > decimals as usize {
        return Err(UnitsError::TooPrecise {
            amount: amount.to_string(),
            decimals,
        });
    }

    let overflow = || UnitsError::Overflow(amount.to_string());
    let scale = 10i128.checked_pow(decimals).ok_or_else(overflow)?;
    let whole: i128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| overflow())?
    };
    let fraction: i128 = if fraction.is_empty() {
        0
    } else {
        let padding = 10i128
            .checked_pow(decimals - fraction.len() as u32)
            .ok_or_else(overflow)?;
        fraction
            .parse::<i128>()
            .map_err(|_| overflow())?
            .checked_mul(padding)
            .ok_or_else(overflow)?
    };

    let value = whole
        .checked_mul(scale)
        .and_then(|v| v.checked_add(fraction))
        .ok_or_else(overflow)?;
    Ok(if negative { -value } else { value })
}

/// Inverse of [`parse_units`], without trailing zeros.
pub fn format_units(amount: i128, decimals: u32) -> String {
    let Some(scale) = 10u128.checked_pow(decimals) else {
        return amount.to_string();
    };
    let sign = if amount < 0 { "-" } else { "" };
    let magnitude = amount.unsigned_abs();
    let whole = magnitude / scale;
    let fraction = magnitude % scale;
    if fraction == 0 {
        return format!("{sign}{whole}");
    }
    let fraction = format!("{fraction:0width$}", width = decimals as usize);
    format!("{sign}{whole}.{}", fraction.trim_end_matches('0'))
}
