// src/blockchain/amount.rs

use crate::error::ValidationError;
use ethers_core::types::U256;

// U256::MAX has 78 decimal digits
const MAX_U256_DIGITS: i64 = 78;

/// Convert a user-facing decimal amount into integer base units.
///
/// Accepts plain decimals (`"1.5"`, `".25"`) and scientific notation
/// (`"1e-7"`, `"2.5E3"`); the exponent shifts the decimal point on the digit
/// string, so no precision is lost. Digits beyond `decimals` are truncated
/// toward zero. A strictly positive amount that truncates to zero is clamped
/// to one base unit, so an accepted amount never encodes a zero-value
/// transaction.
pub fn normalize(amount: &str, decimals: u32) -> Result<U256, ValidationError> {
    let amount = amount.trim();
    let amount = amount.strip_prefix('+').unwrap_or(amount);

    let (mantissa, exponent) = match amount.find(|c: char| c == 'e' || c == 'E') {
        Some(i) => (&amount[..i], parse_exponent(&amount[i + 1..])?),
        None => (amount, 0),
    };

    let (whole, frac) = match mantissa.split_once('.') {
        Some((w, f)) => (w, f),
        None => (mantissa, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(ValidationError::InvalidAmount);
    }
    if !all_digits(whole) || !all_digits(frac) {
        // covers signs, "NaN", "Infinity" and a second '.'
        return Err(ValidationError::InvalidAmount);
    }
    if whole.bytes().chain(frac.bytes()).all(|b| b == b'0') {
        return Err(ValidationError::InvalidAmount);
    }

    let digits = format!("{}{}", whole, frac);
    let leading_zeros = digits.bytes().take_while(|&b| b == b'0').count() as i64;
    // digits that end up left of the base-unit point
    let int_len = whole.len() as i64 + exponent + i64::from(decimals);

    let significant = int_len - leading_zeros;
    if significant <= 0 {
        return Ok(U256::one());
    }
    if significant > MAX_U256_DIGITS {
        return Err(ValidationError::AmountTooLarge);
    }

    let start = leading_zeros as usize;
    let int_len = int_len as usize;
    let integer = if int_len <= digits.len() {
        digits[start..int_len].to_string()
    } else {
        format!("{}{}", &digits[start..], "0".repeat(int_len - digits.len()))
    };

    U256::from_dec_str(&integer).map_err(|_| ValidationError::AmountTooLarge)
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_exponent(exp: &str) -> Result<i64, ValidationError> {
    let unsigned = exp
        .strip_prefix('+')
        .or_else(|| exp.strip_prefix('-'))
        .unwrap_or(exp);
    if unsigned.is_empty() || !all_digits(unsigned) {
        return Err(ValidationError::InvalidAmount);
    }
    // magnitudes this large are infinite or zero as floats
    exp.parse::<i32>()
        .map(i64::from)
        .map_err(|_| ValidationError::InvalidAmount)
}

/// Render a base-unit integer as a decimal string without going through floats.
///
/// - `1_500_000` at 6 decimals => `"1.5"`
/// - `1` at 6 decimals => `"0.000001"`
pub fn format_units(value: U256, decimals: u32) -> String {
    let raw = value.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return raw;
    }

    let padded = if raw.len() <= decimals {
        format!("{}{}", "0".repeat(decimals + 1 - raw.len()), raw)
    } else {
        raw
    };
    let (whole, frac) = padded.split_at(padded.len() - decimals);
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, frac)
    }
}
