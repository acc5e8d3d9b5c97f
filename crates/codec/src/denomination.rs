// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Conversion between human-readable token amounts and integer planck values.

use crate::error::DenominationError;
use primitive_types::U256;
use serde::{Serialize, Serializer};

/// Largest power of ten that fits in a `U256`.
const MAX_DECIMALS: u32 = 77;

/// A unit the user may enter amounts in.
///
/// `multiplier` is the number of planck in one unit and always equals
/// `10^max_decimals`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Denomination {
    pub label: String,
    #[serde(serialize_with = "serialize_decimal")]
    pub multiplier: U256,
    pub max_decimals: u32,
}

fn serialize_decimal<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string())
}

fn pow10(exponent: u32) -> U256 {
    (0..exponent).fold(U256::one(), |acc, _| acc * U256::from(10u8))
}

impl Denomination {
    pub fn new(label: impl Into<String>, decimals: u32) -> Self {
        let decimals = decimals.min(MAX_DECIMALS);
        Denomination {
            label: label.into(),
            multiplier: pow10(decimals),
            max_decimals: decimals,
        }
    }
}

/// Units offered for a chain token: the full unit first, then the milli unit when
/// the token has at least three decimals, then `planck`.
pub fn get_denominations(symbol: &str, decimals: u32) -> Vec<Denomination> {
    let decimals = decimals.min(MAX_DECIMALS);
    let mut denominations = vec![Denomination::new(symbol, decimals)];
    if decimals >= 3 {
        denominations.push(Denomination::new(format!("m{symbol}"), decimals - 3));
    }
    denominations.push(Denomination::new("planck", 0));
    denominations
}

/// Convert a decimal amount in `denomination` to an integer planck string.
///
/// Fractional digits beyond the denomination's precision are rejected rather than
/// rounded. Surrounding whitespace is not accepted.
pub fn to_planck(amount: &str, denomination: &Denomination) -> Result<String, DenominationError> {
    let invalid = || DenominationError::InvalidAmount(amount.to_string());

    let (whole, fraction) = match amount.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (amount, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) {
        return Err(invalid());
    }

    let max = denomination.max_decimals;
    if fraction.len() > max as usize {
        return Err(DenominationError::TooManyDecimals {
            found: fraction.len(),
            max,
        });
    }

    let overflow = || DenominationError::Overflow(amount.to_string());
    let parse = |digits: &str| {
        if digits.is_empty() {
            Ok(U256::zero())
        } else {
            U256::from_dec_str(digits).map_err(|_| overflow())
        }
    };

    let whole = parse(whole)?;
    let padded = format!("{fraction:0<width$}", width = max as usize);
    let fraction = parse(&padded)?;

    let planck = whole
        .checked_mul(denomination.multiplier)
        .and_then(|w| w.checked_add(fraction))
        .ok_or_else(overflow)?;
    Ok(planck.to_string())
}

/// Render an integer planck string as a decimal amount in `denomination`.
///
/// Trailing fractional zeros are dropped. Input that is not a non-negative integer
/// renders as `"0"`.
pub fn from_planck(planck: &str, denomination: &Denomination) -> String {
    if planck.is_empty() || !planck.chars().all(|c| c.is_ascii_digit()) {
        return "0".to_string();
    }
    let Ok(value) = U256::from_dec_str(planck) else {
        return "0".to_string();
    };

    let whole = value / denomination.multiplier;
    let remainder = value % denomination.multiplier;
    if remainder.is_zero() {
        return whole.to_string();
    }

    let fraction = format!(
        "{:0>width$}",
        remainder.to_string(),
        width = denomination.max_decimals as usize
    );
    format!("{whole}.{}", fraction.trim_end_matches('0'))
}
