//! Money

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use thiserror::Error;

/// Errors raised while configuring money display.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// An amount grew past what a [`Decimal`] can hold.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("amount is too large to represent")]
pub struct AmountOverflow;

/// Round to whole minor units, halves away from zero.
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Sum `amounts` without overflowing.
///
/// # Errors
///
/// Returns [`AmountOverflow`] if the sum does not fit in a [`Decimal`].
pub fn checked_total(
    amounts: impl IntoIterator<Item = Decimal>,
) -> Result<Decimal, AmountOverflow> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
        .ok_or(AmountOverflow)
}

/// Look up a supported ISO currency by its alphabetic code (case-insensitive).
///
/// # Errors
///
/// Returns [`MoneyError::UnknownCurrency`] for anything other than GBP, USD or EUR.
pub fn parse_currency(code: &str) -> Result<&'static Currency, MoneyError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        _ => Err(MoneyError::UnknownCurrency(code.to_string())),
    }
}

/// Format an amount in the given currency, e.g. `£4.00`.
///
/// Amounts too large to express in minor units fall back to a plain two-place decimal.
pub fn format_amount(amount: Decimal, currency: &'static Currency) -> String {
    to_minor_units(amount).map_or_else(
        || format!("{amount:.2}"),
        |minor| Money::from_minor(minor, currency).to_string(),
    )
}

fn to_minor_units(amount: Decimal) -> Option<i64> {
    amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_currency_accepts_supported_codes() -> Result<(), MoneyError> {
        assert_eq!(parse_currency("GBP")?, GBP);
        assert_eq!(parse_currency("usd")?, USD);
        assert_eq!(parse_currency(" Eur ")?, EUR);

        Ok(())
    }

    #[test]
    fn parse_currency_rejects_unknown_code() {
        let result = parse_currency("ABC");

        assert_eq!(result, Err(MoneyError::UnknownCurrency("ABC".to_string())));
    }

    #[test]
    fn format_amount_matches_money_display() {
        let amount = Decimal::new(104, 0);

        assert_eq!(
            format_amount(amount, GBP),
            Money::from_minor(10_400, GBP).to_string()
        );
    }

    #[test]
    fn round_amount_rounds_halves_up() {
        assert_eq!(round_amount(Decimal::new(999, 3)), Decimal::new(100, 2));
        assert_eq!(round_amount(Decimal::new(1_005, 3)), Decimal::new(101, 2));
        assert_eq!(round_amount(Decimal::new(1_004, 3)), Decimal::new(100, 2));
    }

    #[test]
    fn checked_total_reports_overflow() {
        assert_eq!(
            checked_total([Decimal::new(120, 2), Decimal::new(400, 2)]),
            Ok(Decimal::new(520, 2))
        );
        assert_eq!(checked_total([Decimal::MAX, Decimal::ONE]), Err(AmountOverflow));
    }

    #[test]
    fn to_minor_units_rounds_to_whole_pence() {
        assert_eq!(to_minor_units(Decimal::new(12_346, 3)), Some(1_235));
        assert_eq!(to_minor_units(Decimal::MAX), None);
    }
}
