//! Conversion request/result types

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Display;

use super::currency::{CurrencyPair, RateQuote};
use super::error::ConvertError;

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: Decimal,
    pub from: String,
    pub to: String,
}

impl ConversionRequest {
    pub fn new(amount: Decimal, pair: &CurrencyPair) -> Self {
        Self {
            amount,
            from: pair.from.clone(),
            to: pair.to.clone(),
        }
    }

    pub fn has_valid_amount(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub amount: Decimal,
    pub from: String,
    pub to: String,
    pub rate: Decimal,
    pub converted_amount: Decimal,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ConversionResult {
    /// Fails with `AmountTooLarge` when the product does not fit a `Decimal`.
    pub fn from_quote(request: ConversionRequest, quote: RateQuote) -> Result<Self, ConvertError> {
        let product = quote
            .rate
            .checked_mul(request.amount)
            .ok_or(ConvertError::AmountTooLarge)?;
        Ok(Self {
            converted_amount: round_half_up(product),
            amount: request.amount,
            from: request.from,
            to: request.to,
            rate: quote.rate,
            updated_at: quote.updated_at,
        })
    }
}

impl Display for ConversionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} = {:.2} {}",
            self.amount.normalize(),
            self.from,
            self.converted_amount,
            self.to
        )
    }
}

/// Rounds to two decimal places, midpoints away from zero.
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_result_from_quote() {
        let request = ConversionRequest::new(dec("10"), &CurrencyPair::new("USD", "INR"));
        let quote = RateQuote {
            rate: dec("83.12"),
            updated_at: None,
        };
        let result = ConversionResult::from_quote(request, quote).unwrap();
        assert_eq!(result.converted_amount, dec("831.20"));
        assert_eq!(result.to_string(), "10 USD = 831.20 INR");
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(dec("1.005")), dec("1.01"));
        assert_eq!(round_half_up(dec("1.004")), dec("1.00"));
        assert_eq!(round_half_up(dec("2.675")), dec("2.68"));
        assert_eq!(round_half_up(dec("0.125")), dec("0.13"));
    }

    #[test]
    fn test_display_pads_to_two_places() {
        let request = ConversionRequest::new(dec("2.50"), &CurrencyPair::new("EUR", "JPY"));
        let quote = RateQuote {
            rate: dec("160"),
            updated_at: None,
        };
        let result = ConversionResult::from_quote(request, quote).unwrap();
        assert_eq!(result.to_string(), "2.5 EUR = 400.00 JPY");
    }

    #[test]
    fn test_overflowing_product_is_rejected() {
        let request = ConversionRequest::new(
            dec("1000000000000000000000000000"),
            &CurrencyPair::new("USD", "INR"),
        );
        let quote = RateQuote {
            rate: dec("83.12"),
            updated_at: None,
        };
        assert_eq!(
            ConversionResult::from_quote(request, quote).unwrap_err(),
            ConvertError::AmountTooLarge
        );
    }

    #[test]
    fn test_amount_validity() {
        let pair = CurrencyPair::new("USD", "INR");
        assert!(ConversionRequest::new(dec("0.01"), &pair).has_valid_amount());
        assert!(!ConversionRequest::new(Decimal::ZERO, &pair).has_valid_amount());
        assert!(!ConversionRequest::new(dec("-3"), &pair).has_valid_amount());
    }
}
