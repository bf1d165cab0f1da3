use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// Largest magnitude accepted from a form field (1e12). Keeps the ×12 and
/// ×100 arithmetic in the engines well inside `Decimal` range.
const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum AmountError {
    #[error("amount is blank")]
    Blank,
    #[error("not a number: {0:?}")]
    NotANumber(String),
    #[error("amount is out of range: {0}")]
    OutOfRange(String),
    #[error("amount must not be negative: {0}")]
    Negative(Decimal),
}

/// Parse raw form text into an amount.
///
/// Accepts plain decimals (`1490`, `12.50`, `-5`) and scientific notation
/// (`1e3`). Surrounding whitespace is ignored. Digit separators (`1_000`)
/// are not numbers.
pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, AmountError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Blank);
    }
    if trimmed.contains('_') {
        return Err(AmountError::NotANumber(trimmed.to_string()));
    }

    let value = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| unparseable(trimmed))?;

    if value.abs() > MAX_AMOUNT {
        return Err(AmountError::OutOfRange(trimmed.to_string()));
    }
    Ok(value.normalize())
}

/// Numeric text `Decimal` cannot hold (`1e30`) is out of range, not garbage.
fn unparseable(trimmed: &str) -> AmountError {
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => AmountError::OutOfRange(trimmed.to_string()),
        _ => AmountError::NotANumber(trimmed.to_string()),
    }
}

/// Blank or unparseable input counts as zero.
pub(crate) fn coerce_amount(raw: &str) -> Decimal {
    parse_amount(raw).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
