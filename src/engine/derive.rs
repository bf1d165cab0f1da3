use rust_decimal::Decimal;

use super::input::coerce_amount;

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// What a subscription costs over a year when billed monthly.
pub(crate) fn annualized_cost(monthly_cost: Decimal) -> Decimal {
    monthly_cost * MONTHS_PER_YEAR
}

/// Yearly amount saved by switching to the annual plan.
///
/// Zero when no annual plan is offered (`annual_plan_cost <= 0`). Otherwise the
/// signed difference is returned as-is: a costlier annual plan yields a
/// negative value, and it is up to whoever surfaces or sums it to screen
/// that out.
pub(crate) fn derive_savings(monthly_cost: Decimal, annual_plan_cost: Decimal) -> Decimal {
    if annual_plan_cost > Decimal::ZERO {
        annualized_cost(monthly_cost) - annual_plan_cost
    } else {
        Decimal::ZERO
    }
}

/// Live figures for a half-filled add form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Preview {
    pub(crate) annualized: Decimal,
    /// Only present when switching to the annual plan actually saves money.
    pub(crate) savings: Option<Decimal>,
}

pub(crate) fn preview(monthly_raw: &str, annual_raw: &str) -> Option<Preview> {
    let monthly = coerce_amount(monthly_raw);
    if monthly <= Decimal::ZERO {
        return None;
    }
    let savings = derive_savings(monthly, coerce_amount(annual_raw));
    Some(Preview {
        annualized: annualized_cost(monthly),
        savings: (savings > Decimal::ZERO).then_some(savings),
    })
}

#[cfg(test)]
#[path = "derive_tests.rs"]
mod tests;
