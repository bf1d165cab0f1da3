use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;

use super::derive::derive_savings;
use super::input::coerce_amount;
use crate::models::Subscription;

pub(crate) const DEFAULT_PLACEHOLDER_NAME: &str = "unnamed subscription";

/// How stored savings are folded into the savings-opportunity total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SavingsPolicy {
    /// Only positive savings count; a costlier annual plan contributes 0.
    #[default]
    Clamped,
    /// Signed values are summed verbatim.
    Raw,
}

impl SavingsPolicy {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Clamped => "clamped",
            Self::Raw => "raw",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "clamped" | "clamp" | "safe" => Some(Self::Clamped),
            "raw" | "exact" => Some(Self::Raw),
            _ => None,
        }
    }

    fn contribution(&self, savings: Decimal) -> Decimal {
        match self {
            Self::Clamped => savings.max(Decimal::ZERO),
            Self::Raw => savings,
        }
    }
}

impl std::fmt::Display for SavingsPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Build the record an add would append, or `None` if the monthly cost is
/// not positive. `placeholder` replaces a blank name.
fn prepare_subscription(
    existing: &[Subscription],
    user_id: i64,
    name: &str,
    monthly_raw: &str,
    annual_raw: &str,
    placeholder: &str,
    now: DateTime<Utc>,
) -> Option<Subscription> {
    let monthly_cost = coerce_amount(monthly_raw);
    if monthly_cost <= Decimal::ZERO {
        return None;
    }
    let annual_plan_cost = coerce_amount(annual_raw);

    let name = name.trim();
    let name = if name.is_empty() { placeholder } else { name };

    Some(Subscription {
        id: fresh_id(existing, now),
        user_id,
        name: name.to_string(),
        monthly_cost,
        annual_plan_cost,
        annual_savings: derive_savings(monthly_cost, annual_plan_cost),
        created_at: now.to_rfc3339(),
    })
}

/// Clock-based id, bumped past every id already in the list.
fn fresh_id(existing: &[Subscription], now: DateTime<Utc>) -> i64 {
    let clock = now.timestamp_millis();
    match existing.iter().map(|s| s.id).max() {
        Some(max) if max >= clock => max + 1,
        _ => clock,
    }
}

/// Append a new subscription. Returns the new list and whether the input was
/// rejected; on rejection the list is returned unchanged.
pub(crate) fn add_subscription(
    list: &[Subscription],
    user_id: i64,
    name: &str,
    monthly_raw: &str,
    annual_raw: &str,
    placeholder: &str,
    now: DateTime<Utc>,
) -> (Vec<Subscription>, bool) {
    match prepare_subscription(list, user_id, name, monthly_raw, annual_raw, placeholder, now) {
        Some(sub) => {
            let mut next = list.to_vec();
            next.push(sub);
            (next, false)
        }
        None => (list.to_vec(), true),
    }
}

/// Remove the subscription with `id`. Unknown ids leave the list as-is.
pub(crate) fn delete_subscription(list: &[Subscription], id: i64) -> Vec<Subscription> {
    list.iter().filter(|s| s.id != id).cloned().collect()
}

/// Ceiling for the utilization percentage (one million percent).
pub(crate) const MAX_UTILIZATION_PERCENT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) total_monthly: Decimal,
    pub(crate) total_savings_opportunity: Decimal,
    /// Floored at zero.
    pub(crate) remaining_budget: Decimal,
    /// Rounded to a whole percent; 0 when the budget is not positive.
    /// Saturates at [`MAX_UTILIZATION_PERCENT`] for vanishingly small budgets.
    pub(crate) utilization_percent: Decimal,
    pub(crate) over_budget: bool,
}

impl Summary {
    /// Utilization as a 0..=1 fraction for gauges and charts.
    pub(crate) fn utilization_ratio(&self) -> f64 {
        use rust_decimal::prelude::ToPrimitive;
        (self.utilization_percent / Decimal::ONE_HUNDRED)
            .to_f64()
            .unwrap_or(0.0)
            .clamp(0.0, 1.0)
    }
}

pub(crate) fn summarize(list: &[Subscription], budget: Decimal, policy: SavingsPolicy) -> Summary {
    let total_monthly: Decimal = list.iter().map(|s| s.monthly_cost).sum();
    let total_savings_opportunity: Decimal = list
        .iter()
        .map(|s| policy.contribution(s.annual_savings))
        .sum();

    let remaining_budget = (budget - total_monthly).max(Decimal::ZERO);

    let utilization_percent = if budget > Decimal::ZERO {
        total_monthly
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|v| v.checked_div(budget))
            .map(|v| v.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .map_or(MAX_UTILIZATION_PERCENT, |v| v.min(MAX_UTILIZATION_PERCENT))
    } else {
        Decimal::ZERO
    };

    Summary {
        total_monthly,
        total_savings_opportunity,
        remaining_budget,
        utilization_percent,
        over_budget: total_monthly > budget,
    }
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
