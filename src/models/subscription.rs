use rust_decimal::Decimal;

use crate::engine;

#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub monthly_cost: Decimal,
    /// Zero when no annual plan is offered.
    pub annual_plan_cost: Decimal,
    /// Derived at creation time; may be negative.
    pub annual_savings: Decimal,
    pub created_at: String,
}

impl Subscription {
    pub fn has_annual_plan(&self) -> bool {
        self.annual_plan_cost > Decimal::ZERO
    }

    pub fn annualized_cost(&self) -> Decimal {
        engine::annualized_cost(self.monthly_cost)
    }

    /// Savings worth showing to the user: positive amounts only.
    pub fn displayed_savings(&self) -> Option<Decimal> {
        (self.annual_savings > Decimal::ZERO).then_some(self.annual_savings)
    }

    /// Find a subscription by ID in a slice.
    pub fn find_by_id(subs: &[Subscription], id: i64) -> Option<&Subscription> {
        subs.iter().find(|s| s.id == id)
    }
}

impl std::fmt::Display for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
