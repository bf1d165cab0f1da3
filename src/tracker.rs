//! The application's explicit state container: the signed-in user's
//! subscriptions, the session-local budget and the savings policy.
//!
//! All arithmetic is delegated to [`crate::engine`]. Every mutation that
//! needs the backend is attempted there first; the in-memory list changes
//! only when that call succeeds.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::backend::{Backend, BackendError};
use crate::config::Config;
use crate::engine::{self, AmountError, SavingsPolicy, Summary};
use crate::models::Subscription;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AddOutcome {
    Added(Subscription),
    /// Monthly cost was blank, unparseable or not positive.
    Rejected,
}

#[derive(Debug, Clone)]
pub(crate) struct Tracker {
    subscriptions: Vec<Subscription>,
    budget: Decimal,
    policy: SavingsPolicy,
    placeholder: String,
}

impl Tracker {
    pub(crate) fn new(config: &Config) -> Self {
        Self {
            subscriptions: Vec::new(),
            budget: config.default_budget,
            policy: config.savings_policy,
            placeholder: config.placeholder_name.clone(),
        }
    }

    pub(crate) fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    pub(crate) fn budget(&self) -> Decimal {
        self.budget
    }

    pub(crate) fn policy(&self) -> SavingsPolicy {
        self.policy
    }

    pub(crate) fn set_policy(&mut self, policy: SavingsPolicy) {
        self.policy = policy;
    }

    /// Replace the in-memory list with the signed-in user's stored one.
    /// Signed out means an empty list.
    pub(crate) fn load(&mut self, backend: &impl Backend) -> Result<usize, BackendError> {
        let Some(session) = backend.session() else {
            self.subscriptions.clear();
            return Ok(0);
        };
        self.subscriptions = backend.list_subscriptions(session.user_id)?;
        tracing::debug!(
            count = self.subscriptions.len(),
            "loaded subscriptions"
        );
        Ok(self.subscriptions.len())
    }

    pub(crate) fn add(
        &mut self,
        backend: &mut impl Backend,
        name: &str,
        monthly_raw: &str,
        annual_raw: &str,
    ) -> Result<AddOutcome, BackendError> {
        let user_id = backend
            .session()
            .map(|s| s.user_id)
            .ok_or(BackendError::Unauthenticated)?;

        let (mut next, rejected) = engine::add_subscription(
            &self.subscriptions,
            user_id,
            name,
            monthly_raw,
            annual_raw,
            &self.placeholder,
            Utc::now(),
        );
        if rejected {
            tracing::debug!(monthly_raw, "add rejected: monthly cost not positive");
            return Ok(AddOutcome::Rejected);
        }

        let Some(mut candidate) = next.pop() else {
            return Ok(AddOutcome::Rejected);
        };
        // Other users' rows share the id space
        if let Some(max) = backend.max_subscription_id()? {
            if max >= candidate.id {
                candidate.id = max + 1;
            }
        }
        let stored = backend.create_subscription(&candidate).inspect_err(|e| {
            tracing::warn!(error = %e, "create_subscription failed");
        })?;
        next.push(stored.clone());
        self.subscriptions = next;
        tracing::info!(
            id = stored.id,
            monthly = %stored.monthly_cost,
            savings = %stored.annual_savings,
            "subscription added"
        );
        Ok(AddOutcome::Added(stored))
    }

    /// Returns whether a subscription with `id` was in the list.
    pub(crate) fn delete(
        &mut self,
        backend: &mut impl Backend,
        id: i64,
    ) -> Result<bool, BackendError> {
        backend.delete_subscription(id).inspect_err(|e| {
            tracing::warn!(id, error = %e, "delete_subscription failed");
        })?;
        let before = self.subscriptions.len();
        self.subscriptions = engine::delete_subscription(&self.subscriptions, id);
        let removed = self.subscriptions.len() != before;
        if removed {
            tracing::info!(id, "subscription deleted");
        }
        Ok(removed)
    }

    /// Set the monthly budget from raw input. Negative amounts are refused and
    /// the previous budget is kept.
    pub(crate) fn set_budget(&mut self, raw: &str) -> Result<Decimal, AmountError> {
        let budget = engine::parse_amount(raw)?;
        if budget < Decimal::ZERO {
            return Err(AmountError::Negative(budget));
        }
        self.budget = budget;
        tracing::debug!(%budget, "budget changed");
        Ok(budget)
    }

    pub(crate) fn summary(&self) -> Summary {
        engine::summarize(&self.subscriptions, self.budget, self.policy)
    }
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;
