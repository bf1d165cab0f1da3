use anyhow::{Context, Result};
use std::path::Path;

use crate::models::Subscription;

const HEADER: [&str; 7] = [
    "id",
    "name",
    "monthly_cost",
    "annual_plan_cost",
    "annualized_cost",
    "annual_savings",
    "created_at",
];

/// Write subscriptions to a CSV file. Returns the number of rows written.
pub(crate) fn export_subscriptions(path: &Path, subs: &[Subscription]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    wtr.write_record(HEADER)?;
    for sub in subs {
        wtr.write_record([
            sub.id.to_string(),
            sub.name.clone(),
            sub.monthly_cost.to_string(),
            sub.annual_plan_cost.to_string(),
            sub.annualized_cost().to_string(),
            sub.annual_savings.to_string(),
            sub.created_at.clone(),
        ])?;
    }
    wtr.flush().context("Failed to flush CSV file")?;
    Ok(subs.len())
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
