//! Pure subscription economics: the form-boundary parse step, per-item
//! derivation and list aggregation. Nothing in here touches storage or the
//! terminal.

mod aggregate;
mod derive;
mod input;

pub(crate) use aggregate::{
    add_subscription, delete_subscription, summarize, SavingsPolicy,
    Summary, DEFAULT_PLACEHOLDER_NAME,
};
pub(crate) use derive::{annualized_cost, preview, Preview};
pub(crate) use input::{parse_amount, AmountError};
