pub(crate) mod account;
pub(crate) mod add;
pub(crate) mod dashboard;
pub(crate) mod subscriptions;
