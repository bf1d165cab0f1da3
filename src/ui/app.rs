use rust_decimal::Decimal;

use crate::backend::{Backend, BackendError};
use crate::config::Config;
use crate::engine::{self, Preview};
use crate::models::{Session, Subscription};
use crate::tracker::{AddOutcome, Tracker};

use super::util::format_amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Subscriptions,
    Add,
    Account,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Subscriptions,
            Self::Add,
            Self::Account,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Subscriptions => write!(f, "Subscriptions"),
            Self::Add => write!(f, "Add"),
            Self::Account => write!(f, "Account"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PendingAction {
    DeleteSubscription { id: i64, name: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum FormField {
    #[default]
    Name,
    Monthly,
    Annual,
}

impl FormField {
    pub(crate) fn all() -> &'static [FormField] {
        &[Self::Name, Self::Monthly, Self::Annual]
    }

    pub(crate) fn next(self) -> Self {
        match self {
            Self::Name => Self::Monthly,
            Self::Monthly => Self::Annual,
            Self::Annual => Self::Name,
        }
    }

    pub(crate) fn prev(self) -> Self {
        match self {
            Self::Name => Self::Annual,
            Self::Monthly => Self::Name,
            Self::Annual => Self::Monthly,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Monthly => "Monthly cost",
            Self::Annual => "Annual plan price (optional)",
        }
    }
}

/// The add-subscription form. Raw strings are kept as typed; parsing happens
/// in the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct AddForm {
    pub(crate) name: String,
    pub(crate) monthly: String,
    pub(crate) annual: String,
    pub(crate) focus: FormField,
}

impl AddForm {
    pub(crate) fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Monthly => &self.monthly,
            FormField::Annual => &self.annual,
        }
    }

    pub(crate) fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Name => &mut self.name,
            FormField::Monthly => &mut self.monthly,
            FormField::Annual => &mut self.annual,
        }
    }

    pub(crate) fn preview(&self) -> Option<Preview> {
        engine::preview(&self.monthly, &self.annual)
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) currency: String,

    pub(crate) tracker: Tracker,
    pub(crate) session: Option<Session>,

    // Subscriptions list
    pub(crate) sub_index: usize,
    pub(crate) sub_scroll: usize,

    // Add form
    pub(crate) form: AddForm,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(config: &Config) -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            currency: config.currency_symbol.clone(),

            tracker: Tracker::new(config),
            session: None,

            sub_index: 0,
            sub_scroll: 0,

            form: AddForm::default(),

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Reload the session and the signed-in user's subscriptions.
    pub(crate) fn refresh(&mut self, db: &impl Backend) -> Result<(), BackendError> {
        self.session = db.session().cloned();
        self.tracker.load(db)?;
        self.clamp_selection();
        Ok(())
    }

    /// Keep the cursor on an existing row and inside the scrolled window.
    fn clamp_selection(&mut self) {
        let len = self.tracker.subscriptions().len();
        if self.sub_index >= len {
            self.sub_index = len.saturating_sub(1);
        }
        if self.sub_scroll > self.sub_index {
            self.sub_scroll = self.sub_index;
        }
    }

    pub(crate) fn amount(&self, val: Decimal) -> String {
        format_amount(val, &self.currency)
    }

    pub(crate) fn selected_subscription(&self) -> Option<&Subscription> {
        self.tracker.subscriptions().get(self.sub_index)
    }

    /// Submit the add form. The form is cleared only when the subscription
    /// was stored.
    pub(crate) fn submit_form(&mut self, db: &mut impl Backend) -> Result<(), BackendError> {
        let outcome = self
            .tracker
            .add(db, &self.form.name, &self.form.monthly, &self.form.annual)?;
        match outcome {
            AddOutcome::Added(sub) => {
                let msg = match sub.displayed_savings() {
                    Some(savings) => format!(
                        "Added {} (saves {} a year on the annual plan)",
                        sub.name,
                        self.amount(savings)
                    ),
                    None => format!("Added {}", sub.name),
                };
                self.set_status(msg);
                self.form.reset();
                self.sub_index = self.tracker.subscriptions().len().saturating_sub(1);
            }
            AddOutcome::Rejected => {
                self.set_status("Monthly cost must be a positive number");
            }
        }
        Ok(())
    }

    /// Ask for confirmation before deleting the selected subscription.
    pub(crate) fn request_delete(&mut self) {
        let Some(sub) = self.selected_subscription() else {
            self.set_status("No subscription selected");
            return;
        };
        let (id, name) = (sub.id, sub.name.clone());
        self.confirm_message = format!("Delete '{name}'?");
        self.pending_action = Some(PendingAction::DeleteSubscription { id, name });
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn confirm_pending(&mut self, db: &mut impl Backend) -> Result<(), BackendError> {
        let Some(action) = self.pending_action.take() else {
            return Ok(());
        };
        match action {
            PendingAction::DeleteSubscription { id, name } => {
                if self.tracker.delete(db, id)? {
                    self.set_status(format!("Deleted: {name}"));
                } else {
                    self.set_status(format!("'{name}' was already gone"));
                }
                self.clamp_selection();
            }
        }
        Ok(())
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
