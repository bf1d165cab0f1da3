use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use super::app::{App, InputMode, Screen};
use super::util::shellexpand;
use crate::backend::Backend;
use crate::db::Database;
use crate::engine::SavingsPolicy;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit SubSave", cmd_quit, r);
    register_command!("quit", "Quit SubSave", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("s", "Go to Subscriptions", cmd_subscriptions, r);
    register_command!("subs", "Go to Subscriptions", cmd_subscriptions, r);
    register_command!(
        "a",
        "Add subscription (e.g. :a Netflix, 15.49, 149)",
        cmd_add,
        r
    );
    register_command!(
        "add",
        "Add subscription (e.g. :add Netflix, 15.49, 149)",
        cmd_add,
        r
    );
    register_command!("b", "Set monthly budget (e.g. :b 5000)", cmd_budget, r);
    register_command!(
        "budget",
        "Set monthly budget (e.g. :budget 5000)",
        cmd_budget,
        r
    );
    register_command!("delete", "Delete selected subscription", cmd_delete, r);
    register_command!(
        "signin",
        "Sign in (e.g. :signin me@mail.com secret)",
        cmd_signin,
        r
    );
    register_command!("login", "Sign in", cmd_signin, r);
    register_command!(
        "signup",
        "Create an account (e.g. :signup me@mail.com secret)",
        cmd_signup,
        r
    );
    register_command!("signout", "Sign out", cmd_signout, r);
    register_command!("logout", "Sign out", cmd_signout, r);
    register_command!("account", "Go to Account", cmd_account, r);
    register_command!(
        "policy",
        "Savings total policy (e.g. :policy raw)",
        cmd_policy,
        r
    );
    register_command!(
        "export",
        "Export subscriptions to CSV (e.g. :export ~/subs.csv)",
        cmd_export,
        r
    );
    register_command!("reload", "Reload subscriptions", cmd_reload, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        tracing::debug!(command = cmd_name, "running command");
        (cmd.run)(args, app, db)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Split `name, monthly, annual` into its three raw fields. Missing fields
/// come back empty.
pub(crate) fn split_add_args(args: &str) -> (String, String, String) {
    let mut parts = args.splitn(3, ',').map(|p| p.trim().to_string());
    let name = parts.next().unwrap_or_default();
    let monthly = parts.next().unwrap_or_default();
    let annual = parts.next().unwrap_or_default();
    (name, monthly, annual)
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_subscriptions(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Subscriptions;
    Ok(())
}

fn cmd_account(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Account;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if db.session().is_none() {
        app.set_status("Sign in first: :signin <email> <password>");
        return Ok(());
    }

    app.screen = Screen::Add;
    if args.is_empty() {
        app.input_mode = InputMode::Editing;
        return Ok(());
    }

    let (name, monthly, annual) = split_add_args(args);
    app.form.name = name;
    app.form.monthly = monthly;
    app.form.annual = annual;
    app.submit_form(db)?;
    Ok(())
}

fn cmd_budget(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        let current = app.amount(app.tracker.budget());
        app.set_status(format!("Monthly budget: {current}. Usage: :budget <amount>"));
        return Ok(());
    }

    match app.tracker.set_budget(args) {
        Ok(budget) => {
            let shown = app.amount(budget);
            app.set_status(format!("Monthly budget set to {shown}"));
        }
        Err(e) => app.set_status(format!("Budget unchanged: {e}")),
    }
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Subscriptions {
        app.set_status("Navigate to Subscriptions and select one first");
        return Ok(());
    }
    app.request_delete();
    Ok(())
}

fn credentials(args: &str) -> Option<(&str, &str)> {
    let mut parts = args.splitn(2, ' ');
    let email = parts.next().filter(|e| !e.is_empty())?;
    let password = parts.next().filter(|p| !p.is_empty())?;
    Some((email, password))
}

fn cmd_signin(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let Some((email, password)) = credentials(args) else {
        app.set_status("Usage: :signin <email> <password>");
        return Ok(());
    };
    match db.sign_in(email, password) {
        Ok(session) => {
            app.refresh(db)?;
            let count = app.tracker.subscriptions().len();
            app.set_status(format!(
                "Signed in as {} ({count} subscription{})",
                session.email,
                if count == 1 { "" } else { "s" }
            ));
        }
        Err(e) => app.set_status(format!("Sign in failed: {e}")),
    }
    Ok(())
}

fn cmd_signup(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let Some((email, password)) = credentials(args) else {
        app.set_status("Usage: :signup <email> <password>");
        return Ok(());
    };
    match db.sign_up(email, password) {
        Ok(session) => {
            app.refresh(db)?;
            app.set_status(format!("Welcome, {}", session.email));
        }
        Err(e) => app.set_status(format!("Sign up failed: {e}")),
    }
    Ok(())
}

fn cmd_signout(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if db.session().is_none() {
        app.set_status("Not signed in");
        return Ok(());
    }
    db.sign_out()?;
    app.refresh(db)?;
    app.form.reset();
    app.set_status("Signed out");
    Ok(())
}

fn cmd_policy(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        let current = app.tracker.policy();
        app.set_status(format!(
            "Savings policy: {current}. Usage: :policy <clamped|raw>"
        ));
        return Ok(());
    }
    match SavingsPolicy::parse(args) {
        Some(policy) => {
            app.tracker.set_policy(policy);
            app.set_status(format!("Savings policy: {policy}"));
        }
        None => app.set_status(format!("Unknown policy: {args}. Use clamped or raw")),
    }
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let date = chrono::Local::now().format("%Y-%m-%d");
        format!("{home}/subsave-export-{date}.csv")
    } else {
        shellexpand(args)
    };

    let count = crate::export::export_subscriptions(Path::new(&path), app.tracker.subscriptions())?;
    if count == 0 {
        app.set_status("No subscriptions to export");
    } else {
        app.set_status(format!("Exported {count} subscriptions to {path}"));
    }
    Ok(())
}

fn cmd_reload(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.refresh(db)?;
    let count = app.tracker.subscriptions().len();
    app.set_status(format!("Loaded {count} subscriptions"));
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
