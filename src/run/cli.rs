use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::backend::Backend;
use crate::config::{Config, Paths};
use crate::db::Database;
use crate::tracker::{AddOutcome, Tracker};
use crate::ui::util::{format_amount, shellexpand, truncate};

pub(crate) fn as_cli(
    args: &[String],
    db: &mut Database,
    config: &Config,
    paths: &Paths,
) -> Result<()> {
    match args[1].as_str() {
        "list" | "ls" => cli_list(db, config),
        "add" | "a" => cli_add(&args[2..], db, config),
        "delete" | "rm" => cli_delete(&args[2..], db, config),
        "summary" | "s" => cli_summary(&args[2..], db, config),
        "signup" => cli_signup(&args[2..], db),
        "signin" | "login" => cli_signin(&args[2..], db),
        "signout" | "logout" => cli_signout(db),
        "whoami" => cli_whoami(db),
        "export" => cli_export(&args[2..], db, config),
        "config" => cli_config(db, config, paths),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("subsave {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("SubSave: subscription tracker with annual-plan savings and a monthly budget");
    println!();
    println!("Usage: subsave [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  list                          List your subscriptions");
    println!("  add <name> <monthly> [annual] Add a subscription (annual = yearly plan price)");
    println!("  delete <id>                   Delete a subscription");
    println!("  summary                       Totals, savings and budget utilization");
    println!("    --budget <amount>           Monthly budget (default from config)");
    println!("  signup <email> [password]     Create an account and sign in");
    println!("  signin <email> [password]     Sign in");
    println!("  signout                       Sign out");
    println!("  whoami                        Show the signed-in account");
    println!("  export [path]                 Export subscriptions to CSV");
    println!("  config                        Show file locations and settings");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn ensure_signed_in(db: &Database) -> Result<()> {
    if db.session().is_none() {
        anyhow::bail!("Not signed in. Run `subsave signin <email>` or `subsave signup <email>`");
    }
    Ok(())
}

fn load_tracker(db: &Database, config: &Config) -> Result<Tracker> {
    ensure_signed_in(db)?;
    let mut tracker = Tracker::new(config);
    tracker.load(db)?;
    Ok(tracker)
}

fn cli_list(db: &mut Database, config: &Config) -> Result<()> {
    let tracker = load_tracker(db, config)?;
    let subs = tracker.subscriptions();
    if subs.is_empty() {
        println!("No subscriptions");
        return Ok(());
    }

    let sym = &config.currency_symbol;
    println!(
        "{:<14} {:<24} {:>12} {:>12} {:>12}",
        "ID", "Name", "Monthly", "Annual plan", "Savings"
    );
    println!("{}", "─".repeat(78));
    for sub in subs {
        let annual = if sub.has_annual_plan() {
            format_amount(sub.annual_plan_cost, sym)
        } else {
            "-".into()
        };
        let savings = sub
            .displayed_savings()
            .map(|s| format_amount(s, sym))
            .unwrap_or_else(|| "-".into());
        println!(
            "{:<14} {:<24} {:>12} {:>12} {:>12}",
            sub.id,
            truncate(&sub.name, 24),
            format_amount(sub.monthly_cost, sym),
            annual,
            savings,
        );
    }
    Ok(())
}

fn cli_add(args: &[String], db: &mut Database, config: &Config) -> Result<()> {
    if args.len() < 2 {
        anyhow::bail!("Usage: subsave add <name> <monthly> [annual]");
    }
    let name = &args[0];
    let monthly = &args[1];
    let annual = args.get(2).map(String::as_str).unwrap_or("");

    let mut tracker = load_tracker(db, config)?;
    match tracker.add(db, name, monthly, annual)? {
        AddOutcome::Added(sub) => {
            let sym = &config.currency_symbol;
            println!(
                "Added {} (id {}): {}/month, {}/year",
                sub.name,
                sub.id,
                format_amount(sub.monthly_cost, sym),
                format_amount(sub.annualized_cost(), sym),
            );
            if let Some(savings) = sub.displayed_savings() {
                println!(
                    "  Switching to the annual plan saves {} per year",
                    format_amount(savings, sym)
                );
            }
        }
        AddOutcome::Rejected => {
            println!("Monthly cost must be a number greater than 0; nothing added");
        }
    }
    Ok(())
}

fn cli_delete(args: &[String], db: &mut Database, config: &Config) -> Result<()> {
    let Some(raw_id) = args.first() else {
        anyhow::bail!("Usage: subsave delete <id>");
    };
    let id: i64 = raw_id
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid id: {raw_id}"))?;

    let mut tracker = load_tracker(db, config)?;
    let name = crate::models::Subscription::find_by_id(tracker.subscriptions(), id)
        .map(|s| s.name.clone());
    if tracker.delete(db, id)? {
        println!("Deleted {}", name.unwrap_or_else(|| id.to_string()));
    } else {
        println!("No subscription with id {id}");
    }
    Ok(())
}

fn cli_summary(args: &[String], db: &mut Database, config: &Config) -> Result<()> {
    let mut tracker = load_tracker(db, config)?;
    if let Some(raw) = args
        .windows(2)
        .find(|w| w[0] == "--budget")
        .map(|w| w[1].as_str())
    {
        tracker
            .set_budget(raw)
            .map_err(|e| anyhow::anyhow!("Invalid budget: {e}"))?;
    }

    let summary = tracker.summary();
    let sym = &config.currency_symbol;
    let email = db.session().map(|s| s.email.as_str()).unwrap_or_default();

    println!("SubSave: {email}");
    println!("{}", "─".repeat(40));
    println!("  Subscriptions:   {}", tracker.subscriptions().len());
    println!(
        "  Monthly total:   {}",
        format_amount(summary.total_monthly, sym)
    );
    println!(
        "  Annual savings:  {}  ({} policy)",
        format_amount(summary.total_savings_opportunity, sym),
        tracker.policy()
    );
    println!("  Budget:          {}", format_amount(tracker.budget(), sym));
    println!(
        "  Remaining:       {}",
        format_amount(summary.remaining_budget, sym)
    );
    println!("  Utilization:     {}%", summary.utilization_percent);
    if summary.over_budget {
        println!();
        println!(
            "  Over budget by {}",
            format_amount(summary.total_monthly - tracker.budget(), sym)
        );
    }
    Ok(())
}

fn credentials(args: &[String], usage: &str) -> Result<(String, String)> {
    let Some(email) = args.first() else {
        anyhow::bail!("{usage}");
    };
    let password = match args.get(1) {
        Some(p) => p.clone(),
        None => read_password()?,
    };
    Ok((email.clone(), password))
}

fn read_password() -> Result<String> {
    print!("Password: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn cli_signup(args: &[String], db: &mut Database) -> Result<()> {
    let (email, password) = credentials(args, "Usage: subsave signup <email> [password]")?;
    let session = db.sign_up(&email, &password)?;
    println!("Account created. Signed in as {}", session.email);
    Ok(())
}

fn cli_signin(args: &[String], db: &mut Database) -> Result<()> {
    let (email, password) = credentials(args, "Usage: subsave signin <email> [password]")?;
    let session = db.sign_in(&email, &password)?;
    println!("Signed in as {}", session.email);
    Ok(())
}

fn cli_signout(db: &mut Database) -> Result<()> {
    db.sign_out()?;
    println!("Signed out");
    Ok(())
}

fn cli_whoami(db: &Database) -> Result<()> {
    match db.session() {
        Some(session) => println!("{} (since {})", session.email, session.signed_in_at),
        None => println!("Not signed in"),
    }
    Ok(())
}

fn cli_export(args: &[String], db: &mut Database, config: &Config) -> Result<()> {
    let tracker = load_tracker(db, config)?;
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            let date = chrono::Local::now().format("%Y-%m-%d");
            format!("{home}/subsave-export-{date}.csv")
        });

    let count = crate::export::export_subscriptions(Path::new(&output_path), tracker.subscriptions())?;
    if count == 0 {
        println!("No subscriptions; wrote header only to {output_path}");
    } else {
        println!("Exported {count} subscriptions to {output_path}");
    }
    Ok(())
}

fn cli_config(db: &Database, config: &Config, paths: &Paths) -> Result<()> {
    println!("Config file:     {}", paths.config_path().display());
    println!("Database:        {}", paths.db_path().display());
    println!("Log file:        {}", paths.log_path().display());
    println!("Schema version:  {}", db.schema_version()?);
    println!("Stored subs:     {}", db.get_subscription_count()?);
    println!();
    println!(
        "default_budget   {}",
        format_amount(config.default_budget, &config.currency_symbol)
    );
    println!("savings_policy   {}", config.savings_policy);
    println!("currency_symbol  {}", config.currency_symbol);
    println!("placeholder_name {}", config.placeholder_name);
    Ok(())
}
