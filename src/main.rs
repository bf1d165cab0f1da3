mod backend;
mod config;
mod db;
mod engine;
mod export;
mod logging;
mod models;
mod run;
mod tracker;
mod ui;

use anyhow::Result;

use crate::backend::Backend;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let paths = config::Paths::resolve()?;
    logging::init(&paths.log_path())?;
    let config = config::Config::load(&paths.config_path())?;
    let mut db = db::Database::open(&paths.db_path())?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        signed_in = db.session().is_some(),
        "subsave starting"
    );

    match args.len() {
        1 => run::as_tui(&mut db, &config),
        2.. => run::as_cli(&args, &mut db, &config, &paths),
        _ => {
            eprintln!("Usage: subsave [command]");
            Ok(())
        }
    }
}
