mod config;
mod db;
mod error;
mod export;
mod logging;
mod models;
mod run;
mod summary;
mod ui;

use anyhow::Result;

use config::Config;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = Config::from_args(&args)?;

    logging::init(Config::log_path().ok().as_deref());

    let mut db = match &config.db_path {
        Some(path) => db::Database::open(path)?,
        None => db::Database::open_in_memory()?,
    };

    if config.is_cli() {
        run::as_cli(&config.args, &mut db)
    } else {
        run::as_tui(&mut db)
    }
}
