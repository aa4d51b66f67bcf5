//! Interactive user-record manager.
//!
//! # Responsibility
//! - Resolve configuration, start logging and own the single connection.
//! - Reset and seed the store, then hand control to the menu loop.

mod app;
mod command;
mod config;
mod render;

use app::{App, AppError};
use config::AppConfig;
use log::{error, info};
use std::io;
use std::process::ExitCode;
use userdb_core::db::{initialize_schema, open_db, seed};
use userdb_core::{init_logging, SqliteUserRepository, UserService};

fn main() -> ExitCode {
    let config = match AppConfig::from_current_dir() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: cannot resolve working directory: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    match run(&config) {
        Ok(()) => {
            info!("event=app_exit module=cli status=ok");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=app_exit module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &AppConfig) -> Result<(), AppError> {
    let mut conn = open_db(&config.db_path)?;
    initialize_schema(&mut conn)?;
    seed(&mut conn)?;

    let service = UserService::new(SqliteUserRepository::new(&conn));
    let stdin = io::stdin();
    let stdout = io::stdout();
    App::new(service, stdin.lock(), stdout.lock()).run()
}
