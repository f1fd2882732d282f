#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! sparkytemplate — list, retrieve and update SparkPost templates.

mod api;
mod cli;
mod commands;
mod config;
mod errors;
mod template;
#[cfg(test)]
mod test_utils;

use clap::{CommandFactory, Parser};

use api::ApiClient;
use cli::{Cli, write_error};
use config::Config;
use errors::AppError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let Some(command) = &cli.command else {
        // No subcommand: top-level help, successful exit.
        if let Err(e) = Cli::command().print_help() {
            log::warn!("failed to print help: {e}");
        }
        println!();
        return;
    };

    let result = Config::from_env()
        .map_err(AppError::from)
        .and_then(|config| {
            let client = ApiClient::new(config.client_config()?)?;
            commands::dispatch(command, &client)
        });

    if let Err(err) = result {
        if !err.is_broken_pipe() {
            write_error(&err);
        }
        std::process::exit(err.exit_code());
    }
}

/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `--debug`.
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, default_level),
    );
}
