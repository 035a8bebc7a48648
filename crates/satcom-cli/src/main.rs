//! satcli - An encrypted, passphrase-protected catalogue of satellites
//!
//! This is the command-line interface for satcom. It opens the encrypted
//! datastore, runs one command against it and saves it back.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod logging;
mod output;

use clap::Parser;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{
    handle_add, handle_completions, handle_delete, handle_explain, handle_list, handle_passwd,
    handle_query,
};
use crate::errors::CliError;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.quiet, cli.verbose);

    if let Err(err) = run(&cli) {
        CliError::from_anyhow(err).exit()
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    // Commands that never open the datastore.
    match &cli.command {
        Commands::Completions { shell } => return handle_completions(*shell),
        Commands::Explain { topic } => return handle_explain(topic),
        _ => {}
    }

    let ctx = AppContext::new(cli)?;
    match &cli.command {
        Commands::Add(args) => handle_add(&ctx, args),
        Commands::Delete { name } => handle_delete(&ctx, name),
        Commands::List { output } => handle_list(&ctx, *output),
        Commands::Query(args) => handle_query(&ctx, args),
        Commands::Passwd => handle_passwd(&ctx),
        Commands::Completions { .. } | Commands::Explain { .. } => Ok(()),
    }
}
