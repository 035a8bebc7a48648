//! Commands that change the catalogue: `add` and `delete`.

use chrono::Local;
use tracing::info;

use satcom_core::satellite::{parse_date, DATE_FORMAT};
use satcom_core::{LoadStatus, Satellite, SatcomError};

use crate::app::AppContext;
use crate::cli::AddArgs;
use crate::errors::CliError;

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let satellite = build_satellite(args)?;
    let name = satellite.name.clone();

    let session = ctx.open_store()?;
    session.ensure_writable()?;
    let replaced = session.store.put(satellite)?;
    session.store.save()?;
    info!(name = %name, replaced = replaced.is_some(), "satellite stored");

    if !ctx.quiet() {
        if replaced.is_some() {
            println!("Record updated: {} (encrypted in datastore)", name);
        } else {
            println!("Record added: {} (encrypted in datastore)", name);
        }
    }
    Ok(())
}

pub fn handle_delete(ctx: &AppContext, name: &str) -> anyhow::Result<()> {
    let session = ctx.open_store()?;
    // No file yet means nothing to delete.
    if session.status == Some(LoadStatus::Deferred) {
        return Err(SatcomError::NotFound(name.to_string()).into());
    }
    session.store.delete(name)?;
    session.store.save()?;
    info!(name = %name, "satellite deleted");

    if !ctx.quiet() {
        println!("Record deleted: {}", name);
    }
    Ok(())
}

fn build_satellite(args: &AddArgs) -> anyhow::Result<Satellite> {
    let name = args.name.trim();
    if name.is_empty() {
        return Err(CliError::invalid_input("Satellite name cannot be empty").into());
    }
    if args.altitude < 0.0 {
        return Err(CliError::invalid_input("--altitude cannot be negative").into());
    }

    let launch_date = match args.launch_date.as_deref() {
        Some(value) => parse_date(value)?.format(DATE_FORMAT).to_string(),
        None => Local::now().date_naive().format(DATE_FORMAT).to_string(),
    };

    Ok(Satellite {
        altitude: args.altitude,
        constellation: args.constellation,
        launch_date,
        mission_objective: args.mission.clone().unwrap_or_default(),
        ..Satellite::new(name, &args.operator, &args.status, &args.orbit_type)
    })
}
