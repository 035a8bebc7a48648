use tracing::info;

use crate::app::AppContext;
use crate::constants::NEW_PASSPHRASE_ENV;
use crate::errors::CliError;

pub fn handle_passwd(ctx: &AppContext) -> anyhow::Result<()> {
    let path = ctx.store_path()?;
    if !path.exists() {
        return Err(CliError::not_found(
            format!("No datastore found at {}", path.display()),
            "Hint: Add a satellite first to create it.",
        )
        .into());
    }

    let provider = ctx.passphrase_provider().with_rotation(NEW_PASSPHRASE_ENV);
    let session = ctx.open_store_with(provider)?;
    if session.status.is_none() {
        return Err(CliError::auth_failed("Incorrect passphrase.").into());
    }

    session.store.change_passphrase()?;
    info!(path = %path.display(), "passphrase rotated");

    if !ctx.quiet() {
        println!("Passphrase changed for {}", path.display());
    }
    Ok(())
}
