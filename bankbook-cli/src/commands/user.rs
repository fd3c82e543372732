//! User administration - enable or disable logins

use anyhow::Result;
use clap::Subcommand;

use super::Ledger;
use crate::output;

#[derive(Subcommand)]
pub enum UserCommands {
    /// Allow a user to log in again
    Activate {
        username: String,
    },
    /// Stop a user from logging in; their data is kept
    Deactivate {
        username: String,
    },
}

pub fn run(ledger: &mut Ledger, command: UserCommands) -> Result<()> {
    let (username, active) = match command {
        UserCommands::Activate { username } => (username, true),
        UserCommands::Deactivate { username } => (username, false),
    };

    ledger.set_user_active(&username, active)?;

    if active {
        output::success(&format!("User '{}' activated", username));
    } else {
        output::success(&format!("User '{}' deactivated", username));
    }
    Ok(())
}
