//! Login, registration and logout

use anyhow::Result;
use bankbook_core::validation::sanitize_str;

use super::Ledger;
use crate::output;
use crate::prompt::Prompt;

pub fn login(ledger: &mut Ledger, prompt: &mut Prompt) -> Result<()> {
    let Some(username) = prompt.text("Username")? else {
        return Ok(());
    };
    let Some(password) = prompt.password("Password")? else {
        return Ok(());
    };

    let username = sanitize_str(username.trim());
    match ledger.login(&username, &password) {
        Ok(()) => output::success(&format!("Welcome, {}!", username)),
        Err(e) => output::error(&e.to_string()),
    }
    Ok(())
}

pub fn register(ledger: &mut Ledger, prompt: &mut Prompt) -> Result<()> {
    let Some(username) = prompt.text("Choose a username (3-20 letters, digits, _)")? else {
        return Ok(());
    };
    let Some(password) = prompt.password("Choose a password (min 8 characters)")? else {
        return Ok(());
    };
    let Some(confirm) = prompt.password("Confirm password")? else {
        return Ok(());
    };

    if password != confirm {
        output::error("Passwords do not match.");
        return Ok(());
    }

    let username = sanitize_str(username.trim());
    match ledger.register(&username, &password) {
        Ok(()) => output::success("Registration successful. You can now log in."),
        Err(e) => output::error(&e.to_string()),
    }
    Ok(())
}

pub fn logout(ledger: &mut Ledger) {
    ledger.logout();
    output::info("Logged out.");
}
