//! CLI command implementations

pub mod accounts;
pub mod money;
pub mod session;
pub mod user;

use std::path::PathBuf;

use anyhow::{Context, Result};
use bankbook_core::adapters::TextFileStore;
use bankbook_core::validation::{is_valid_account_number, sanitize_str};
use bankbook_core::LedgerService;

use crate::output;
use crate::prompt::Prompt;

pub type Ledger = LedgerService<TextFileStore>;

/// ~/.bankbook, used when neither --data-dir nor BANKBOOK_DIR is given
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".bankbook"))
        .context("Could not find home directory; pass --data-dir")
}

/// Warn once at startup when unreadable lines were dropped
pub fn report_skipped(ledger: &Ledger) {
    let skipped = ledger.skipped_on_load();
    if skipped.total() > 0 {
        output::warning(&format!(
            "Skipped {} unreadable record(s) while loading ({} users, {} accounts, {} transactions). They will be dropped on the next save.",
            skipped.total(),
            skipped.users,
            skipped.accounts,
            skipped.transactions
        ));
    }
}

/// Ask for an account number and check its shape.
///
/// Ownership is left to the ledger, which reports foreign and unknown
/// numbers alike.
fn read_account_number(prompt: &mut Prompt) -> Result<Option<String>> {
    let Some(input) = prompt.text("Account number")? else {
        return Ok(None);
    };
    let number = sanitize_str(input.trim());
    if !is_valid_account_number(&number) {
        output::error("Invalid account number format (expected ACC followed by 6 digits).");
        return Ok(None);
    }
    Ok(Some(number))
}
