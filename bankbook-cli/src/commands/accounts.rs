//! Account creation and listings

use anyhow::Result;
use bankbook_core::AccountType;
use comfy_table::{Cell, CellAlignment};

use super::{read_account_number, Ledger};
use crate::output::{self, create_table, format_money};
use crate::prompt::Prompt;

const ACCOUNT_TYPES: [AccountType; 2] = [AccountType::Savings, AccountType::Checking];

pub fn create(ledger: &mut Ledger, prompt: &mut Prompt) -> Result<()> {
    let labels: Vec<&str> = ACCOUNT_TYPES.iter().map(|t| t.as_str()).collect();
    let Some(choice) = prompt.select("Account type", &labels)? else {
        return Ok(());
    };

    match ledger.create_account(ACCOUNT_TYPES[choice]) {
        Ok(number) => output::success(&format!("Account created: {}", number)),
        Err(e) => output::error(&e.to_string()),
    }
    Ok(())
}

pub fn list(ledger: &Ledger) {
    let accounts = ledger.get_user_accounts();
    if accounts.is_empty() {
        output::info("You have no accounts yet.");
        return;
    }

    let mut table = create_table();
    table.set_header(vec!["Account", "Type", "Balance", "Opened"]);
    for account in accounts {
        table.add_row(vec![
            Cell::new(&account.account_number),
            Cell::new(account.account_type),
            Cell::new(format_money(account.balance)).set_alignment(CellAlignment::Right),
            Cell::new(account.created_at.format("%Y-%m-%d %H:%M")),
        ]);
    }
    println!("{table}");
}

pub fn history(ledger: &Ledger, prompt: &mut Prompt) -> Result<()> {
    let Some(number) = read_account_number(prompt)? else {
        return Ok(());
    };
    let Some(account) = ledger.get_account(&number) else {
        output::error("Account not found.");
        return Ok(());
    };

    output::header(&format!(
        "{} ({}) balance {}",
        account.account_number,
        account.account_type,
        format_money(account.balance)
    ));

    let transactions = ledger.get_account_transactions(&number);
    if transactions.is_empty() {
        output::info("No transactions for this account.");
        return Ok(());
    }

    let mut table = create_table();
    table.set_header(vec!["ID", "Type", "Amount", "Date", "Description"]);
    for tx in transactions {
        table.add_row(vec![
            Cell::new(&tx.transaction_id),
            Cell::new(tx.transaction_type),
            Cell::new(format_money(tx.amount)).set_alignment(CellAlignment::Right),
            Cell::new(tx.timestamp.format("%Y-%m-%d %H:%M")),
            Cell::new(&tx.description),
        ]);
    }
    println!("{table}");
    Ok(())
}
