//! Deposits and withdrawals

use anyhow::Result;
use bankbook_core::validation::{is_valid_amount, parse_amount};
use bankbook_core::TransactionType;
use rust_decimal::Decimal;

use super::{read_account_number, Ledger};
use crate::output::{self, format_money};
use crate::prompt::Prompt;

pub fn deposit(ledger: &mut Ledger, prompt: &mut Prompt) -> Result<()> {
    transfer(ledger, prompt, TransactionType::Deposit)
}

pub fn withdraw(ledger: &mut Ledger, prompt: &mut Prompt) -> Result<()> {
    transfer(ledger, prompt, TransactionType::Withdrawal)
}

fn transfer(ledger: &mut Ledger, prompt: &mut Prompt, kind: TransactionType) -> Result<()> {
    let Some(number) = read_account_number(prompt)? else {
        return Ok(());
    };
    let Some(amount) = read_amount(prompt)? else {
        return Ok(());
    };

    let result = match kind {
        TransactionType::Deposit => ledger.deposit(&number, amount),
        TransactionType::Withdrawal => ledger.withdraw(&number, amount),
    };

    match result {
        Ok(()) => {
            let balance = ledger
                .get_account(&number)
                .map(|a| a.balance)
                .unwrap_or(Decimal::ZERO);
            output::success(&format!(
                "{} of {} completed. New balance: {}",
                kind.default_description(),
                format_money(amount),
                format_money(balance)
            ));
        }
        Err(e) => output::error(&e.to_string()),
    }
    Ok(())
}

fn read_amount(prompt: &mut Prompt) -> Result<Option<Decimal>> {
    let Some(input) = prompt.text("Amount")? else {
        return Ok(None);
    };
    let input = input.trim();

    if !is_valid_amount(input) {
        output::error("Invalid amount. Use a positive number with at most 2 decimals, up to 1,000,000.");
        return Ok(None);
    }
    Ok(parse_amount(input))
}
