//! Interactive menu loop
//!
//! Anonymous sessions see {Login, Register, Exit}; once logged in the
//! account menu is shown until the user logs out.

use anyhow::Result;

use crate::commands::{accounts, money, session, Ledger};
use crate::output;
use crate::prompt::Prompt;

const ANONYMOUS_MENU: [&str; 3] = ["Login", "Register", "Exit"];

const USER_MENU: [&str; 6] = [
    "Create account",
    "View accounts",
    "Deposit",
    "Withdraw",
    "View transactions",
    "Logout",
];

pub fn run(ledger: &mut Ledger, prompt: &mut Prompt) -> Result<()> {
    output::header("Welcome to Bankbook");

    loop {
        let username = ledger.current_user().map(|u| u.username.clone());
        let keep_going = match username {
            None => anonymous_menu(ledger, prompt)?,
            Some(username) => user_menu(ledger, prompt, &username)?,
        };
        if !keep_going {
            break;
        }
    }

    output::info("Thank you for using Bankbook. Goodbye!");
    Ok(())
}

fn anonymous_menu(ledger: &mut Ledger, prompt: &mut Prompt) -> Result<bool> {
    let Some(choice) = prompt.select("Main menu", &ANONYMOUS_MENU)? else {
        return Ok(false);
    };

    match choice {
        0 => session::login(ledger, prompt)?,
        1 => session::register(ledger, prompt)?,
        _ => return Ok(false),
    }
    Ok(true)
}

fn user_menu(ledger: &mut Ledger, prompt: &mut Prompt, username: &str) -> Result<bool> {
    let title = format!("Logged in as {}", username);
    let Some(choice) = prompt.select(&title, &USER_MENU)? else {
        return Ok(false);
    };

    match choice {
        0 => accounts::create(ledger, prompt)?,
        1 => accounts::list(ledger),
        2 => money::deposit(ledger, prompt)?,
        3 => money::withdraw(ledger, prompt)?,
        4 => accounts::history(ledger, prompt)?,
        _ => session::logout(ledger),
    }
    Ok(true)
}
