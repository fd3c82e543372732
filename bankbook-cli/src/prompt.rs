//! Where shell input comes from
//!
//! On a terminal the dialoguer widgets are used. When stdin is piped the
//! shell reads one plain line per answer, so sessions can be scripted.
//! Every method returns `None` once input is exhausted.

use std::io::{self, Write};

use anyhow::Result;
use dialoguer::{Input, Password, Select};

use crate::output;

pub struct Prompt {
    lines: Option<io::Lines<io::StdinLock<'static>>>,
}

impl Prompt {
    pub fn detect() -> Self {
        if atty::is(atty::Stream::Stdin) {
            Self { lines: None }
        } else {
            Self { lines: Some(io::stdin().lines()) }
        }
    }

    /// Pick one of `items`; returns its index
    pub fn select(&mut self, title: &str, items: &[&str]) -> Result<Option<usize>> {
        if self.lines.is_none() {
            let choice = Select::new()
                .with_prompt(title)
                .items(items)
                .default(0)
                .interact_opt()?;
            return Ok(choice);
        }

        println!("\n{}", title);
        for (i, item) in items.iter().enumerate() {
            println!("{}. {}", i + 1, item);
        }
        loop {
            let Some(line) = self.read_line("Choose an option")? else {
                return Ok(None);
            };
            match line.trim().parse::<usize>() {
                Ok(n) if (1..=items.len()).contains(&n) => return Ok(Some(n - 1)),
                _ => output::error("Invalid option. Please try again."),
            }
        }
    }

    pub fn text(&mut self, label: &str) -> Result<Option<String>> {
        if self.lines.is_none() {
            let value = Input::<String>::new()
                .with_prompt(label)
                .allow_empty(true)
                .interact_text()?;
            return Ok(Some(value));
        }
        self.read_line(label)
    }

    /// Like `text`, without echo on a terminal
    pub fn password(&mut self, label: &str) -> Result<Option<String>> {
        if self.lines.is_none() {
            let value = Password::new()
                .with_prompt(label)
                .allow_empty_password(true)
                .interact()?;
            return Ok(Some(value));
        }
        self.read_line(label)
    }

    fn read_line(&mut self, label: &str) -> Result<Option<String>> {
        print!("{}: ", label);
        io::stdout().flush()?;

        let line = self.lines.as_mut().and_then(|lines| lines.next()).transpose()?;
        if line.is_none() {
            println!();
        }
        Ok(line)
    }
}
