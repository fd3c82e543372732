//! Account domain model

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::record::{format_timestamp, parse_decimal, parse_timestamp, split_exact, ParseError, Record};
use super::result::{LedgerError, Result};

/// Kind of bank account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Savings,
    Checking,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Savings => "SAVINGS",
            AccountType::Checking => "CHECKING",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "SAVINGS" => Ok(AccountType::Savings),
            "CHECKING" => Ok(AccountType::Checking),
            other => Err(ParseError::invalid("accountType", other)),
        }
    }
}

/// A bank account owned by a single user.
///
/// The balance never goes below zero: [`Account::withdraw`] refuses any
/// amount larger than the current balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// `ACC` followed by six digits
    pub account_number: String,
    /// Username of the owner
    pub owner: String,
    pub balance: Decimal,
    pub account_type: AccountType,
    /// Local time of creation
    pub created_at: NaiveDateTime,
}

impl Account {
    /// Open an account with a zero balance
    pub fn new(
        account_number: impl Into<String>,
        owner: impl Into<String>,
        account_type: AccountType,
    ) -> Self {
        Self {
            account_number: account_number.into(),
            owner: owner.into(),
            balance: Decimal::new(0, 2),
            account_type,
            created_at: Local::now().naive_local(),
        }
    }

    pub fn is_owned_by(&self, username: &str) -> bool {
        self.owner == username
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::validation("amount must be positive"));
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::validation("balance overflow"))?;
        Ok(())
    }

    /// Leaves the balance untouched when `amount` exceeds it
    pub fn withdraw(&mut self, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::validation("amount must be positive"));
        }
        if amount > self.balance {
            return Err(LedgerError::InsufficientFunds);
        }
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::validation("balance overflow"))?;
        Ok(())
    }
}

impl Record for Account {
    const FILE_NAME: &'static str = "accounts.txt";

    fn to_line(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.account_number,
            self.owner,
            self.balance,
            self.account_type,
            format_timestamp(&self.created_at)
        )
    }

    fn from_line(line: &str) -> std::result::Result<Self, ParseError> {
        let fields = split_exact(line, 5)?;
        let balance = parse_decimal("balance", fields[2])?;
        if balance < Decimal::ZERO {
            return Err(ParseError::invalid("balance", fields[2]));
        }
        Ok(Self {
            account_number: fields[0].to_string(),
            owner: fields[1].to_string(),
            balance,
            account_type: fields[3].parse()?,
            created_at: parse_timestamp("createdAt", fields[4])?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn account() -> Account {
        let mut account = Account::new("ACC123456", "bob123", AccountType::Savings);
        account.created_at = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, 30, 15)
            .unwrap();
        account
    }

    #[test]
    fn test_account_line_layout() {
        let mut acc = account();
        acc.balance = Decimal::new(12345, 2);
        assert_eq!(acc.to_line(), "ACC123456,bob123,123.45,SAVINGS,2024-05-01T09:30:15");
        assert_eq!(Account::from_line(&acc.to_line()).unwrap(), acc);
    }

    #[test]
    fn test_account_accepts_legacy_values() {
        let acc = Account::from_line("ACC100001,bob123,50.0,CHECKING,2024-01-01T00:00").unwrap();
        assert_eq!(acc.balance, Decimal::new(50, 0));
        assert_eq!(acc.account_type, AccountType::Checking);
    }

    #[test]
    fn test_account_rejects_bad_lines() {
        assert!(Account::from_line("ACC100001,bob123,50.0,CHECKING").is_err());
        assert!(Account::from_line("ACC100001,bob123,50.0,BROKERAGE,2024-01-01T00:00").is_err());
        assert!(Account::from_line("ACC100001,bob123,fifty,SAVINGS,2024-01-01T00:00").is_err());
        assert!(Account::from_line("ACC100001,bob123,-1,SAVINGS,2024-01-01T00:00").is_err());
        assert!(Account::from_line("ACC100001,bob123,1,savings,2024-01-01T00:00").is_err());
    }

    #[test]
    fn test_withdraw_keeps_balance_non_negative() {
        let mut acc = account();
        acc.deposit(Decimal::new(10000, 2)).unwrap();
        assert!(matches!(
            acc.withdraw(Decimal::new(15000, 2)),
            Err(LedgerError::InsufficientFunds)
        ));
        assert_eq!(acc.balance, Decimal::new(10000, 2));

        acc.withdraw(Decimal::new(10000, 2)).unwrap();
        assert!(acc.balance.is_zero());
    }

    #[test]
    fn test_non_positive_amounts_rejected() {
        let mut acc = account();
        assert!(acc.deposit(Decimal::ZERO).is_err());
        assert!(acc.withdraw(Decimal::new(-1, 0)).is_err());
        assert!(acc.balance.is_zero());
    }

    #[test]
    fn test_deposit_overflow_leaves_balance() {
        let mut acc = account();
        acc.deposit(Decimal::MAX).unwrap();
        assert!(matches!(acc.deposit(Decimal::MAX), Err(LedgerError::Validation(_))));
        assert_eq!(acc.balance, Decimal::MAX);
    }
}
