//! Transaction domain model

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::record::{format_timestamp, parse_decimal, parse_timestamp, split_leading, ParseError, Record};

/// Direction of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "DEPOSIT",
            TransactionType::Withdrawal => "WITHDRAWAL",
        }
    }

    /// Description recorded for entries created by the ledger
    pub fn default_description(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "Deposit",
            TransactionType::Withdrawal => "Withdrawal",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEPOSIT" => Ok(TransactionType::Deposit),
            "WITHDRAWAL" => Ok(TransactionType::Withdrawal),
            other => Err(ParseError::invalid("type", other)),
        }
    }
}

/// An immutable audit record of one deposit or withdrawal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub account_number: String,
    pub transaction_type: TransactionType,
    /// Always positive; direction comes from `transaction_type`
    pub amount: Decimal,
    pub timestamp: NaiveDateTime,
    /// Free text, may contain commas
    pub description: String,
}

impl Transaction {
    pub fn new(
        transaction_id: impl Into<String>,
        account_number: impl Into<String>,
        transaction_type: TransactionType,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            account_number: account_number.into(),
            transaction_type,
            amount,
            timestamp: Local::now().naive_local(),
            description: description.into(),
        }
    }
}

impl Record for Transaction {
    const FILE_NAME: &'static str = "transactions.txt";

    fn to_line(&self) -> String {
        // Newlines would split the record across lines
        let description = self.description.replace(['\r', '\n'], " ");
        format!(
            "{},{},{},{},{},{}",
            self.transaction_id,
            self.account_number,
            self.transaction_type,
            self.amount,
            format_timestamp(&self.timestamp),
            description
        )
    }

    fn from_line(line: &str) -> Result<Self, ParseError> {
        let fields = split_leading(line, 6)?;
        let amount = parse_decimal("amount", fields[3])?;
        if amount <= Decimal::ZERO {
            return Err(ParseError::invalid("amount", fields[3]));
        }
        Ok(Self {
            transaction_id: fields[0].to_string(),
            account_number: fields[1].to_string(),
            transaction_type: fields[2].parse()?,
            amount,
            timestamp: parse_timestamp("timestamp", fields[4])?,
            description: fields[5].to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_description_keeps_commas() {
        let tx = Transaction::from_line("TXN1,ACC100001,DEPOSIT,50.0,2024-01-01T00:00,rent, jan")
            .unwrap();
        assert_eq!(tx.transaction_id, "TXN1");
        assert_eq!(tx.account_number, "ACC100001");
        assert_eq!(tx.transaction_type, TransactionType::Deposit);
        assert_eq!(tx.amount, Decimal::new(50, 0));
        assert_eq!(
            tx.timestamp,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap()
        );
        assert_eq!(tx.description, "rent, jan");
    }

    #[test]
    fn test_transaction_line_round_trip() {
        let tx = Transaction::new(
            "TXN1700000000000",
            "ACC654321",
            TransactionType::Withdrawal,
            Decimal::new(4000, 2),
            "groceries, weekly",
        );
        assert_eq!(Transaction::from_line(&tx.to_line()).unwrap(), tx);
    }

    #[test]
    fn test_transaction_rejects_bad_lines() {
        assert!(Transaction::from_line("TXN1,ACC100001,DEPOSIT,50.0,2024-01-01T00:00").is_err());
        assert!(Transaction::from_line("TXN1,ACC100001,TRANSFER,50.0,2024-01-01T00:00,x").is_err());
        assert!(Transaction::from_line("TXN1,ACC100001,DEPOSIT,0,2024-01-01T00:00,x").is_err());
        assert!(Transaction::from_line("TXN1,ACC100001,DEPOSIT,50.0,not-a-date,x").is_err());
    }

    #[test]
    fn test_description_newlines_flattened() {
        let tx = Transaction::new("TXN2", "ACC654321", TransactionType::Deposit, Decimal::ONE, "a\nb");
        assert!(!tx.to_line().contains('\n'));
    }
}
