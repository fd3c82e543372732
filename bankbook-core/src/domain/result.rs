//! Result and error types for ledger operations

use thiserror::Error;

use crate::ports::CredentialError;

/// Outcome of a rejected ledger operation.
///
/// Authorization failures are folded into [`LedgerError::AccountNotFound`]:
/// callers cannot tell "does not exist" apart from "belongs to someone else".
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Username is already taken")]
    DuplicateUsername,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("No user is logged in")]
    Unauthenticated,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Insufficient funds")]
    InsufficientFunds,

    #[error("No free account numbers left")]
    AccountNumbersExhausted,

    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),
}

impl LedgerError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Ledger result type
pub type Result<T> = std::result::Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LedgerError::validation("amount must be positive");
        assert_eq!(err.to_string(), "Validation error: amount must be positive");
        assert_eq!(LedgerError::AccountNotFound.to_string(), "Account not found");
    }
}
