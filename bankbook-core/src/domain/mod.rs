//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies.

mod account;
mod transaction;
mod user;
pub mod record;
pub mod result;
pub mod validation;

pub use account::{Account, AccountType};
pub use transaction::{Transaction, TransactionType};
pub use user::User;
pub use record::{ParseError, Record};
pub use result::LedgerError;
