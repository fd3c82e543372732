//! Ledger service - registration, sessions, accounts and money movement
//!
//! Holds the three collections in memory plus the current session. Every
//! mutation runs the same steps: validate, authorize (session + ownership),
//! mutate, append the audit record, then persist the touched collections
//! before returning. Persistence is best-effort: a failed save is logged
//! and the operation still reports its in-memory outcome.

use std::collections::HashSet;

use chrono::Utc;
use rand::Rng;
use rust_decimal::Decimal;

use crate::domain::result::{LedgerError, Result};
use crate::domain::validation::{is_valid_password, is_valid_username};
use crate::domain::{Account, AccountType, Record, Transaction, TransactionType, User};
use crate::ports::{CredentialHasher, LoadOutcome, RecordStore};

const ACCOUNT_NUMBER_MIN: u32 = 100_000;
const ACCOUNT_NUMBER_MAX: u32 = 999_999;

/// Random draws before falling back to a linear scan for a free number
const MAX_RANDOM_DRAWS: usize = 1_000;

/// Malformed lines dropped per file during startup load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkippedRecords {
    pub users: usize,
    pub accounts: usize,
    pub transactions: usize,
}

impl SkippedRecords {
    pub fn total(&self) -> usize {
        self.users + self.accounts + self.transactions
    }
}

/// Account and ledger operations for a single interactive session
pub struct LedgerService<S: RecordStore> {
    store: S,
    hasher: Box<dyn CredentialHasher>,
    users: Vec<User>,
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
    /// Username of the logged-in user
    session: Option<String>,
    skipped: SkippedRecords,
    last_transaction_millis: i64,
    /// Salt and digest checked when a login names no usable user
    decoy_credentials: (String, String),
}

impl<S: RecordStore> LedgerService<S> {
    /// Load every collection from `store`.
    ///
    /// A collection that fails to load is logged and starts empty.
    pub fn open(store: S, hasher: Box<dyn CredentialHasher>) -> Self {
        let users = load_or_empty::<S, User>(&store);
        let accounts = load_or_empty::<S, Account>(&store);
        let transactions = load_or_empty::<S, Transaction>(&store);

        let skipped = SkippedRecords {
            users: users.skipped,
            accounts: accounts.skipped,
            transactions: transactions.skipped,
        };
        if skipped.total() > 0 {
            tracing::warn!(
                users = skipped.users,
                accounts = skipped.accounts,
                transactions = skipped.transactions,
                "malformed records were dropped on load"
            );
        }

        let last_transaction_millis = transactions
            .records
            .iter()
            .filter_map(|tx| tx.transaction_id.strip_prefix("TXN")?.parse::<i64>().ok())
            .max()
            .unwrap_or(0);

        tracing::info!(
            users = users.records.len(),
            accounts = accounts.records.len(),
            transactions = transactions.records.len(),
            hasher = hasher.name(),
            "ledger loaded"
        );

        let decoy_salt = hasher.generate_salt();
        let decoy_digest = hasher.hash_password("", &decoy_salt).unwrap_or_default();

        Self {
            store,
            hasher,
            users: users.records,
            accounts: accounts.records,
            transactions: transactions.records,
            session: None,
            skipped,
            last_transaction_millis,
            decoy_credentials: (decoy_salt, decoy_digest),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn skipped_on_load(&self) -> SkippedRecords {
        self.skipped
    }

    // === Users & session ===

    /// Create an active user. Usernames are unique (case-sensitive).
    pub fn register(&mut self, username: &str, password: &str) -> Result<()> {
        if !is_valid_username(username) {
            return Err(LedgerError::validation(
                "username must be 3-20 letters, digits or underscores",
            ));
        }
        if !is_valid_password(password) {
            return Err(LedgerError::validation("password must be at least 8 characters"));
        }
        if self.users.iter().any(|u| u.username == username) {
            tracing::debug!(username, "registration rejected: username taken");
            return Err(LedgerError::DuplicateUsername);
        }

        let salt = self.hasher.generate_salt();
        let digest = self.hasher.hash_password(password, &salt)?;
        self.users.push(User::new(username, digest, salt));
        self.persist(&self.users);

        tracing::info!(username, "user registered");
        Ok(())
    }

    /// Start a session. A failed attempt leaves any current session as is.
    pub fn login(&mut self, username: &str, password: &str) -> Result<()> {
        let user = if is_valid_username(username) {
            self.users.iter().find(|u| u.username == username && u.is_active)
        } else {
            None
        };

        // Unknown and inactive users cost one hash too
        let verified = match user {
            Some(u) => self.hasher.verify_password(password, &u.salt, &u.password_digest),
            None => {
                let (salt, digest) = &self.decoy_credentials;
                self.hasher.verify_password(password, salt, digest);
                false
            }
        };

        if !verified {
            tracing::info!(username, "login failed");
            return Err(LedgerError::InvalidCredentials);
        }

        self.session = Some(username.to_string());
        tracing::info!(username, "login succeeded");
        Ok(())
    }

    /// Always succeeds, also without a session
    pub fn logout(&mut self) {
        if let Some(username) = self.session.take() {
            tracing::info!(username = %username, "logged out");
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        let username = self.session.as_deref()?;
        self.users.iter().find(|u| u.username == username)
    }

    /// Administrative switch for `User::is_active`. Inactive users cannot log in.
    pub fn set_user_active(&mut self, username: &str, active: bool) -> Result<()> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.username == username)
            .ok_or(LedgerError::UserNotFound)?;
        user.is_active = active;
        self.persist(&self.users);

        tracing::info!(username, active, "user activity changed");
        Ok(())
    }

    // === Accounts ===

    /// Open a zero-balance account for the session user; returns its number
    pub fn create_account(&mut self, account_type: AccountType) -> Result<String> {
        let owner = self.session_user()?.to_string();
        let account_number = self.generate_account_number()?;

        self.accounts
            .push(Account::new(account_number.clone(), owner.as_str(), account_type));
        self.persist(&self.accounts);

        tracing::info!(owner = %owner, account = %account_number, %account_type, "account created");
        Ok(account_number)
    }

    /// The account, if it exists and belongs to the session user
    pub fn get_account(&self, account_number: &str) -> Option<&Account> {
        let username = self.session.as_deref()?;
        self.accounts
            .iter()
            .find(|a| a.account_number == account_number && a.is_owned_by(username))
    }

    /// Accounts of the session user, in store order
    pub fn get_user_accounts(&self) -> Vec<&Account> {
        match self.session.as_deref() {
            Some(username) => self.accounts.iter().filter(|a| a.is_owned_by(username)).collect(),
            None => Vec::new(),
        }
    }

    /// Transactions of an owned account, in store order. Empty when the
    /// account is missing or not owned.
    pub fn get_account_transactions(&self, account_number: &str) -> Vec<&Transaction> {
        if self.get_account(account_number).is_none() {
            return Vec::new();
        }
        self.transactions
            .iter()
            .filter(|tx| tx.account_number == account_number)
            .collect()
    }

    // === Money movement ===

    pub fn deposit(&mut self, account_number: &str, amount: Decimal) -> Result<()> {
        self.apply(account_number, amount, TransactionType::Deposit)
    }

    /// Rejected with [`LedgerError::InsufficientFunds`] when `amount`
    /// exceeds the balance; nothing changes in that case.
    pub fn withdraw(&mut self, account_number: &str, amount: Decimal) -> Result<()> {
        self.apply(account_number, amount, TransactionType::Withdrawal)
    }

    fn apply(&mut self, account_number: &str, amount: Decimal, kind: TransactionType) -> Result<()> {
        let username = self.session_user()?.to_string();
        if amount <= Decimal::ZERO {
            return Err(LedgerError::validation("amount must be positive"));
        }

        let account = self
            .accounts
            .iter_mut()
            .find(|a| a.account_number == account_number && a.is_owned_by(&username))
            .ok_or(LedgerError::AccountNotFound)?;

        match kind {
            TransactionType::Deposit => account.deposit(amount)?,
            TransactionType::Withdrawal => account.withdraw(amount).map_err(|e| {
                tracing::info!(account = account_number, %amount, error = %e, "withdrawal refused");
                e
            })?,
        }
        let balance = account.balance;

        let transaction_id = self.next_transaction_id();
        self.transactions.push(Transaction::new(
            transaction_id,
            account_number,
            kind,
            amount,
            kind.default_description(),
        ));

        self.persist(&self.accounts);
        self.persist(&self.transactions);

        tracing::info!(account = account_number, %kind, %amount, %balance, "ledger entry recorded");
        Ok(())
    }

    // === Helpers ===

    fn session_user(&self) -> Result<&str> {
        self.session.as_deref().ok_or(LedgerError::Unauthenticated)
    }

    fn generate_account_number(&self) -> Result<String> {
        let taken: HashSet<&str> = self.accounts.iter().map(|a| a.account_number.as_str()).collect();

        let mut rng = rand::thread_rng();
        for _ in 0..MAX_RANDOM_DRAWS {
            let candidate = format!("ACC{}", rng.gen_range(ACCOUNT_NUMBER_MIN..=ACCOUNT_NUMBER_MAX));
            if !taken.contains(candidate.as_str()) {
                return Ok(candidate);
            }
        }

        (ACCOUNT_NUMBER_MIN..=ACCOUNT_NUMBER_MAX)
            .map(|n| format!("ACC{}", n))
            .find(|candidate| !taken.contains(candidate.as_str()))
            .ok_or(LedgerError::AccountNumbersExhausted)
    }

    /// `TXN` + epoch millis, strictly increasing within the process
    fn next_transaction_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        let millis = match self.last_transaction_millis.checked_add(1) {
            Some(next) => now.max(next),
            None => {
                tracing::warn!(
                    last = self.last_transaction_millis,
                    "transaction id counter exhausted; restarting from clock"
                );
                now
            }
        };
        self.last_transaction_millis = millis;
        format!("TXN{}", millis)
    }

    fn persist<T: Record>(&self, records: &[T]) {
        if let Err(e) = self.store.save(records) {
            tracing::error!(
                file = T::FILE_NAME,
                error = %e,
                "failed to save records; in-memory state is ahead of disk"
            );
        }
    }
}

fn load_or_empty<S: RecordStore, T: Record>(store: &S) -> LoadOutcome<T> {
    store.load::<T>().unwrap_or_else(|e| {
        tracing::error!(file = T::FILE_NAME, error = %e, "failed to load records");
        LoadOutcome::empty()
    })
}
