//! Bankbook Core - ledger logic for a single-user banking session
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core business entities (User, Account, Transaction), validation
//! - **ports**: Trait definitions for external dependencies (RecordStore, CredentialHasher)
//! - **services**: Business logic orchestration (LedgerService)
//! - **adapters**: Concrete implementations (text files, SHA-256, Argon2id)

pub mod domain;
pub mod ports;
pub mod services;
pub mod adapters;
pub mod config;

use std::path::Path;

use anyhow::{Context, Result};

use adapters::{Argon2Hasher, Sha256Hasher, TextFileStore};
use config::{Config, HasherKind};
use ports::{CredentialError, CredentialHasher};

// Re-export commonly used types at crate root
pub use domain::{Account, AccountType, LedgerError, Transaction, TransactionType, User};
pub use domain::validation;
pub use services::{init_logging, LedgerService, LogFormat};

/// Main context for Bankbook operations
///
/// Holds the configuration and the ledger loaded from the data directory.
pub struct BankbookContext {
    pub config: Config,
    pub ledger: LedgerService<TextFileStore>,
}

impl BankbookContext {
    /// Load config, set up the hasher and open the data directory.
    ///
    /// Fails when the hasher cannot be configured or the directory is
    /// unusable or locked by another process.
    pub fn new(data_dir: &Path) -> Result<Self> {
        let config = Config::load(data_dir)?;
        Self::with_config(data_dir, config)
    }

    pub fn with_config(data_dir: &Path, config: Config) -> Result<Self> {
        let hasher = build_hasher(&config).context("Password hashing is unavailable")?;
        let store = TextFileStore::open(data_dir)
            .with_context(|| format!("Failed to open data directory: {:?}", data_dir))?;
        let ledger = LedgerService::open(store, hasher);

        Ok(Self { config, ledger })
    }
}

/// Instantiate the configured credential hasher
pub fn build_hasher(config: &Config) -> std::result::Result<Box<dyn CredentialHasher>, CredentialError> {
    Ok(match config.hasher {
        HasherKind::Sha256 => Box::new(Sha256Hasher::new()),
        HasherKind::Argon2 => Box::new(Argon2Hasher::new(&config.argon2)?),
    })
}
