//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The ledger
//! depends only on these traits, not on concrete implementations.

mod credential_hasher;
mod record_store;

pub use credential_hasher::{digests_match, CredentialError, CredentialHasher, SALT_LEN};
pub(crate) use credential_hasher::{decode_salt, encode};
pub use record_store::{decode_lines, encode_lines, LoadOutcome, RecordStore, StoreError, StoreResult};
