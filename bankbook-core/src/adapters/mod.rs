//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - Text files in a data directory for the RecordStore port
//! - An in-memory RecordStore for tests and dry runs
//! - SHA-256 and Argon2id for the CredentialHasher port

pub mod argon2_hasher;
pub mod memory;
pub mod sha256_hasher;
pub mod text_file;

pub use argon2_hasher::Argon2Hasher;
pub use memory::MemoryStore;
pub use sha256_hasher::Sha256Hasher;
pub use text_file::TextFileStore;
