//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions.

pub mod ledger;
pub mod logging;

pub use ledger::{LedgerService, SkippedRecords};
pub use logging::{init_logging, LogFormat};
