//! In-Memory Store Adapters
//!
//! Reference implementations of the ledger's store ports backed by process
//! memory. They provide the read-after-write visibility the ports require
//! and are the store used in tests and single-node deployments; a durable
//! implementation can replace them without touching core logic.

pub mod account_store;
pub mod transaction_log;

pub use account_store::InMemoryAccountStore;
pub use transaction_log::InMemoryTransactionLog;
