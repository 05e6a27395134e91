//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod reverse_charge_ledger;

pub use reverse_charge_ledger::{LedgerWriteError, ReverseChargeLedgerRepository};
