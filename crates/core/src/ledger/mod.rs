//! Reverse-charge ledger.
//!
//! Approved purchase documents with reverse-charge lines leave a permanent
//! trace: one entry per qualifying line, recording the input code it came
//! from and the output code it is declared under.

pub mod entry;

pub use entry::{ApprovedPurchaseDocument, ReverseChargeLedger, ReverseChargeLedgerEntry};
