//! `SeaORM` entity definitions.

pub mod reverse_charge_ledger_entries;
