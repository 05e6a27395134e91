//! Core business logic for Declara.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, aggregation rules, and calculations live here.
//!
//! # Modules
//!
//! - `declaration` - Grouping, reverse charge, sections, fields and the filing document
//! - `ledger` - Reverse-charge ledger entries derived from approved purchases

pub mod declaration;
pub mod ledger;
