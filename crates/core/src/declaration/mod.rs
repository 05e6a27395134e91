//! Periodic VAT declaration aggregation.
//!
//! This module turns the tax lines of one period into a declaration:
//! - Grouping of raw lines by declaration field code
//! - Derivation of output lines from reverse-charge purchases
//! - Summary sections and the declaration fields
//! - The XML filing document

pub mod codes;
pub mod document;
pub mod error;
pub mod grouper;
pub mod intake;
pub mod mapper;
pub mod reverse_charge;
pub mod sections;
pub mod service;
pub mod source;
pub mod types;

#[cfg(test)]
mod service_props;

pub use codes::{REVERSE_CHARGE_MAP, ReverseChargeMap};
pub use document::{ROOT_ELEMENT, format_amount, render_document};
pub use error::DeclarationError;
pub use grouper::{GroupedLines, group_lines};
pub use intake::{AdjustmentDocument, DeclarationInputs, PurchaseLine, SalesLine, SourceRecord};
pub use mapper::map_declaration;
pub use reverse_charge::{derive_reverse_charge_lines, merge_output_lines};
pub use service::{DeclarationRun, DeclarationService};
pub use source::{TaxLineSource, fetch_in_batches};
pub use types::{
    AggregatedLine, Declaration, DeclarationField, DeclarationHeader, DeclarationRequest,
    Direction, RawTaxLine, SectionTotals, TaxPeriod,
};
