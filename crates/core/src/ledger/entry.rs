//! Reverse-charge ledger entries.

use chrono::NaiveDate;
use declara_shared::types::{
    LedgerEntryId, LegalEntityId, SourceDocumentId, SourceLineId, TenantId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::declaration::codes::ReverseChargeMap;
use crate::declaration::intake::PurchaseLine;

/// One reverse-charge line of an approved purchase document.
///
/// Created once at approval time and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReverseChargeLedgerEntry {
    /// Unique identifier for this entry.
    pub id: LedgerEntryId,
    /// Tenant owning the document.
    pub tenant_id: TenantId,
    /// Legal entity the document was booked under, if any.
    pub legal_entity_id: Option<LegalEntityId>,
    /// Purchase document.
    pub source_document_id: SourceDocumentId,
    /// Purchase line.
    pub source_line_id: SourceLineId,
    /// Purchase-side field code of the line.
    pub input_field_code: String,
    /// Sales-side field code the tax is declared under.
    pub output_field_code: String,
    /// Taxable base.
    pub base_amount: Decimal,
    /// Tax amount.
    pub tax_amount: Decimal,
    /// Tax-relevant date of the document.
    pub tax_date: NaiveDate,
}

/// A purchase document at the moment it is approved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovedPurchaseDocument {
    /// Tenant owning the document.
    pub tenant_id: TenantId,
    /// Legal entity the document is booked under.
    pub legal_entity_id: Option<LegalEntityId>,
    /// Purchase document.
    pub document_id: SourceDocumentId,
    /// Tax-relevant date.
    pub tax_date: NaiveDate,
    /// Lines of the document.
    pub lines: Vec<PurchaseLine>,
}

/// Builds ledger entries from approved documents.
pub struct ReverseChargeLedger;

impl ReverseChargeLedger {
    /// Returns one entry per line whose field code has a reverse-charge mapping.
    ///
    /// Lines without a code or with an unmapped code produce nothing.
    #[must_use]
    pub fn entries_for(
        document: &ApprovedPurchaseDocument,
        map: &ReverseChargeMap,
    ) -> Vec<ReverseChargeLedgerEntry> {
        document
            .lines
            .iter()
            .filter_map(|line| {
                let input_code = line.field_code.as_deref()?.trim();
                let output_code = map.output_code(input_code)?;
                Some(ReverseChargeLedgerEntry {
                    id: LedgerEntryId::new(),
                    tenant_id: document.tenant_id,
                    legal_entity_id: document.legal_entity_id,
                    source_document_id: document.document_id,
                    source_line_id: line.line_id,
                    input_field_code: input_code.to_string(),
                    output_field_code: output_code.to_string(),
                    base_amount: line.base,
                    tax_amount: line.tax,
                    tax_date: document.tax_date,
                })
            })
            .collect()
    }
}
