//! Typed source records and their validation at the ingestion boundary.
//!
//! Collaborators hand over sales lines, purchase lines and adjustment
//! documents. Everything is validated and normalized here so the grouping
//! functions only ever see well-formed `RawTaxLine`s.

use chrono::NaiveDate;
use declara_shared::types::{SourceDocumentId, SourceLineId};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::codes::code_for_rate;
use super::error::DeclarationError;
use super::types::RawTaxLine;

/// Line of a posted sales document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesLine {
    /// Sales document.
    pub source_id: SourceDocumentId,
    /// Line within the document.
    pub line_id: SourceLineId,
    /// Taxable base.
    pub base: Decimal,
    /// Tax amount.
    pub tax: Decimal,
    /// Rate in percent.
    #[serde(default)]
    pub rate: Option<Decimal>,
    /// Declaration field code.
    #[serde(default)]
    pub field_code: Option<String>,
    /// Tax-inclusive amount.
    #[serde(default)]
    pub gross: Option<Decimal>,
    /// Non-deductible tax, rarely present on the sales side.
    #[serde(default)]
    pub non_deductible: Option<Decimal>,
}

/// Line of an approved purchase document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseLine {
    /// Purchase document.
    pub source_id: SourceDocumentId,
    /// Line within the document.
    pub line_id: SourceLineId,
    /// Taxable base.
    pub base: Decimal,
    /// Tax amount.
    pub tax: Decimal,
    /// Rate in percent.
    #[serde(default)]
    pub rate: Option<Decimal>,
    /// Declaration field code.
    #[serde(default)]
    pub field_code: Option<String>,
    /// Tax-inclusive amount.
    #[serde(default)]
    pub gross: Option<Decimal>,
    /// Non-deductible part of the tax.
    #[serde(default)]
    pub non_deductible: Decimal,
    /// Fee value.
    #[serde(default)]
    pub fee: Option<Decimal>,
}

/// Approved adjustment (credit) document, aggregated at document level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentDocument {
    /// Adjustment document.
    pub source_id: SourceDocumentId,
    /// Taxable subtotal, positive.
    pub subtotal: Decimal,
    /// Tax amount, positive.
    pub tax: Decimal,
    /// Gross total, positive.
    pub total: Decimal,
    /// Tax-relevant date.
    #[serde(default)]
    pub tax_date: Option<NaiveDate>,
}

/// A record as delivered by the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceRecord {
    /// Posted sales line.
    Sales(SalesLine),
    /// Approved purchase line.
    Purchase(PurchaseLine),
    /// Approved adjustment document.
    Adjustment(AdjustmentDocument),
}

impl SourceRecord {
    /// Parses one JSON record from the record store.
    pub fn from_json(value: serde_json::Value) -> Result<Self, DeclarationError> {
        serde_json::from_value(value).map_err(|e| DeclarationError::MalformedRecord {
            kind: "source",
            reason: e.to_string(),
        })
    }
}

/// Validated inputs of one declaration run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeclarationInputs {
    /// Posted sales lines of the period.
    pub sales: Vec<SalesLine>,
    /// Approved purchase lines of the period.
    pub purchases: Vec<PurchaseLine>,
    /// Approved adjustment documents of the period.
    pub adjustments: Vec<AdjustmentDocument>,
}

impl DeclarationInputs {
    /// Sorts untyped records into their lists.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = SourceRecord>) -> Self {
        let mut inputs = Self::default();
        for record in records {
            match record {
                SourceRecord::Sales(line) => inputs.sales.push(line),
                SourceRecord::Purchase(line) => inputs.purchases.push(line),
                SourceRecord::Adjustment(doc) => inputs.adjustments.push(doc),
            }
        }
        inputs
    }

    /// Total number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sales.len() + self.purchases.len() + self.adjustments.len()
    }

    /// Returns true if there is nothing to aggregate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn normalize_code(code: Option<&str>) -> Option<String> {
    code.map(str::trim)
        .filter(|code| !code.is_empty())
        .map(String::from)
}

fn validate_rate(kind: &'static str, rate: Option<Decimal>) -> Result<(), DeclarationError> {
    match rate {
        Some(rate) if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED => {
            Err(DeclarationError::MalformedRecord {
                kind,
                reason: format!("rate {rate} outside 0..=100"),
            })
        }
        _ => Ok(()),
    }
}

impl SalesLine {
    /// Converts into a grouper line.
    pub fn to_raw_line(&self) -> Result<RawTaxLine, DeclarationError> {
        validate_rate("sales", self.rate)?;
        Ok(RawTaxLine {
            source_id: self.source_id,
            field_code: normalize_code(self.field_code.as_deref()),
            rate: self.rate,
            base: self.base,
            tax: self.tax,
            gross: self.gross,
            non_deductible: self.non_deductible.unwrap_or(Decimal::ZERO),
            fee: None,
        })
    }
}

impl PurchaseLine {
    /// Converts into a grouper line.
    pub fn to_raw_line(&self) -> Result<RawTaxLine, DeclarationError> {
        validate_rate("purchase", self.rate)?;
        if self.non_deductible < Decimal::ZERO {
            return Err(DeclarationError::MalformedRecord {
                kind: "purchase",
                reason: format!("negative non-deductible amount {}", self.non_deductible),
            });
        }
        Ok(RawTaxLine {
            source_id: self.source_id,
            field_code: normalize_code(self.field_code.as_deref()),
            rate: self.rate,
            base: self.base,
            tax: self.tax,
            gross: self.gross,
            non_deductible: self.non_deductible,
            fee: self.fee,
        })
    }
}

impl AdjustmentDocument {
    /// Effective rate: tax over subtotal in whole percent, or the default
    /// when the subtotal is not positive.
    pub fn effective_rate(&self, default_rate: Decimal) -> Result<Decimal, DeclarationError> {
        if self.subtotal <= Decimal::ZERO {
            return Ok(default_rate);
        }
        self.tax
            .checked_div(self.subtotal)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map(|rate| rate.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .ok_or_else(|| DeclarationError::MalformedRecord {
                kind: "adjustment",
                reason: format!(
                    "tax {} over subtotal {} is out of range",
                    self.tax, self.subtotal
                ),
            })
    }

    /// Normalizes the document into one negative synthetic sales line.
    pub fn to_raw_line(&self, default_rate: Decimal) -> Result<RawTaxLine, DeclarationError> {
        let rate = self.effective_rate(default_rate)?;
        Ok(RawTaxLine {
            source_id: self.source_id,
            field_code: Some(code_for_rate(rate).to_string()),
            rate: Some(rate),
            base: -self.subtotal,
            tax: -self.tax,
            gross: Some(-self.total),
            non_deductible: Decimal::ZERO,
            fee: None,
        })
    }
}
