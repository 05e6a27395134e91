//! Declaration domain types.

use chrono::{Datelike, NaiveDate};
use declara_shared::types::{LegalEntityId, SourceDocumentId, TenantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DeclarationError;

/// Whether an aggregated line belongs to the sales or the purchase side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Sales-side (output) tax.
    Output,
    /// Purchase-side (input) tax.
    Input,
}

/// A single monetary line fed into the grouper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTaxLine {
    /// Document the line came from.
    pub source_id: SourceDocumentId,
    /// Declaration field code; lines without one are ignored.
    pub field_code: Option<String>,
    /// Tax rate in percent.
    pub rate: Option<Decimal>,
    /// Taxable base.
    pub base: Decimal,
    /// Tax amount.
    pub tax: Decimal,
    /// Tax-inclusive amount; `base + tax` when absent.
    pub gross: Option<Decimal>,
    /// Non-deductible part of the tax.
    pub non_deductible: Decimal,
    /// Optional fee value.
    pub fee: Option<Decimal>,
}

/// Base/tax accumulated per field code and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedLine {
    /// Declaration field code.
    pub field_code: String,
    /// Sales or purchase side.
    pub direction: Direction,
    /// Base of lines taxed at the standard rate.
    pub base_standard: Decimal,
    /// Tax of lines taxed at the standard rate.
    pub vat_standard: Decimal,
    /// Base of lines taxed at the reduced rate.
    pub base_reduced: Decimal,
    /// Tax of lines taxed at the reduced rate.
    pub vat_reduced: Decimal,
    /// Base over all rates.
    pub total_base: Decimal,
    /// Tax over all rates.
    pub total_vat: Decimal,
    /// Gross over all rates.
    pub total_gross: Decimal,
    /// Accumulated non-deductible tax.
    pub vat_non_deductible: Decimal,
    /// Accumulated fee value.
    pub fee_value: Decimal,
    /// Number of contributing raw lines.
    pub entry_count: u32,
}

impl AggregatedLine {
    /// Creates an empty line for the given code and direction.
    #[must_use]
    pub fn new(field_code: impl Into<String>, direction: Direction) -> Self {
        Self {
            field_code: field_code.into(),
            direction,
            base_standard: Decimal::ZERO,
            vat_standard: Decimal::ZERO,
            base_reduced: Decimal::ZERO,
            vat_reduced: Decimal::ZERO,
            total_base: Decimal::ZERO,
            total_vat: Decimal::ZERO,
            total_gross: Decimal::ZERO,
            vat_non_deductible: Decimal::ZERO,
            fee_value: Decimal::ZERO,
            entry_count: 0,
        }
    }

    /// Adds every accumulator of `other` into `self`.
    pub fn absorb(&mut self, other: &Self) {
        self.base_standard += other.base_standard;
        self.vat_standard += other.vat_standard;
        self.base_reduced += other.base_reduced;
        self.vat_reduced += other.vat_reduced;
        self.total_base += other.total_base;
        self.total_vat += other.total_vat;
        self.total_gross += other.total_gross;
        self.vat_non_deductible += other.vat_non_deductible;
        self.fee_value += other.fee_value;
        self.entry_count += other.entry_count;
    }
}

/// Inclusive date range a declaration covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PeriodBounds")]
pub struct TaxPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

/// Unchecked wire form of a period.
#[derive(Deserialize)]
struct PeriodBounds {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<PeriodBounds> for TaxPeriod {
    type Error = DeclarationError;

    fn try_from(bounds: PeriodBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.start, bounds.end)
    }
}

impl TaxPeriod {
    /// Creates a period from explicit bounds.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DeclarationError> {
        if start > end {
            return Err(DeclarationError::InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates the period spanning one calendar month.
    pub fn month(year: i32, month: u32) -> Result<Self, DeclarationError> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(DeclarationError::InvalidMonth { year, month })?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or(DeclarationError::InvalidMonth { year, month })?;
        let end = next
            .pred_opt()
            .ok_or(DeclarationError::InvalidMonth { year, month })?;
        Ok(Self { start, end })
    }

    /// First day of the period.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the period.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Year the period is filed under.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.start.year()
    }

    /// Month the period is filed under (1-12).
    #[must_use]
    pub fn month_number(&self) -> u32 {
        self.start.month()
    }
}

/// Key of one aggregation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeclarationRequest {
    /// Tenant whose books are aggregated.
    pub tenant_id: TenantId,
    /// Legal entity filter, if the tenant files per entity.
    pub legal_entity_id: Option<LegalEntityId>,
    /// Period covered.
    pub period: TaxPeriod,
}

/// Metadata printed in the document header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationHeader {
    /// Taxpayer identification number.
    pub taxpayer_id: String,
    /// Registered name of the filing entity.
    pub entity_name: String,
    /// Period covered.
    pub period: TaxPeriod,
}

/// Summary sections derived from the grouped lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionTotals {
    /// Base of the regular sales family.
    pub taxable_base_total: Decimal,
    /// Base of the special procedures.
    pub special_procedure_base: Decimal,
    /// Tax of the special procedures.
    pub special_procedure_tax: Decimal,
    /// Regular sales tax plus special-procedure tax.
    pub output_tax_total: Decimal,
    /// Tax carried by reverse-charge purchases.
    pub reverse_charge_input_total: Decimal,
    /// Input tax before non-deductible amounts and corrections.
    pub gross_input_tax: Decimal,
    /// Non-deductible tax of the disclosure family.
    pub non_deductible_total: Decimal,
    /// Correction increasing the deduction.
    pub correction_increase: Decimal,
    /// Correction decreasing the deduction.
    pub correction_decrease: Decimal,
    /// Input tax that may be deducted.
    pub deductible_input_tax: Decimal,
    /// Output tax minus deductible input tax; positive means payable.
    pub net_position: Decimal,
}

/// The fixed-shape declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// 001
    pub exempt_with_deduction_base: Decimal,
    /// 002
    pub exempt_without_deduction_base: Decimal,
    /// 003
    pub standard_rate_base: Decimal,
    /// 004
    pub standard_rate_vat: Decimal,
    /// 005
    pub reduced_rate_base: Decimal,
    /// 006
    pub reduced_rate_vat: Decimal,
    /// 007
    pub reverse_charge_vat: Decimal,
    /// 008
    pub special_procedure_total: Decimal,
    /// 009
    pub taxable_base_total: Decimal,
    /// 010
    pub output_tax_total: Decimal,
    /// 011
    pub import_vat: Decimal,
    /// 012
    pub gross_input_tax: Decimal,
    /// 013
    pub non_deductible_total: Decimal,
    /// 014
    pub net_correction: Decimal,
    /// 015
    pub deductible_input_tax: Decimal,
    /// 016
    pub net_position: Decimal,
    /// 017
    pub payable_amount: Decimal,
    /// 018
    pub refundable_amount: Decimal,
}

/// Declaration fields in canonical filing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationField {
    /// Exempt supplies with right to deduction.
    ExemptWithDeductionBase,
    /// Exempt supplies without right to deduction.
    ExemptWithoutDeductionBase,
    /// Domestic standard-rate base.
    StandardRateBase,
    /// Domestic standard-rate VAT.
    StandardRateVat,
    /// Domestic reduced-rate base.
    ReducedRateBase,
    /// Domestic reduced-rate VAT.
    ReducedRateVat,
    /// VAT owed as recipient under reverse charge.
    ReverseChargeVat,
    /// Special procedures, base plus tax.
    SpecialProcedureTotal,
    /// Total taxable base.
    TaxableBaseTotal,
    /// Total output tax.
    OutputTaxTotal,
    /// Import VAT.
    ImportVat,
    /// Input tax before deductions.
    GrossInputTax,
    /// Non-deductible input tax.
    NonDeductibleTotal,
    /// Net correction of the deduction.
    NetCorrection,
    /// Deductible input tax.
    DeductibleInputTax,
    /// Net position.
    NetPosition,
    /// Amount payable.
    PayableAmount,
    /// Amount refundable.
    RefundableAmount,
}

impl DeclarationField {
    /// All fields in canonical order.
    pub const ALL: [Self; 18] = [
        Self::ExemptWithDeductionBase,
        Self::ExemptWithoutDeductionBase,
        Self::StandardRateBase,
        Self::StandardRateVat,
        Self::ReducedRateBase,
        Self::ReducedRateVat,
        Self::ReverseChargeVat,
        Self::SpecialProcedureTotal,
        Self::TaxableBaseTotal,
        Self::OutputTaxTotal,
        Self::ImportVat,
        Self::GrossInputTax,
        Self::NonDeductibleTotal,
        Self::NetCorrection,
        Self::DeductibleInputTax,
        Self::NetPosition,
        Self::PayableAmount,
        Self::RefundableAmount,
    ];

    /// Element name used in the filing document.
    #[must_use]
    pub fn element_name(self) -> &'static str {
        match self {
            Self::ExemptWithDeductionBase => "ExemptWithDeductionBase",
            Self::ExemptWithoutDeductionBase => "ExemptWithoutDeductionBase",
            Self::StandardRateBase => "StandardRateBase",
            Self::StandardRateVat => "StandardRateVat",
            Self::ReducedRateBase => "ReducedRateBase",
            Self::ReducedRateVat => "ReducedRateVat",
            Self::ReverseChargeVat => "ReverseChargeVat",
            Self::SpecialProcedureTotal => "SpecialProcedureTotal",
            Self::TaxableBaseTotal => "TaxableBaseTotal",
            Self::OutputTaxTotal => "OutputTaxTotal",
            Self::ImportVat => "ImportVat",
            Self::GrossInputTax => "GrossInputTax",
            Self::NonDeductibleTotal => "NonDeductibleTotal",
            Self::NetCorrection => "NetCorrection",
            Self::DeductibleInputTax => "DeductibleInputTax",
            Self::NetPosition => "NetPosition",
            Self::PayableAmount => "PayableAmount",
            Self::RefundableAmount => "RefundableAmount",
        }
    }
}

impl Declaration {
    /// Returns the value of one field.
    #[must_use]
    pub fn value(&self, field: DeclarationField) -> Decimal {
        match field {
            DeclarationField::ExemptWithDeductionBase => self.exempt_with_deduction_base,
            DeclarationField::ExemptWithoutDeductionBase => self.exempt_without_deduction_base,
            DeclarationField::StandardRateBase => self.standard_rate_base,
            DeclarationField::StandardRateVat => self.standard_rate_vat,
            DeclarationField::ReducedRateBase => self.reduced_rate_base,
            DeclarationField::ReducedRateVat => self.reduced_rate_vat,
            DeclarationField::ReverseChargeVat => self.reverse_charge_vat,
            DeclarationField::SpecialProcedureTotal => self.special_procedure_total,
            DeclarationField::TaxableBaseTotal => self.taxable_base_total,
            DeclarationField::OutputTaxTotal => self.output_tax_total,
            DeclarationField::ImportVat => self.import_vat,
            DeclarationField::GrossInputTax => self.gross_input_tax,
            DeclarationField::NonDeductibleTotal => self.non_deductible_total,
            DeclarationField::NetCorrection => self.net_correction,
            DeclarationField::DeductibleInputTax => self.deductible_input_tax,
            DeclarationField::NetPosition => self.net_position,
            DeclarationField::PayableAmount => self.payable_amount,
            DeclarationField::RefundableAmount => self.refundable_amount,
        }
    }

    /// Iterates `(field, value)` pairs in canonical order.
    pub fn fields(&self) -> impl Iterator<Item = (DeclarationField, Decimal)> + '_ {
        DeclarationField::ALL
            .into_iter()
            .map(move |field| (field, self.value(field)))
    }
}
