//! Summary sections of the declaration.
//!
//! All sums are exact decimal arithmetic. Lookups of codes that did not occur
//! in the period contribute zero.

use rust_decimal::Decimal;

use super::codes::{
    CORRECTION_DECREASE_CODE, CORRECTION_INCREASE_CODE, IMPORT_CODE, MIXED_USE_PURCHASE_SECTIONS,
    NON_DEDUCTIBLE_DISCLOSURE_SECTIONS, REGULAR_SALES_SECTIONS, SPECIAL_PROCEDURE_CODES,
    SPECIAL_SCHEME_CODE, in_sections,
};
use super::grouper::GroupedLines;
use super::types::{AggregatedLine, SectionTotals};

/// Sums a field over every line whose code falls in the given sections.
pub(crate) fn sum_sections(
    lines: &GroupedLines,
    sections: &[&str],
    field: impl Fn(&AggregatedLine) -> Decimal,
) -> Decimal {
    lines
        .values()
        .filter(|line| in_sections(&line.field_code, sections))
        .map(field)
        .sum()
}

/// Reads a field of the line with exactly this code, zero when absent.
pub(crate) fn lookup(
    lines: &GroupedLines,
    code: &str,
    field: impl Fn(&AggregatedLine) -> Decimal,
) -> Decimal {
    lines.get(code).map_or(Decimal::ZERO, field)
}

impl SectionTotals {
    /// Computes the sections of one run.
    ///
    /// `output_lines` must already contain the merged reverse-charge lines;
    /// `reverse_charge_lines` are passed separately to total the input tax
    /// they carry.
    #[must_use]
    pub fn compute(
        output_lines: &GroupedLines,
        reverse_charge_lines: &[AggregatedLine],
        input_lines: &GroupedLines,
    ) -> Self {
        let taxable_base_total = sum_sections(output_lines, &REGULAR_SALES_SECTIONS, |l| l.total_base);
        let regular_output_tax = sum_sections(output_lines, &REGULAR_SALES_SECTIONS, |l| l.total_vat);

        let special_procedure_base: Decimal = SPECIAL_PROCEDURE_CODES
            .iter()
            .map(|code| lookup(output_lines, code, |l| l.total_base))
            .sum();
        let special_procedure_tax: Decimal = SPECIAL_PROCEDURE_CODES
            .iter()
            .map(|code| lookup(output_lines, code, |l| l.total_vat))
            .sum();

        let output_tax_total = regular_output_tax + special_procedure_tax;

        let reverse_charge_input_total: Decimal =
            reverse_charge_lines.iter().map(|l| l.total_vat).sum();

        let gross_input_tax = sum_sections(input_lines, &MIXED_USE_PURCHASE_SECTIONS, |l| l.total_vat)
            + lookup(input_lines, IMPORT_CODE, |l| l.total_vat)
            + lookup(input_lines, SPECIAL_SCHEME_CODE, |l| l.total_vat)
            + reverse_charge_input_total;

        let non_deductible_total = sum_sections(input_lines, &NON_DEDUCTIBLE_DISCLOSURE_SECTIONS, |l| {
            l.vat_non_deductible
        });

        let correction_increase = lookup(output_lines, CORRECTION_INCREASE_CODE, |l| l.total_vat);
        let correction_decrease = lookup(output_lines, CORRECTION_DECREASE_CODE, |l| l.total_vat);

        let deductible_input_tax =
            gross_input_tax - non_deductible_total + correction_increase - correction_decrease;
        let net_position = output_tax_total - deductible_input_tax;

        Self {
            taxable_base_total,
            special_procedure_base,
            special_procedure_tax,
            output_tax_total,
            reverse_charge_input_total,
            gross_input_tax,
            non_deductible_total,
            correction_increase,
            correction_decrease,
            deductible_input_tax,
            net_position,
        }
    }
}
