//! Maps section totals and selected lines onto the declaration fields.

use rust_decimal::Decimal;

use super::codes::{
    DOMESTIC_SALES_SECTION, EXEMPT_WITH_DEDUCTION_SECTION, EXEMPT_WITHOUT_DEDUCTION_SECTION,
    IMPORT_CODE, REVERSE_CHARGE_OUTPUT_SECTION,
};
use super::grouper::GroupedLines;
use super::sections::{lookup, sum_sections};
use super::types::{Declaration, SectionTotals};

/// Builds the declaration. Every field has its own formula; nothing carries
/// over between fields except through `totals`.
#[must_use]
pub fn map_declaration(
    totals: &SectionTotals,
    output_lines: &GroupedLines,
    input_lines: &GroupedLines,
) -> Declaration {
    let domestic = [DOMESTIC_SALES_SECTION];

    Declaration {
        exempt_with_deduction_base: sum_sections(output_lines, &[EXEMPT_WITH_DEDUCTION_SECTION], |l| {
            l.total_base
        }),
        exempt_without_deduction_base: sum_sections(
            output_lines,
            &[EXEMPT_WITHOUT_DEDUCTION_SECTION],
            |l| l.total_base,
        ),
        standard_rate_base: sum_sections(output_lines, &domestic, |l| l.base_standard),
        standard_rate_vat: sum_sections(output_lines, &domestic, |l| l.vat_standard),
        reduced_rate_base: sum_sections(output_lines, &domestic, |l| l.base_reduced),
        reduced_rate_vat: sum_sections(output_lines, &domestic, |l| l.vat_reduced),
        reverse_charge_vat: sum_sections(output_lines, &[REVERSE_CHARGE_OUTPUT_SECTION], |l| {
            l.total_vat
        }),
        special_procedure_total: totals.special_procedure_base + totals.special_procedure_tax,
        taxable_base_total: totals.taxable_base_total,
        output_tax_total: totals.output_tax_total,
        import_vat: lookup(input_lines, IMPORT_CODE, |l| l.total_vat),
        gross_input_tax: totals.gross_input_tax,
        non_deductible_total: totals.non_deductible_total,
        net_correction: totals.correction_increase - totals.correction_decrease,
        deductible_input_tax: totals.deductible_input_tax,
        net_position: totals.net_position,
        payable_amount: totals.net_position.max(Decimal::ZERO),
        refundable_amount: (-totals.net_position).max(Decimal::ZERO),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::types::{AggregatedLine, DeclarationField, Direction};
    use rust_decimal_macros::dec;

    #[test]
    fn test_rate_disclosure_uses_domestic_buckets_only() {
        let mut domestic = AggregatedLine::new("3.2", Direction::Output);
        domestic.base_standard = dec!(1000);
        domestic.vat_standard = dec!(200);
        domestic.base_reduced = dec!(100);
        domestic.vat_reduced = dec!(10);
        let mut reverse = AggregatedLine::new("3a.1", Direction::Output);
        reverse.base_standard = dec!(500);
        reverse.vat_standard = dec!(100);
        reverse.total_vat = dec!(100);

        let outputs: GroupedLines = [domestic, reverse]
            .into_iter()
            .map(|l| (l.field_code.clone(), l))
            .collect();

        let declaration = map_declaration(&SectionTotals::default(), &outputs, &GroupedLines::new());

        assert_eq!(declaration.standard_rate_base, dec!(1000));
        assert_eq!(declaration.standard_rate_vat, dec!(200));
        assert_eq!(declaration.reduced_rate_base, dec!(100));
        assert_eq!(declaration.reduced_rate_vat, dec!(10));
        assert_eq!(declaration.reverse_charge_vat, dec!(100));
    }

    #[test]
    fn test_payable_and_refundable_split() {
        let payable = SectionTotals {
            net_position: dec!(250.75),
            ..SectionTotals::default()
        };
        let d = map_declaration(&payable, &GroupedLines::new(), &GroupedLines::new());
        assert_eq!(d.payable_amount, dec!(250.75));
        assert_eq!(d.refundable_amount, Decimal::ZERO);

        let refundable = SectionTotals {
            net_position: dec!(-80),
            ..SectionTotals::default()
        };
        let d = map_declaration(&refundable, &GroupedLines::new(), &GroupedLines::new());
        assert_eq!(d.payable_amount, Decimal::ZERO);
        assert_eq!(d.refundable_amount, dec!(80));
        assert_eq!(d.value(DeclarationField::NetPosition), dec!(-80));
    }

    #[test]
    fn test_net_correction_and_special_procedure() {
        let totals = SectionTotals {
            special_procedure_base: dec!(150),
            special_procedure_tax: dec!(30),
            correction_increase: dec!(12),
            correction_decrease: dec!(20),
            ..SectionTotals::default()
        };
        let d = map_declaration(&totals, &GroupedLines::new(), &GroupedLines::new());
        assert_eq!(d.special_procedure_total, dec!(180));
        assert_eq!(d.net_correction, dec!(-8));
    }
}
