//! Groups raw tax lines by declaration field code.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::codes::{REDUCED_RATE, STANDARD_RATE};
use super::types::{AggregatedLine, Direction, RawTaxLine};

/// Aggregated lines keyed by field code, in ascending code order.
pub type GroupedLines = BTreeMap<String, AggregatedLine>;

/// Groups lines of one direction by field code.
///
/// Lines without a field code are skipped. Only the standard and reduced
/// rates get a bucket, but every line counts towards the totals.
#[must_use]
pub fn group_lines<'a, I>(direction: Direction, lines: I) -> GroupedLines
where
    I: IntoIterator<Item = &'a RawTaxLine>,
{
    let mut grouped = GroupedLines::new();

    for line in lines {
        let Some(code) = line.field_code.as_deref() else {
            continue;
        };

        let entry = grouped
            .entry(code.to_string())
            .or_insert_with(|| AggregatedLine::new(code, direction));
        add_line(entry, line);
    }

    grouped
}

fn add_line(entry: &mut AggregatedLine, line: &RawTaxLine) {
    match line.rate {
        Some(rate) if rate == STANDARD_RATE => {
            entry.base_standard += line.base;
            entry.vat_standard += line.tax;
        }
        Some(rate) if rate == REDUCED_RATE => {
            entry.base_reduced += line.base;
            entry.vat_reduced += line.tax;
        }
        _ => {}
    }

    entry.total_base += line.base;
    entry.total_vat += line.tax;
    entry.total_gross += line.gross.unwrap_or(line.base + line.tax);
    entry.vat_non_deductible += line.non_deductible;
    entry.fee_value += line.fee.unwrap_or(Decimal::ZERO);
    entry.entry_count += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use declara_shared::types::SourceDocumentId;
    use rust_decimal_macros::dec;

    fn line(code: Option<&str>, rate: Option<Decimal>, base: Decimal, tax: Decimal) -> RawTaxLine {
        RawTaxLine {
            source_id: SourceDocumentId::new(),
            field_code: code.map(String::from),
            rate,
            base,
            tax,
            gross: None,
            non_deductible: Decimal::ZERO,
            fee: None,
        }
    }

    #[test]
    fn test_groups_by_code_with_rate_buckets() {
        let lines = vec![
            line(Some("3.2"), Some(dec!(20)), dec!(100), dec!(20)),
            line(Some("3.2"), Some(dec!(10)), dec!(50), dec!(5)),
            line(Some("3.2"), Some(dec!(8)), dec!(25), dec!(2)),
        ];

        let grouped = group_lines(Direction::Output, &lines);
        let agg = &grouped["3.2"];

        assert_eq!(agg.direction, Direction::Output);
        assert_eq!(agg.base_standard, dec!(100));
        assert_eq!(agg.vat_standard, dec!(20));
        assert_eq!(agg.base_reduced, dec!(50));
        assert_eq!(agg.vat_reduced, dec!(5));
        // The 8% line has no bucket but still counts.
        assert_eq!(agg.total_base, dec!(175));
        assert_eq!(agg.total_vat, dec!(27));
        assert_eq!(agg.entry_count, 3);
    }

    #[test]
    fn test_rate_with_trailing_zeros_still_buckets() {
        let lines = vec![line(Some("3.2"), Some(dec!(20.00)), dec!(100), dec!(20))];
        let grouped = group_lines(Direction::Output, &lines);
        assert_eq!(grouped["3.2"].base_standard, dec!(100));
    }

    #[test]
    fn test_skips_lines_without_code() {
        let lines = vec![
            line(None, Some(dec!(20)), dec!(100), dec!(20)),
            line(Some("8a.1"), None, dec!(10), dec!(2)),
        ];

        let grouped = group_lines(Direction::Input, &lines);

        assert_eq!(grouped.len(), 1);
        let agg = &grouped["8a.1"];
        assert_eq!(agg.total_base, dec!(10));
        assert_eq!(agg.base_standard, Decimal::ZERO);
        assert_eq!(agg.entry_count, 1);
    }

    #[test]
    fn test_gross_falls_back_to_base_plus_tax() {
        let mut explicit = line(Some("8a.1"), Some(dec!(20)), dec!(100), dec!(20));
        explicit.gross = Some(dec!(121));
        explicit.non_deductible = dec!(4);
        explicit.fee = Some(dec!(1.5));
        let implicit = line(Some("8a.1"), Some(dec!(20)), dec!(10), dec!(2));

        let grouped = group_lines(Direction::Input, [&explicit, &implicit]);
        let agg = &grouped["8a.1"];

        assert_eq!(agg.total_gross, dec!(133));
        assert_eq!(agg.vat_non_deductible, dec!(4));
        assert_eq!(agg.fee_value, dec!(1.5));
    }

    #[test]
    fn test_ordered_by_code() {
        let lines = vec![
            line(Some("3a.1"), None, dec!(1), dec!(0)),
            line(Some("1.1"), None, dec!(1), dec!(0)),
            line(Some("3.2"), None, dec!(1), dec!(0)),
        ];
        let codes: Vec<_> = group_lines(Direction::Output, &lines)
            .into_keys()
            .collect();
        assert_eq!(codes, vec!["1.1", "3.2", "3a.1"]);
    }
}
