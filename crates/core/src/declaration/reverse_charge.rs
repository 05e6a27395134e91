//! Derives output-side lines from reverse-charge purchases.

use rust_decimal::Decimal;

use super::codes::ReverseChargeMap;
use super::grouper::GroupedLines;
use super::types::{AggregatedLine, Direction};

/// Creates one output line per input line whose code has a mapping entry.
///
/// Amounts and buckets are copied as-is; non-deductible and fee values do not
/// exist on the output side and are zeroed. Unmapped lines are dropped.
#[must_use]
pub fn derive_reverse_charge_lines(
    input_lines: &GroupedLines,
    map: &ReverseChargeMap,
) -> Vec<AggregatedLine> {
    input_lines
        .values()
        .filter_map(|line| {
            map.output_code(&line.field_code).map(|output_code| AggregatedLine {
                field_code: output_code.to_string(),
                direction: Direction::Output,
                vat_non_deductible: Decimal::ZERO,
                fee_value: Decimal::ZERO,
                ..line.clone()
            })
        })
        .collect()
}

/// Merges derived lines into the original output lines, re-grouping by code.
#[must_use]
pub fn merge_output_lines(output_lines: &GroupedLines, derived: &[AggregatedLine]) -> GroupedLines {
    let mut merged = output_lines.clone();
    for line in derived {
        merged
            .entry(line.field_code.clone())
            .or_insert_with(|| AggregatedLine::new(line.field_code.clone(), Direction::Output))
            .absorb(line);
    }
    merged
}
