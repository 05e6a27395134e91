//! Property-based tests for the declaration pipeline.
//!
//! - Property 1: Grouped totals equal the sum of their lines
//! - Property 2: Every mapped purchase code yields exactly one output line
//! - Property 3: Payable and refundable amounts are mutually exclusive
//! - Property 4: Line order does not change the declaration
//! - Property 5: Rendered amounts parse back within half a cent

use std::str::FromStr;

use declara_shared::types::SourceDocumentId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::codes::ReverseChargeMap;
use super::document::format_amount;
use super::grouper::group_lines;
use super::reverse_charge::derive_reverse_charge_lines;
use super::service::DeclarationService;
use super::types::{Direction, RawTaxLine};

/// Strategy to generate signed amounts (-10,000.00 to 10,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate non-negative amounts (0.00 to 1,000.00).
fn non_negative_amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate rates, including ones without a bucket.
fn rate() -> impl Strategy<Value = Option<Decimal>> {
    prop_oneof![
        Just(None),
        Just(Some(Decimal::ZERO)),
        Just(Some(Decimal::from(5))),
        Just(Some(Decimal::from(10))),
        Just(Some(Decimal::from(20))),
    ]
}

/// Strategy to generate sales-side field codes.
fn sales_code() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("1.1".to_string())),
        Just(Some("2.1".to_string())),
        Just(Some("3.2".to_string())),
        Just(Some("3.3".to_string())),
        Just(Some("3.4".to_string())),
        Just(Some("4.1".to_string())),
        Just(Some("5.1".to_string())),
        Just(Some("5.2".to_string())),
    ]
}

/// Strategy to generate purchase-side field codes, mapped and unmapped.
fn purchase_code() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("6.2".to_string())),
        Just(Some("7.3".to_string())),
        Just(Some("8a.1".to_string())),
        Just(Some("8v.2".to_string())),
        Just(Some("8b.1".to_string())),
        Just(Some("8b.4".to_string())),
        Just(Some("8b.9".to_string())),
        Just(Some("8g.2".to_string())),
        Just(Some("8g.5".to_string())),
    ]
}

fn raw_line(
    field_code: Option<String>,
    rate: Option<Decimal>,
    base: Decimal,
    tax: Decimal,
    non_deductible: Decimal,
) -> RawTaxLine {
    RawTaxLine {
        source_id: SourceDocumentId::new(),
        field_code,
        rate,
        base,
        tax,
        gross: None,
        non_deductible,
        fee: None,
    }
}

fn sales_lines() -> impl Strategy<Value = Vec<RawTaxLine>> {
    prop::collection::vec(
        (sales_code(), rate(), amount(), amount())
            .prop_map(|(code, rate, base, tax)| raw_line(code, rate, base, tax, Decimal::ZERO)),
        0..20,
    )
}

fn purchase_lines() -> impl Strategy<Value = Vec<RawTaxLine>> {
    prop::collection::vec(
        (purchase_code(), rate(), amount(), amount(), non_negative_amount())
            .prop_map(|(code, rate, base, tax, non_ded)| raw_line(code, rate, base, tax, non_ded)),
        0..20,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property 1: every grouped line carries the exact sums of its raw lines.
    #[test]
    fn prop_grouped_totals_match_lines(lines in sales_lines()) {
        let grouped = group_lines(Direction::Output, &lines);

        for (code, line) in &grouped {
            let members: Vec<_> = lines
                .iter()
                .filter(|l| l.field_code.as_deref() == Some(code.as_str()))
                .collect();

            let base: Decimal = members.iter().map(|l| l.base).sum();
            let tax: Decimal = members.iter().map(|l| l.tax).sum();
            prop_assert_eq!(line.total_base, base);
            prop_assert_eq!(line.total_vat, tax);
            prop_assert_eq!(line.total_gross, base + tax);
            prop_assert_eq!(line.entry_count as usize, members.len());
        }

        let coded = lines.iter().filter(|l| l.field_code.is_some()).count();
        let counted: u32 = grouped.values().map(|l| l.entry_count).sum();
        prop_assert_eq!(counted as usize, coded);
    }

    /// Property 2: mapped input codes yield one output line with identical amounts.
    #[test]
    fn prop_reverse_charge_completeness(lines in purchase_lines()) {
        let map = ReverseChargeMap::standard();
        let inputs = group_lines(Direction::Input, &lines);
        let derived = derive_reverse_charge_lines(&inputs, map);

        let mapped: Vec<_> = inputs.values().filter(|l| map.is_mapped(&l.field_code)).collect();
        prop_assert_eq!(derived.len(), mapped.len());

        for (input, output) in mapped.iter().zip(&derived) {
            prop_assert_eq!(Some(output.field_code.as_str()), map.output_code(&input.field_code));
            prop_assert_eq!(output.direction, Direction::Output);
            prop_assert_eq!(output.total_base, input.total_base);
            prop_assert_eq!(output.total_vat, input.total_vat);
            prop_assert_eq!(output.base_standard, input.base_standard);
            prop_assert_eq!(output.vat_reduced, input.vat_reduced);
            prop_assert_eq!(output.vat_non_deductible, Decimal::ZERO);
            prop_assert_eq!(output.fee_value, Decimal::ZERO);
        }
    }

    /// Property 3: at most one of payable and refundable is non-zero.
    #[test]
    fn prop_payable_refundable_exclusive(sales in sales_lines(), purchases in purchase_lines()) {
        let run = DeclarationService::aggregate(&sales, &purchases, ReverseChargeMap::standard());
        let d = run.declaration;

        prop_assert!(d.payable_amount >= Decimal::ZERO);
        prop_assert!(d.refundable_amount >= Decimal::ZERO);
        prop_assert!(d.payable_amount.is_zero() || d.refundable_amount.is_zero());
        prop_assert_eq!(d.payable_amount - d.refundable_amount, d.net_position);
        prop_assert_eq!(d.net_position, d.output_tax_total - d.deductible_input_tax);
    }

    /// Property 4: reversing the line order gives the same run.
    #[test]
    fn prop_order_independent(sales in sales_lines(), purchases in purchase_lines()) {
        let map = ReverseChargeMap::standard();
        let forward = DeclarationService::aggregate(&sales, &purchases, map);

        let mut sales_rev = sales.clone();
        sales_rev.reverse();
        let mut purchases_rev = purchases.clone();
        purchases_rev.reverse();
        let backward = DeclarationService::aggregate(&sales_rev, &purchases_rev, map);

        prop_assert_eq!(forward, backward);
    }

    /// Property 5: formatted amounts have two decimals and stay within 0.005.
    #[test]
    fn prop_formatted_amount_within_rounding(units in -1_000_000_000i64..1_000_000_000i64, scale in 0u32..6) {
        let value = Decimal::new(units, scale);
        let text = format_amount(value);

        let (_, decimals) = text.split_once('.').unwrap();
        prop_assert_eq!(decimals.len(), 2);

        let parsed = Decimal::from_str(&text).unwrap();
        prop_assert!((value - parsed).abs() <= Decimal::new(5, 3));
    }
}
