//! Declaration field codes, code families and the reverse-charge mapping table.
//!
//! A field code has the form `<section>.<item>` (e.g. `3a.1`). Families are
//! matched on the section, individual lookups on the exact code.

use rust_decimal::Decimal;

/// Standard VAT rate in percent.
pub const STANDARD_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 0);
/// Reduced VAT rate in percent.
pub const REDUCED_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Domestic supplies at the standard rate.
pub const STANDARD_RATE_CODE: &str = "3.2";
/// Domestic supplies at the reduced rate.
pub const REDUCED_RATE_CODE: &str = "3.3";
/// Domestic supplies at zero rate.
pub const ZERO_RATE_CODE: &str = "3.4";

/// Exempt supplies with right to deduction.
pub const EXEMPT_WITH_DEDUCTION_SECTION: &str = "1";
/// Exempt supplies without right to deduction.
pub const EXEMPT_WITHOUT_DEDUCTION_SECTION: &str = "2";
/// Domestic taxable supplies.
pub const DOMESTIC_SALES_SECTION: &str = "3";
/// Output side of reverse-charge purchases.
pub const REVERSE_CHARGE_OUTPUT_SECTION: &str = "3a";
/// Regular sales family: domestic supplies plus reverse-charge liability.
pub const REGULAR_SALES_SECTIONS: [&str; 2] = [DOMESTIC_SALES_SECTION, REVERSE_CHARGE_OUTPUT_SECTION];

/// Special procedures (travel agency margin, second-hand goods margin).
pub const SPECIAL_PROCEDURE_CODES: [&str; 2] = ["4.1", "4.2"];
/// Output-side correction increasing deductible input tax.
pub const CORRECTION_INCREASE_CODE: &str = "5.1";
/// Output-side correction decreasing deductible input tax.
pub const CORRECTION_DECREASE_CODE: &str = "5.2";

/// Import VAT paid.
pub const IMPORT_CODE: &str = "6.2";
/// Flat-rate farmer compensation.
pub const SPECIAL_SCHEME_CODE: &str = "7.3";
/// The two mixed-use purchase families counted as input tax.
pub const MIXED_USE_PURCHASE_SECTIONS: [&str; 2] = ["8a", "8v"];
/// Input families whose non-deductible VAT is disclosed.
pub const NON_DEDUCTIBLE_DISCLOSURE_SECTIONS: [&str; 4] = ["8a", "8b", "8g", "8v"];

/// Input code to output code pairs for reverse-charge purchases.
const REVERSE_CHARGE_PAIRS: [(&str, &str); 10] = [
    ("8b.1", "3a.1"),
    ("8b.2", "3a.2"),
    ("8b.3", "3a.1"),
    ("8b.4", "3a.2"),
    ("8b.5", "3a.5"),
    ("8g.1", "3a.3"),
    ("8g.2", "3a.4"),
    ("8g.3", "3a.3"),
    ("8g.4", "3a.4"),
    ("8g.5", "3a.5"),
];

/// The compiled-in reverse-charge mapping.
pub static REVERSE_CHARGE_MAP: ReverseChargeMap = ReverseChargeMap {
    pairs: &REVERSE_CHARGE_PAIRS,
};

/// Immutable many-to-one mapping from input field codes to output field codes.
#[derive(Debug, Clone, Copy)]
pub struct ReverseChargeMap {
    pairs: &'static [(&'static str, &'static str)],
}

impl ReverseChargeMap {
    /// Returns the standard mapping table.
    #[must_use]
    pub fn standard() -> &'static Self {
        &REVERSE_CHARGE_MAP
    }

    /// Returns the output field code for a reverse-charge input code.
    #[must_use]
    pub fn output_code(&self, input_code: &str) -> Option<&'static str> {
        self.pairs
            .iter()
            .find(|(input, _)| *input == input_code)
            .map(|(_, output)| *output)
    }

    /// Returns true if the input code is reverse-charge eligible.
    #[must_use]
    pub fn is_mapped(&self, input_code: &str) -> bool {
        self.output_code(input_code).is_some()
    }

    /// Iterates over all `(input, output)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.pairs.iter().copied()
    }
}

/// Returns the section part of a field code (everything before the first `.`).
#[must_use]
pub fn section(code: &str) -> &str {
    code.split_once('.').map_or(code, |(section, _)| section)
}

/// Returns true if the code belongs to any of the given sections.
#[must_use]
pub fn in_sections(code: &str, sections: &[&str]) -> bool {
    let section = section(code);
    sections.iter().any(|candidate| *candidate == section)
}

/// Picks the domestic field code for an adjustment document's effective rate.
#[must_use]
pub fn code_for_rate(rate: Decimal) -> &'static str {
    if rate == REDUCED_RATE {
        REDUCED_RATE_CODE
    } else if rate.is_zero() {
        ZERO_RATE_CODE
    } else {
        STANDARD_RATE_CODE
    }
}
