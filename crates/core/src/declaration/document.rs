//! XML filing document.
//!
//! Amounts are rounded to two decimals, half away from zero, here and nowhere
//! else. Text metadata is escaped against `& < > " '`.

use quick_xml::Writer;
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use rust_decimal::{Decimal, RoundingStrategy};

use super::error::DeclarationError;
use super::types::{Declaration, DeclarationHeader};

/// Root element of the filing document.
pub const ROOT_ELEMENT: &str = "VatDeclaration";

/// Formats an amount with exactly two decimal places.
#[must_use]
pub fn format_amount(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    rounded.rescale(2);
    rounded.to_string()
}

/// Renders the header and all fields, in canonical field order.
pub fn render_document(
    header: &DeclarationHeader,
    declaration: &Declaration,
) -> Result<String, DeclarationError> {
    let mut doc = DocumentWriter::new();

    doc.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    doc.start(ROOT_ELEMENT)?;

    doc.start("Header")?;
    doc.text_element("TaxpayerId", &header.taxpayer_id)?;
    doc.text_element("EntityName", &header.entity_name)?;
    doc.text_element("PeriodStart", &header.period.start().format("%Y-%m-%d").to_string())?;
    doc.text_element("PeriodEnd", &header.period.end().format("%Y-%m-%d").to_string())?;
    doc.text_element("PeriodYear", &header.period.year().to_string())?;
    doc.text_element("PeriodMonth", &header.period.month_number().to_string())?;
    doc.end("Header")?;

    doc.start("Body")?;
    for (field, value) in declaration.fields() {
        doc.text_element(field.element_name(), &format_amount(value))?;
    }
    doc.end("Body")?;

    doc.end(ROOT_ELEMENT)?;
    doc.finish()
}

struct DocumentWriter {
    inner: Writer<Vec<u8>>,
}

impl DocumentWriter {
    fn new() -> Self {
        Self {
            inner: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), DeclarationError> {
        self.inner
            .write_event(event)
            .map_err(|e| DeclarationError::Serialization(e.to_string()))
    }

    fn start(&mut self, name: &str) -> Result<(), DeclarationError> {
        self.event(Event::Start(BytesStart::new(name)))
    }

    fn end(&mut self, name: &str) -> Result<(), DeclarationError> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn text_element(&mut self, name: &str, text: &str) -> Result<(), DeclarationError> {
        self.start(name)?;
        self.event(Event::Text(BytesText::from_escaped(escape(text))))?;
        self.end(name)
    }

    fn finish(self) -> Result<String, DeclarationError> {
        String::from_utf8(self.inner.into_inner())
            .map_err(|e| DeclarationError::Serialization(e.to_string()))
    }
}
