use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::{self, Write as _};

use super::domain::{LineItem, QuoteId, Segment};
use super::engine::format_dollars;
use super::repository::QuoteRecord;

pub const ESTIMATE_DISCLAIMER: &str = "*All quotes are estimates subject to change upon on-site evaluation. Final pricing may vary based on window height, condition, accessibility, and safety requirements. We strive to provide accurate estimates but reserve the right to adjust pricing to reflect the actual scope of work.";
pub const CONTACT_LINE: &str =
    "Questions? Contact us at (540) 335-1059 or email@squeegee-samurai.com";

/// Printable estimate handed to the document renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDocument {
    pub quote_id: QuoteId,
    pub prepared_for: String,
    pub email: String,
    pub issued_on: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<Segment>,
    pub line_items: Vec<LineItem>,
    pub pricing_rows: Vec<PricingRow>,
    pub total_display: String,
    pub disclaimer: &'static str,
    pub contact_line: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricingRow {
    pub label: &'static str,
    pub value: String,
}

impl QuoteDocument {
    pub fn from_record(record: &QuoteRecord) -> Self {
        let prepared_for = record
            .form_input
            .business_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .or_else(|| record.contact.full_name())
            .unwrap_or_else(|| record.contact.email.trim().to_string());

        let breakdown = record.result.breakdown;
        let pricing_rows = vec![
            PricingRow {
                label: "Subtotal",
                value: format!("${}.00", breakdown.subtotal),
            },
            PricingRow {
                label: "Discount",
                value: format!("${}.00", breakdown.discount),
            },
            PricingRow {
                label: "Total",
                value: format!("${}.00", breakdown.total),
            },
        ];

        Self {
            quote_id: record.quote_id.clone(),
            prepared_for,
            email: record.contact.email.trim().to_string(),
            issued_on: record.created_at.date_naive(),
            segment: record.result.segment,
            line_items: record.result.line_items.clone(),
            pricing_rows,
            total_display: format_dollars(record.result.total_cents),
            disclaimer: ESTIMATE_DISCLAIMER,
            contact_line: CONTACT_LINE,
        }
    }
}

/// Turns a quote document into deliverable bytes (PDF, text, HTML).
pub trait QuoteRenderer: Send + Sync {
    fn content_type(&self) -> &'static str;
    fn render(&self, document: &QuoteDocument) -> Result<Vec<u8>, RenderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("quote document could not be rendered: {0}")]
    Layout(String),
}

impl From<fmt::Error> for RenderError {
    fn from(_: fmt::Error) -> Self {
        Self::Layout("formatter rejected the estimate text".to_string())
    }
}

/// Fixed-width text layout of the estimate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRenderer;

impl QuoteRenderer for PlainTextRenderer {
    fn content_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn render(&self, document: &QuoteDocument) -> Result<Vec<u8>, RenderError> {
        let mut out = String::new();
        writeln!(&mut out, "Squeegee Samurai Free Estimate")?;
        writeln!(&mut out, "Clarity through Pane\n")?;

        writeln!(&mut out, "Quote Details")?;
        writeln!(&mut out, "  Quote ID:      {}", document.quote_id.0)?;
        writeln!(&mut out, "  Prepared For:  {}", document.prepared_for)?;
        writeln!(&mut out, "  Email:         {}", document.email)?;
        writeln!(
            &mut out,
            "  Date:          {}",
            document.issued_on.format("%B %-d, %Y")
        )?;
        if let Some(segment) = document.segment {
            writeln!(&mut out, "  Service Type:  {}", segment.label())?;
        }

        writeln!(&mut out, "\nPricing")?;
        for item in &document.line_items {
            writeln!(
                &mut out,
                "  {:<60} {:>10}",
                item.description,
                format_dollars(item.amount_cents)
            )?;
        }
        for row in &document.pricing_rows {
            writeln!(&mut out, "  {:<60} {:>10}", row.label, row.value)?;
        }
        writeln!(
            &mut out,
            "\n  {:<60} {:>10}\n",
            "Total Estimate", document.total_display
        )?;

        writeln!(&mut out, "{}", document.disclaimer)?;
        writeln!(&mut out, "{}", document.contact_line)?;

        Ok(out.into_bytes())
    }
}
