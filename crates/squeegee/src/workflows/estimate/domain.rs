use std::collections::BTreeSet;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier wrapper for persisted quotes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuoteId(pub String);

/// Person requesting an estimate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
}

impl ContactInfo {
    /// "First Last" when both names were collected.
    pub fn full_name(&self) -> Option<String> {
        let first = self.first_name.trim();
        let last = self.last_name.trim();
        if first.is_empty() || last.is_empty() {
            None
        } else {
            Some(format!("{first} {last}"))
        }
    }
}

/// Raw estimate form as submitted by the website.
///
/// Counts are coerced rather than rejected: numbers or numeric strings are
/// accepted, anything else (including negatives) becomes zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub window_count: u32,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub screen_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stories: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub additional_services: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
}

impl FormInput {
    pub fn has_service(&self, tag: &str) -> bool {
        self.additional_services
            .iter()
            .any(|service| service.trim().eq_ignore_ascii_case(tag))
    }
}

/// Request body accepted by the quote intake endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub contact: ContactInfo,
    #[serde(default)]
    pub form_input: FormInput,
}

/// Market segment selecting the rate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    Residential,
    Commercial,
}

impl Segment {
    pub fn label(&self) -> &'static str {
        match self {
            Segment::Residential => "residential",
            Segment::Commercial => "commercial",
        }
    }
}

/// One entry of the human-readable breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    pub amount_cents: u64,
    pub amount_dollars: f64,
    /// Set on notes that carry no price of their own.
    #[serde(skip)]
    informational: bool,
}

impl LineItem {
    pub fn new(description: impl Into<String>, amount_cents: u64) -> Self {
        Self {
            description: description.into(),
            amount_cents,
            amount_dollars: amount_cents as f64 / 100.0,
            informational: false,
        }
    }

    /// Zero-priced remark that follows the priced items.
    pub fn note(description: impl Into<String>) -> Self {
        Self {
            informational: true,
            ..Self::new(description, 0)
        }
    }

    pub fn is_informational(&self) -> bool {
        self.informational
    }
}

/// Display figures in whole dollars, each rounded independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    pub subtotal: u64,
    pub discount: u64,
    pub total: u64,
}

/// Priced estimate returned by the quote engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    pub total_cents: u64,
    pub subtotal_cents: u64,
    pub discount_cents: u64,
    pub breakdown: Breakdown,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<Segment>,
    pub line_items: Vec<LineItem>,
}

/// General enquiry from the contact page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// Job application from the careers page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerApplication {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Clamp a parsed number to a whole, non-negative unit count.
pub fn coerce_count(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.trunc().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

fn deserialize_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawCount>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawCount::Number(value)) => coerce_count(value),
        Some(RawCount::Text(text)) => text.trim().parse::<f64>().map(coerce_count).unwrap_or(0),
        Some(RawCount::Other(_)) | None => 0,
    })
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let tags = Option::<Vec<String>>::deserialize(deserializer)?;
    Ok(tags.unwrap_or_default().into_iter().collect())
}
