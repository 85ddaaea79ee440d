mod commercial;
mod config;
mod discount;
pub(crate) mod money;
mod residential;
mod segment;

pub use config::{
    normalize_code, CommercialRates, DiscountTable, PricingConfig, PricingProfile,
    ResidentialRates, SegmentRules, FIRST_TIME_UPLIFT_TAG, ONE_TIME_TIER,
};
pub use money::format_dollars;
pub use segment::classify_segment;

use super::domain::{Breakdown, FormInput, LineItem, QuoteRequest, QuoteResult, Segment};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const HIGH_TRAFFIC_NOTE: &str =
    "High Traffic / Kutaritsu Clean (Pricing to be confirmed upon review)";

/// Stateless evaluator applying an immutable pricing configuration to a request.
#[derive(Debug, Clone)]
pub struct QuoteEngine {
    config: PricingConfig,
}

impl QuoteEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Price a request. Fallback rate selections are logged, never surfaced to callers.
    pub fn compute(&self, request: &QuoteRequest) -> QuoteResult {
        let priced = self.price(&request.form_input);
        for selection in priced.fallbacks() {
            warn!(
                kind = ?selection.kind,
                requested = selection.requested.as_deref().unwrap_or("<none>"),
                resolved = %selection.resolved,
                rate_cents = selection.rate_cents,
                "quote priced with fallback rate"
            );
        }
        priced.result
    }

    /// Price a form and keep the rate selection trace.
    pub fn price(&self, form: &FormInput) -> PricedQuote {
        price_quote(&self.config, form)
    }
}

impl Default for QuoteEngine {
    fn default() -> Self {
        Self::new(PricingConfig::current())
    }
}

/// Which lookup produced a rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateKind {
    CommercialTier,
    ResidentialMode,
}

/// Outcome of a rate lookup; `recognized` is false when a default was substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSelection {
    pub kind: RateKind,
    pub requested: Option<String>,
    pub resolved: String,
    pub recognized: bool,
    pub rate_cents: u64,
}

/// Engine output plus the audit trail of rate selections.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedQuote {
    pub result: QuoteResult,
    pub selections: Vec<RateSelection>,
}

impl PricedQuote {
    pub fn fallbacks(&self) -> impl Iterator<Item = &RateSelection> {
        self.selections
            .iter()
            .filter(|selection| !selection.recognized)
    }
}

/// Line items and subtotal produced by a segment rate table.
pub(crate) struct SegmentPricing {
    pub line_items: Vec<LineItem>,
    pub subtotal_cents: u64,
    pub selection: RateSelection,
}

/// Pure pricing function: same configuration and form always yield the same quote.
pub fn price_quote(config: &PricingConfig, form: &FormInput) -> PricedQuote {
    let segment = classify_segment(&config.segments, form.property_type.as_deref());

    let SegmentPricing {
        mut line_items,
        subtotal_cents,
        selection,
    } = match segment {
        Some(Segment::Commercial) => commercial::price_commercial(&config.commercial, form),
        Some(Segment::Residential) | None => {
            residential::price_residential(&config.residential, form)
        }
    };

    if mentions_high_traffic(&config.high_traffic_markers, form) {
        line_items.push(LineItem::note(HIGH_TRAFFIC_NOTE));
    }

    let discount = discount::apply_discount(
        &config.discounts,
        form.coupon_code.as_deref(),
        subtotal_cents,
    );

    let result = QuoteResult {
        total_cents: discount.total_cents,
        subtotal_cents,
        discount_cents: discount.discount_cents,
        breakdown: Breakdown {
            subtotal: money::whole_dollars(subtotal_cents),
            discount: money::whole_dollars(discount.discount_cents),
            total: money::whole_dollars(discount.total_cents),
        },
        segment,
        line_items,
    };

    PricedQuote {
        result,
        selections: vec![selection],
    }
}

fn mentions_high_traffic(markers: &[String], form: &FormInput) -> bool {
    form.additional_services.iter().any(|service| {
        let service = service.to_lowercase();
        markers
            .iter()
            .any(|marker| service.contains(&marker.to_lowercase()))
    })
}
