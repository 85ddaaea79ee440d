use super::config::CommercialRates;
use super::money::{apply_basis_points, format_dollars};
use super::{RateKind, RateSelection, SegmentPricing};
use crate::workflows::estimate::domain::{FormInput, LineItem};

pub(crate) fn price_commercial(rates: &CommercialRates, form: &FormInput) -> SegmentPricing {
    let requested = form
        .service_type
        .as_deref()
        .map(str::trim)
        .filter(|tier| !tier.is_empty());
    let tier_label = requested.unwrap_or(rates.fallback_tier.as_str());

    let selection = match requested.and_then(|tier| rates.rate_for(tier).map(|rate| (tier, rate))) {
        Some((tier, rate)) => RateSelection {
            kind: RateKind::CommercialTier,
            requested: Some(tier.to_string()),
            resolved: tier.to_string(),
            recognized: true,
            rate_cents: rate,
        },
        None => RateSelection {
            kind: RateKind::CommercialTier,
            requested: requested.map(str::to_string),
            resolved: rates.fallback_tier.clone(),
            recognized: false,
            rate_cents: rates.fallback_rate_cents(),
        },
    };

    let panes = form.window_count;
    let base_cents = u64::from(panes).saturating_mul(selection.rate_cents);
    let mut line_items = vec![LineItem::new(
        format!(
            "{} ({} panes @ {})",
            tier_label,
            panes,
            format_dollars(selection.rate_cents)
        ),
        base_cents,
    )];

    let mut uplift_cents = 0;
    if form.has_service(&rates.uplift_tag) && selection.resolved != rates.fallback_tier {
        uplift_cents = apply_basis_points(base_cents, rates.uplift_basis_points);
        line_items.push(LineItem::new(
            format!(
                "First-Time Restore to Standard Uplift (+{}%)",
                rates.uplift_basis_points / 100
            ),
            uplift_cents,
        ));
    }

    SegmentPricing {
        line_items,
        subtotal_cents: base_cents.saturating_add(uplift_cents),
        selection,
    }
}
