use super::config::ResidentialRates;
use super::money::format_dollars;
use super::{RateKind, RateSelection, SegmentPricing};
use crate::workflows::estimate::domain::{FormInput, LineItem};

/// Which sides of the glass the customer asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ServiceMode {
    InteriorAndExterior,
    ExteriorOnly,
    InteriorOnly,
}

impl ServiceMode {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "both" | "interior + exterior" | "interior & exterior" | "interior and exterior" => {
                Some(Self::InteriorAndExterior)
            }
            "exterior" | "exterior only" => Some(Self::ExteriorOnly),
            "interior" | "interior only" => Some(Self::InteriorOnly),
            _ => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ServiceMode::InteriorAndExterior => "Interior + Exterior",
            ServiceMode::ExteriorOnly => "Exterior Only",
            ServiceMode::InteriorOnly => "Interior Only",
        }
    }

    fn window_rate(&self, rates: &ResidentialRates) -> u64 {
        match self {
            ServiceMode::InteriorAndExterior => {
                rates.exterior_window_cents + rates.interior_window_cents
            }
            ServiceMode::ExteriorOnly => rates.exterior_window_cents,
            ServiceMode::InteriorOnly if rates.interior_priced_separately => {
                rates.interior_window_cents
            }
            ServiceMode::InteriorOnly => rates.exterior_window_cents,
        }
    }
}

/// Story band driving the per-window height upcharge.
#[derive(Debug, Clone, PartialEq, Eq)]
enum StoryBand {
    Single,
    Second,
    ThirdOrHigher(String),
}

impl StoryBand {
    fn parse(raw: Option<&str>) -> Self {
        let Some(label) = raw.map(str::trim).filter(|label| !label.is_empty()) else {
            return Self::Single;
        };

        let digits = label.trim_end_matches('+').trim();
        if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
            return Self::Single;
        }

        // Counts too large for u64 are still tall buildings.
        match digits.parse::<u64>().unwrap_or(u64::MAX) {
            0 | 1 => Self::Single,
            2 => Self::Second,
            _ => Self::ThirdOrHigher(label.to_string()),
        }
    }

    fn upcharge(&self, rates: &ResidentialRates) -> u64 {
        match self {
            StoryBand::Single => 0,
            StoryBand::Second => rates.second_story_upcharge_cents,
            StoryBand::ThirdOrHigher(_) => rates.third_story_upcharge_cents,
        }
    }

    fn label(&self) -> &str {
        match self {
            StoryBand::Single => "1",
            StoryBand::Second => "2",
            StoryBand::ThirdOrHigher(label) => label,
        }
    }
}

pub(crate) fn price_residential(rates: &ResidentialRates, form: &FormInput) -> SegmentPricing {
    let requested = form
        .service_type
        .as_deref()
        .map(str::trim)
        .filter(|mode| !mode.is_empty());
    let parsed = requested.and_then(ServiceMode::parse);
    let mode = parsed.unwrap_or(ServiceMode::InteriorAndExterior);
    let base_rate = mode.window_rate(rates);

    let stories = StoryBand::parse(form.stories.as_deref());
    let upcharge = stories.upcharge(rates);
    let final_rate = base_rate + upcharge;

    let windows = form.window_count;
    let screens = form.screen_count;
    let window_total = u64::from(windows).saturating_mul(final_rate);
    let screen_total = u64::from(screens).saturating_mul(rates.screen_cents);

    let mut description = format!("{} Window Cleaning", mode.label());
    if upcharge > 0 {
        description.push_str(&format!(" ({} Stories)", stories.label()));
    }
    description.push_str(&format!(
        " ({} windows @ {})",
        windows,
        format_dollars(final_rate)
    ));

    let mut line_items = vec![LineItem::new(description, window_total)];
    if screens > 0 {
        line_items.push(LineItem::new(
            format!(
                "Screen Cleaning ({} screens @ {})",
                screens,
                format_dollars(rates.screen_cents)
            ),
            screen_total,
        ));
    }

    let mut subtotal_cents = window_total.saturating_add(screen_total);
    if rates.include_service_call_fee {
        line_items.push(LineItem::new(
            "Service Call Fee",
            rates.service_call_fee_cents,
        ));
        subtotal_cents = subtotal_cents.saturating_add(rates.service_call_fee_cents);
    }

    SegmentPricing {
        line_items,
        subtotal_cents,
        selection: RateSelection {
            kind: RateKind::ResidentialMode,
            requested: requested.map(str::to_string),
            resolved: mode.label().to_string(),
            recognized: parsed.is_some(),
            rate_cents: base_rate,
        },
    }
}
