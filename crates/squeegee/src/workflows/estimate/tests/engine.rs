use super::common::*;
use crate::workflows::estimate::domain::{FormInput, Segment};
use crate::workflows::estimate::engine::{
    price_quote, DiscountTable, PricingConfig, QuoteEngine, RateKind, HIGH_TRAFFIC_NOTE,
};

fn line_item_sum(form: &FormInput, config: &PricingConfig) -> (u64, u64) {
    let priced = price_quote(config, form);
    let sum = priced
        .result
        .line_items
        .iter()
        .map(|item| item.amount_cents)
        .sum();
    (sum, priced.result.subtotal_cents)
}

#[test]
fn biweekly_exterior_commercial_quote() {
    let engine = QuoteEngine::default();
    let result = engine.compute(&quote_request(commercial_form(
        "Biweekly Exterior",
        20,
        &[],
    )));

    assert_eq!(result.segment, Some(Segment::Commercial));
    assert_eq!(result.subtotal_cents, 9_500);
    assert_eq!(result.discount_cents, 0);
    assert_eq!(result.total_cents, 9_500);
    assert_eq!(result.line_items.len(), 1);
    assert_eq!(
        result.line_items[0].description,
        "Biweekly Exterior (20 panes @ $4.75)"
    );
    assert_eq!(result.line_items[0].amount_dollars, 95.0);
}

#[test]
fn first_time_uplift_adds_thirty_percent() {
    let engine = QuoteEngine::default();
    let result = engine.compute(&quote_request(commercial_form(
        "Biweekly Exterior",
        20,
        &["First-Time Uplift"],
    )));

    assert_eq!(result.subtotal_cents, 12_350);
    assert_eq!(result.total_cents, 12_350);
    let uplift = &result.line_items[1];
    assert_eq!(
        uplift.description,
        "First-Time Restore to Standard Uplift (+30%)"
    );
    assert_eq!(uplift.amount_cents, 2_850);
    assert_eq!(uplift.amount_dollars, 28.5);
}

#[test]
fn enumerated_commercial_label_prices_like_explicit_commercial() {
    let engine = QuoteEngine::default();
    let mut office = commercial_form("Monthly Exterior", 30, &[]);
    office.property_type = Some("Office Building".to_string());

    let explicit = engine.compute(&quote_request(commercial_form("Monthly Exterior", 30, &[])));
    let enumerated = engine.compute(&quote_request(office));

    assert_eq!(explicit, enumerated);
    assert_eq!(enumerated.subtotal_cents, 16_500);
}

#[test]
fn two_story_residential_with_screens() {
    let engine = QuoteEngine::default();
    let result = engine.compute(&quote_request(residential_form("both", 10, 4, "2")));

    assert_eq!(result.segment, Some(Segment::Residential));
    assert_eq!(result.subtotal_cents, 21_000);
    assert_eq!(result.total_cents, 21_000);
    assert_eq!(
        result.line_items[0].description,
        "Interior + Exterior Window Cleaning (2 Stories) (10 windows @ $19.00)"
    );
    assert_eq!(result.line_items[0].amount_cents, 19_000);
    assert_eq!(result.line_items[1].amount_cents, 2_000);
}

#[test]
fn mixed_case_coupon_discounts_ten_percent() {
    let engine = QuoteEngine::default();
    let mut form = residential_form("exterior", 10, 0, "1");
    form.coupon_code = Some("1STCLEAN".to_string());

    let result = engine.compute(&quote_request(form));

    assert_eq!(result.subtotal_cents, 10_000);
    assert_eq!(result.discount_cents, 1_000);
    assert_eq!(result.total_cents, 9_000);
    assert_eq!(result.breakdown.discount, 10);
    assert_eq!(result.breakdown.total, 90);
}

#[test]
fn unknown_coupon_leaves_total_untouched() {
    let engine = QuoteEngine::default();
    let mut form = residential_form("exterior", 10, 0, "1");
    form.coupon_code = Some("HALFOFF".to_string());

    let result = engine.compute(&quote_request(form));

    assert_eq!(result.discount_cents, 0);
    assert_eq!(result.total_cents, result.subtotal_cents);
}

#[test]
fn display_figures_round_independently() {
    let engine = QuoteEngine::default();
    let mut form = commercial_form("Biweekly Exterior", 20, &["First-Time Uplift"]);
    form.coupon_code = Some("1stclean".to_string());

    let result = engine.compute(&quote_request(form));

    assert_eq!(result.subtotal_cents, 12_350);
    assert_eq!(result.discount_cents, 1_235);
    assert_eq!(result.total_cents, 11_115);
    assert_eq!(result.breakdown.subtotal, 124);
    assert_eq!(result.breakdown.discount, 12);
    assert_eq!(result.breakdown.total, 111);
    assert_ne!(
        result.breakdown.subtotal - result.breakdown.discount,
        result.breakdown.total,
        "display rounding drift is expected"
    );
}

#[test]
fn high_traffic_note_follows_segment_items_at_zero_cost() {
    let engine = QuoteEngine::default();
    let commercial = engine.compute(&quote_request(commercial_form(
        "Weekly Exterior",
        10,
        &["First-Time Uplift", "High Traffic Recurring"],
    )));
    let residential = engine.compute(&quote_request(FormInput {
        additional_services: ["Kutaritsu Maintenance".to_string()].into_iter().collect(),
        ..residential_form("both", 5, 2, "1")
    }));

    for result in [&commercial, &residential] {
        let last = result.line_items.last().expect("line items present");
        assert_eq!(last.description, HIGH_TRAFFIC_NOTE);
        assert_eq!(last.amount_cents, 0);
        assert!(last.is_informational());
    }
    assert_eq!(commercial.line_items.len(), 3);
    assert_eq!(residential.line_items.len(), 3);
}

#[test]
fn line_items_sum_to_subtotal() {
    let current = PricingConfig::current();
    let legacy = PricingConfig::legacy();
    let forms = [
        commercial_form("Quarterly Interior + Exterior", 33, &["First-Time Uplift"]),
        commercial_form("Unknown Tier", 7, &["High Traffic"]),
        residential_form("both", 13, 9, "4+"),
        residential_form("interior", 3, 0, "2"),
    ];

    for form in &forms {
        for config in [&current, &legacy] {
            let (sum, subtotal) = line_item_sum(form, config);
            assert_eq!(sum, subtotal, "form {form:?}");
        }
    }
}

#[test]
fn totals_never_exceed_subtotal_or_go_negative() {
    let mut config = PricingConfig::current();
    config.discounts = DiscountTable::new([("free", 10_000), ("overkill", 25_000), ("tiny", 1)]);

    for code in ["free", "overkill", "tiny", "none"] {
        for windows in [0, 1, 7, 250] {
            let mut form = residential_form("both", windows, windows / 2, "3");
            form.coupon_code = Some(code.to_string());
            let result = price_quote(&config, &form).result;

            assert!(result.total_cents <= result.subtotal_cents);
            assert_eq!(
                result.total_cents,
                result.subtotal_cents.saturating_sub(result.discount_cents)
            );
        }
    }
}

#[test]
fn identical_input_yields_identical_output() {
    let engine = QuoteEngine::default();
    let mut form = commercial_form("Monthly Interior + Exterior", 48, &["First-Time Uplift"]);
    form.coupon_code = Some("ptpsc".to_string());
    let request = quote_request(form);

    let first = serde_json::to_string(&engine.compute(&request)).expect("serializes");
    let second = serde_json::to_string(&engine.compute(&request)).expect("serializes");

    assert_eq!(first, second);
}

#[test]
fn missing_property_type_has_no_segment_but_is_priced() {
    let engine = QuoteEngine::default();
    let mut form = residential_form("exterior", 4, 0, "1");
    form.property_type = None;

    let result = engine.compute(&quote_request(form));

    assert_eq!(result.segment, None);
    assert_eq!(result.subtotal_cents, 4_000);
    let json = serde_json::to_value(&result).expect("serializes");
    assert!(json.get("segment").is_none());
}

#[test]
fn fallback_selections_are_traced() {
    let engine = QuoteEngine::default();

    let fallback = engine.price(&commercial_form("Daily Polish", 10, &[]));
    let selection = fallback.fallbacks().next().expect("fallback recorded");
    assert_eq!(selection.kind, RateKind::CommercialTier);
    assert_eq!(selection.rate_cents, 1_500);

    let explicit = engine.price(&residential_form("exterior", 10, 0, "1"));
    assert_eq!(explicit.fallbacks().count(), 0);
    assert_eq!(explicit.selections[0].kind, RateKind::ResidentialMode);
}

#[test]
fn legacy_profile_adds_service_call_fee() {
    let legacy = QuoteEngine::new(PricingConfig::legacy());
    let result = legacy.compute(&quote_request(residential_form("interior", 10, 2, "2")));

    // 10 * $7 + 2 * $5 + $50, no story upcharge in the legacy tables
    assert_eq!(result.subtotal_cents, 13_000);
    assert_eq!(
        result
            .line_items
            .last()
            .map(|item| item.description.as_str()),
        Some("Service Call Fee")
    );
}

#[test]
fn service_call_fee_flag_overrides_current_profile() {
    let engine = QuoteEngine::new(PricingConfig::current().with_service_call_fee(true));
    let result = engine.compute(&quote_request(residential_form("both", 1, 0, "1")));
    assert_eq!(result.subtotal_cents, 6_700);
}
