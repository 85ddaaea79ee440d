use clap::builder::BoolishValueParser;
use clap::Args;
use serde_json::json;
use squeegee::error::AppError;
use squeegee::workflows::estimate::engine::format_dollars;
use squeegee::workflows::estimate::intake::validate_quote_request;
use squeegee::workflows::estimate::{
    FormInput, PricedQuote, PricingConfig, PricingProfile, QuoteEngine, QuoteRequest,
};
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct QuoteArgs {
    /// Property type label (e.g. "Commercial", "Office Building", "Single Family Home")
    #[arg(long)]
    pub(crate) property_type: Option<String>,
    /// Commercial tier name or residential service mode (both, exterior, interior)
    #[arg(long)]
    pub(crate) service_type: Option<String>,
    /// Window or pane count
    #[arg(long, default_value_t = 0)]
    pub(crate) windows: u32,
    /// Screen count (residential only)
    #[arg(long, default_value_t = 0)]
    pub(crate) screens: u32,
    /// Number of stories ("1", "2", "3+")
    #[arg(long)]
    pub(crate) stories: Option<String>,
    /// Additional service tag; repeat for more than one
    #[arg(long = "service")]
    pub(crate) services: Vec<String>,
    /// Coupon code to apply
    #[arg(long)]
    pub(crate) coupon: Option<String>,
    /// Pricing preset (current or legacy)
    #[arg(long, value_parser = parse_profile, default_value = "current")]
    pub(crate) profile: PricingProfile,
    /// Force the residential service-call fee on or off, overriding the preset
    #[arg(long, env = "QUOTE_SERVICE_CALL_FEE", value_parser = BoolishValueParser::new())]
    pub(crate) service_call_fee: Option<bool>,
    /// Read a full quote request JSON file instead of the form flags
    #[arg(long)]
    pub(crate) request: Option<PathBuf>,
    /// Print the priced quote as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

fn parse_profile(raw: &str) -> Result<PricingProfile, String> {
    PricingProfile::parse(raw).ok_or_else(|| format!("unknown pricing profile '{raw}'"))
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let config = pricing_config(&args);
    let form = load_form(&args)?;
    let priced = QuoteEngine::new(config).price(&form);

    if args.json {
        let payload = json!({
            "profile": args.profile.label(),
            "quote": priced.result,
            "rateSelections": priced.selections,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        for line in render_breakdown(&priced, args.profile) {
            println!("{line}");
        }
    }

    Ok(())
}

fn pricing_config(args: &QuoteArgs) -> PricingConfig {
    let config = PricingConfig::for_profile(args.profile);
    match args.service_call_fee {
        Some(enabled) => config.with_service_call_fee(enabled),
        None => config,
    }
}

fn load_form(args: &QuoteArgs) -> Result<FormInput, AppError> {
    if let Some(path) = &args.request {
        let raw = fs::read_to_string(path)?;
        let request: QuoteRequest = serde_json::from_str(&raw)?;
        validate_quote_request(&request)?;
        return Ok(request.form_input);
    }

    Ok(FormInput {
        property_type: args.property_type.clone(),
        service_type: args.service_type.clone(),
        window_count: args.windows,
        screen_count: args.screens,
        stories: args.stories.clone(),
        additional_services: args.services.iter().cloned().collect(),
        coupon_code: args.coupon.clone(),
        ..FormInput::default()
    })
}

pub(crate) fn render_breakdown(priced: &PricedQuote, profile: PricingProfile) -> Vec<String> {
    let result = &priced.result;
    let mut lines = Vec::new();

    let segment = result
        .segment
        .map(|segment| segment.label().to_string())
        .unwrap_or_else(|| "unspecified".to_string());
    lines.push(format!(
        "Quote ({} pricing, {} segment)",
        profile.label(),
        segment
    ));

    for item in &result.line_items {
        if item.is_informational() {
            lines.push(format!("  - {}", item.description));
        } else {
            lines.push(format!(
                "  - {}: {}",
                item.description,
                format_dollars(item.amount_cents)
            ));
        }
    }

    lines.push(format!("Subtotal: {}", format_dollars(result.subtotal_cents)));
    if result.discount_cents > 0 {
        lines.push(format!("Discount: -{}", format_dollars(result.discount_cents)));
    }
    lines.push(format!("Total: {}", format_dollars(result.total_cents)));

    for selection in priced.fallbacks() {
        lines.push(format!(
            "Note: '{}' not recognized, priced as {}",
            selection.requested.as_deref().unwrap_or("(none)"),
            selection.resolved
        ));
    }

    lines
}
