use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

pub const ONE_TIME_TIER: &str = "One-Time Clean";
pub const FIRST_TIME_UPLIFT_TAG: &str = "First-Time Uplift";

/// Named pricing presets. `Legacy` reproduces the flat service-call era of the site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingProfile {
    #[default]
    Current,
    Legacy,
}

impl PricingProfile {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "current" | "default" => Some(Self::Current),
            "legacy" => Some(Self::Legacy),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PricingProfile::Current => "current",
            PricingProfile::Legacy => "legacy",
        }
    }
}

/// Immutable rate tables and flags consumed by the quote engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub segments: SegmentRules,
    pub commercial: CommercialRates,
    pub residential: ResidentialRates,
    pub discounts: DiscountTable,
    /// Substrings marking a recurring high-traffic arrangement.
    pub high_traffic_markers: Vec<String>,
}

impl PricingConfig {
    pub fn current() -> Self {
        Self {
            segments: SegmentRules::standard(),
            commercial: CommercialRates::standard(),
            residential: ResidentialRates::standard(),
            discounts: DiscountTable::standard(),
            high_traffic_markers: vec!["High Traffic".to_string(), "Kutaritsu".to_string()],
        }
    }

    pub fn legacy() -> Self {
        Self {
            residential: ResidentialRates {
                second_story_upcharge_cents: 0,
                third_story_upcharge_cents: 0,
                include_service_call_fee: true,
                interior_priced_separately: true,
                ..ResidentialRates::standard()
            },
            ..Self::current()
        }
    }

    pub fn for_profile(profile: PricingProfile) -> Self {
        match profile {
            PricingProfile::Current => Self::current(),
            PricingProfile::Legacy => Self::legacy(),
        }
    }

    pub fn with_service_call_fee(mut self, enabled: bool) -> Self {
        self.residential.include_service_call_fee = enabled;
        self
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self::current()
    }
}

/// Property-type labels that always price as commercial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentRules {
    pub commercial_labels: BTreeSet<String>,
}

impl SegmentRules {
    pub fn standard() -> Self {
        Self {
            commercial_labels: ["Office Building", "Retail Store", "Restaurant", "Other Commercial"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn is_commercial_label(&self, label: &str) -> bool {
        self.commercial_labels
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(label))
    }
}

/// Per-pane commercial rates keyed by tier name, in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommercialRates {
    pub tiers: BTreeMap<String, u64>,
    /// Tier used when the requested tier is missing or unknown; never uplifted.
    pub fallback_tier: String,
    pub uplift_tag: String,
    pub uplift_basis_points: u32,
}

impl CommercialRates {
    pub fn standard() -> Self {
        let tiers = [
            ("Weekly Exterior", 425),
            ("Biweekly Exterior", 475),
            ("Monthly Exterior", 550),
            ("Monthly Interior + Exterior", 700),
            ("Quarterly Interior + Exterior", 800),
            (ONE_TIME_TIER, 1500),
        ]
        .into_iter()
        .map(|(tier, cents)| (tier.to_string(), cents))
        .collect();

        Self {
            tiers,
            fallback_tier: ONE_TIME_TIER.to_string(),
            uplift_tag: FIRST_TIME_UPLIFT_TAG.to_string(),
            uplift_basis_points: 3_000,
        }
    }

    pub fn rate_for(&self, tier: &str) -> Option<u64> {
        self.tiers.get(tier).copied()
    }

    /// Rate of the fallback tier, or the highest configured rate when it is absent.
    pub fn fallback_rate_cents(&self) -> u64 {
        self.rate_for(&self.fallback_tier)
            .or_else(|| self.tiers.values().copied().max())
            .unwrap_or(0)
    }
}

/// Residential per-unit rates in cents plus the historical flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidentialRates {
    pub exterior_window_cents: u64,
    pub interior_window_cents: u64,
    pub screen_cents: u64,
    pub second_story_upcharge_cents: u64,
    pub third_story_upcharge_cents: u64,
    pub service_call_fee_cents: u64,
    pub include_service_call_fee: bool,
    /// Price interior-only work at the interior rate instead of the exterior rate.
    pub interior_priced_separately: bool,
}

impl ResidentialRates {
    pub fn standard() -> Self {
        Self {
            exterior_window_cents: 1_000,
            interior_window_cents: 700,
            screen_cents: 500,
            second_story_upcharge_cents: 200,
            third_story_upcharge_cents: 500,
            service_call_fee_cents: 5_000,
            include_service_call_fee: false,
            interior_priced_separately: false,
        }
    }
}

/// Coupon codes mapped to basis points. Keys are stored normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountTable {
    codes: BTreeMap<String, u32>,
}

impl DiscountTable {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        Self {
            codes: codes
                .into_iter()
                .map(|(code, basis_points)| (normalize_code(code.as_ref()), basis_points))
                .collect(),
        }
    }

    pub fn standard() -> Self {
        Self::new([("1stclean", 1_000), ("ptpsc", 1_500), ("refer5", 2_000)])
    }

    /// Basis points for a raw code; unknown or blank codes earn nothing.
    pub fn basis_points_for(&self, code: Option<&str>) -> u32 {
        code.map(normalize_code)
            .and_then(|code| self.codes.get(&code).copied())
            .unwrap_or(0)
    }
}

pub fn normalize_code(code: &str) -> String {
    code.trim().to_lowercase()
}
