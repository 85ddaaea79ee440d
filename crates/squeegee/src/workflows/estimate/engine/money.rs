//! Integer cent arithmetic. Rounding is half-up, matching the website's display.

const BASIS_POINTS_PER_UNIT: u128 = 10_000;

/// `amount * basis_points / 10_000`, rounded half-up.
pub(crate) fn apply_basis_points(amount_cents: u64, basis_points: u32) -> u64 {
    let scaled = amount_cents as u128 * basis_points as u128 + BASIS_POINTS_PER_UNIT / 2;
    u64::try_from(scaled / BASIS_POINTS_PER_UNIT).unwrap_or(u64::MAX)
}

/// Nearest whole dollar for display.
pub(crate) fn whole_dollars(cents: u64) -> u64 {
    cents.saturating_add(50) / 100
}

/// `$4.75` style rendering used in line item descriptions and summaries.
pub fn format_dollars(cents: u64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}
