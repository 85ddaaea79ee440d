use super::config::DiscountTable;
use super::money::apply_basis_points;

pub(crate) struct DiscountOutcome {
    pub discount_cents: u64,
    pub total_cents: u64,
}

/// Apply at most one coupon. The total is floored at zero even for rates above 100%.
pub(crate) fn apply_discount(
    table: &DiscountTable,
    code: Option<&str>,
    subtotal_cents: u64,
) -> DiscountOutcome {
    let basis_points = table.basis_points_for(code);
    let discount_cents = apply_basis_points(subtotal_cents, basis_points);

    DiscountOutcome {
        discount_cents,
        total_cents: subtotal_cents.saturating_sub(discount_cents),
    }
}
