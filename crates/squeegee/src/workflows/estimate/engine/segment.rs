use super::config::SegmentRules;
use crate::workflows::estimate::domain::Segment;

/// Resolve the market segment for a free-text property type.
///
/// Explicit "Commercial"/"Residential" labels win; otherwise membership in the
/// commercial label set decides. A blank or missing property type has no segment.
pub fn classify_segment(rules: &SegmentRules, property_type: Option<&str>) -> Option<Segment> {
    let label = property_type.map(str::trim).filter(|label| !label.is_empty())?;

    if label.eq_ignore_ascii_case("commercial") || rules.is_commercial_label(label) {
        Some(Segment::Commercial)
    } else {
        Some(Segment::Residential)
    }
}
