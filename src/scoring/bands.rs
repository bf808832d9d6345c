use crate::config::AgeBand;

/// Pick the age band covering `age`.
///
/// Bands are scanned in declared order and the first whose
/// `min_age <= age < max_age` wins. An age no band covers (below the first
/// band, or at or past the last band's upper edge) falls back to the last
/// declared band so an unusual age never prevents scoring. Returns `None`
/// only when no bands are configured at all.
pub fn resolve_age_band(bands: &[AgeBand], age: f64) -> Option<&AgeBand> {
    bands
        .iter()
        .find(|band| band.min_age <= age && age < band.max_age)
        .or_else(|| bands.last())
}
