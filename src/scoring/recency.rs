//! Recency weighting for publications and grants.

/// Linear decay weight for a year relative to `now`.
///
/// 1.0 for the current year and anything claiming to be in the future,
/// declining linearly to 0 over `half_life` years. A missing year is
/// weighted 0 so undated records never boost a score.
#[must_use]
pub fn recency_weight(year: Option<i32>, now: i32, half_life: f64) -> f64 {
    let Some(year) = year else {
        return 0.0;
    };
    let age = f64::from(now - year);
    if age <= 0.0 {
        return 1.0;
    }
    (1.0 - age / half_life).max(0.0)
}
