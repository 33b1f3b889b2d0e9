//! Rating aggregate, computed on read and never stored.

/// Arithmetic mean of `scores`, or `None` when there are none.
pub fn average_score(scores: &[i16]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let sum: i64 = scores.iter().map(|&s| i64::from(s)).sum();
    Some(sum as f64 / scores.len() as f64)
}
