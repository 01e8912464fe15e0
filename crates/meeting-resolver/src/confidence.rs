//! Coarse confidence from the number of feasible candidates.

/// Map a candidate count to a confidence bucket.
///
/// `1.0` for a single candidate, `0.9` up to 3, `0.8` up to 10, `0.7` beyond.
/// The value is informational only and never influences selection. The
/// resolver never calls this with zero candidates; zero falls in the top
/// bucket so the mapping stays non-increasing.
pub fn estimate_confidence(candidate_count: usize) -> f64 {
    match candidate_count {
        0..=1 => 1.0,
        2..=3 => 0.9,
        4..=10 => 0.8,
        _ => 0.7,
    }
}
