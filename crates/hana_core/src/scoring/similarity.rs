//! Vector similarity helpers.

use log::warn;

/// Cosine similarity of two equal-length vectors, in `[-1, 1]`.
///
/// Returns 0 for mismatched lengths, empty input, or a zero-magnitude side.
/// Accumulates in `f64` so the result is symmetric in its arguments.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        warn!(
            "event=cosine_similarity module=scoring status=invalid_input left_len={} right_len={}",
            a.len(),
            b.len()
        );
        return 0.0;
    }

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0)
}

/// Maps a similarity in `[-1, 1]` onto `[0, 1]`.
pub(crate) fn to_unit_interval(similarity: f64) -> f64 {
    ((similarity + 1.0) / 2.0).clamp(0.0, 1.0)
}
