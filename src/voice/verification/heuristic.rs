//! Local fallback comparison when the verification backend is unreachable
//!
//! This only compares payload sizes. It keeps voice commands usable offline
//! and is not a biometric check.

/// Minimum similarity for a sample to pass
pub const FALLBACK_THRESHOLD: f64 = 0.6;

/// `1 - |a - b| / max(a, b)`, in `0.0..=1.0`
pub fn length_similarity(a: usize, b: usize) -> f64 {
    let longest = a.max(b);
    if longest == 0 {
        return 1.0;
    }
    1.0 - a.abs_diff(b) as f64 / longest as f64
}

/// Whether any enrolled sample is close enough in size to `sample`
pub fn matches_enrolled(sample: &str, enrolled: &[String]) -> bool {
    enrolled
        .iter()
        .any(|e| length_similarity(e.len(), sample.len()) >= FALLBACK_THRESHOLD)
}
