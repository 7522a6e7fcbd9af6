//! Min-max feature scaling.
//!
//! Scaling is always fit on the current shortlist only, so every request
//! gets its own [0, 1] range. A constant column has no range; every value in
//! it maps to 0.

/// Stateless min-max scaler
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureNormalizer;

impl FeatureNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Rescale `values` to [0, 1] with `(v - min) / (max - min)`.
    ///
    /// Returns all zeros when `max == min`, and an empty vec for empty input.
    pub fn normalize(&self, values: &[f32]) -> Vec<f32> {
        let Some((min, max)) = min_max(values) else {
            return Vec::new();
        };

        let range = max - min;
        if range <= 0.0 || !range.is_finite() {
            return vec![0.0; values.len()];
        }

        values
            .iter()
            .map(|&v| ((v - min) / range).clamp(0.0, 1.0))
            .collect()
    }
}

fn min_max(values: &[f32]) -> Option<(f32, f32)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}
