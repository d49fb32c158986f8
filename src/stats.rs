//! Population fitness statistics.

/// Summary statistics over a population's fitness values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Statistics {
    /// Highest fitness.
    pub max: f64,

    /// Lowest fitness.
    pub min: f64,

    /// Arithmetic mean.
    pub mean: f64,

    /// Median; the mean of the two middle values for even counts.
    pub median: f64,

    /// Population standard deviation.
    pub stddev: f64,
}

impl Statistics {
    /// Computes statistics over `values` in a single pass plus one sort.
    ///
    /// The standard deviation is `sqrt(E[x²] − E[x]²)`, with the variance
    /// clamped at zero to absorb floating-point cancellation.
    ///
    /// # Panics
    /// Panics if `values` is empty.
    pub fn from_values(values: &[f64]) -> Self {
        assert!(!values.is_empty(), "cannot summarize an empty population");

        let n = values.len() as f64;
        let mut max = f64::NEG_INFINITY;
        let mut min = f64::INFINITY;
        let mut total = 0.0;
        let mut total_sq = 0.0;

        for &v in values {
            max = max.max(v);
            min = min.min(v);
            total += v;
            total_sq += v * v;
        }

        let mean = total / n;
        let variance = (total_sq / n - mean * mean).max(0.0);

        Self {
            max,
            min,
            mean,
            median: median(values),
            stddev: variance.sqrt(),
        }
    }
}

/// Median of `values` (any order).
///
/// Uses `(v[n/2] + v[(n-1)/2]) / 2` on the sorted values, which is the
/// middle value for odd `n` and the mean of the two middle values for even `n`.
///
/// # Panics
/// Panics if `values` is empty.
pub fn median(values: &[f64]) -> f64 {
    assert!(!values.is_empty(), "cannot take the median of nothing");
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    (sorted[n / 2] + sorted[(n - 1) / 2]) / 2.0
}
