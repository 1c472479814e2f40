use polars::prelude::*;

/// Statistics results
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            mean: 0.0,
            std_dev: 0.0,
            median: 0.0,
            min: 0.0,
            max: 0.0,
            count: 0,
        }
    }
}

impl Stats {
    /// Full span of the column, used as the default histogram range
    pub fn span(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

/// Calculate comprehensive statistics from a Series using polars.
/// Nulls are not counted.
pub fn calculate_stats(series: &Series) -> Stats {
    let series_f64 = match series.cast(&DataType::Float64) {
        Ok(s) => s,
        Err(_) => return Stats::default(),
    };

    let chunked = match series_f64.f64() {
        Ok(c) => c,
        Err(_) => return Stats::default(),
    };

    let count = chunked.len() - chunked.null_count();
    if count == 0 {
        return Stats::default();
    }

    Stats {
        mean: chunked.mean().unwrap_or(0.0),
        std_dev: chunked.std(1).unwrap_or(0.0), // ddof=1 for sample std dev
        median: chunked.median().unwrap_or(0.0),
        min: chunked.min().unwrap_or(0.0),
        max: chunked.max().unwrap_or(0.0),
        count,
    }
}

/// Calculate statistics over the finite entries of a slice; NaN and infinities are skipped
pub fn stats_from_values(values: &[f64]) -> Stats {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return Stats::default();
    }

    let series = Series::new("values".into(), &finite);
    calculate_stats(&series)
}
