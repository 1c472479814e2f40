//! Fixed-range, equal-width binning

use crate::constants::histogram::MAX_BIN_COUNT;
use crate::error::{HistError, Result};

/// A validated `{range_start, range_end, bin_width}` triple
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinSpec {
    range_start: f64,
    range_end: f64,
    bin_width: f64,
}

impl BinSpec {
    /// Validate and build a bin spec. Bad values are rejected, never clamped.
    pub fn new(range_start: f64, range_end: f64, bin_width: f64) -> Result<Self> {
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(HistError::invalid_bin_spec(format!(
                "range must be finite, got [{}, {}]",
                range_start, range_end
            )));
        }
        if range_end <= range_start {
            return Err(HistError::invalid_bin_spec(format!(
                "range end ({}) must be greater than range start ({})",
                range_end, range_start
            )));
        }
        if !bin_width.is_finite() || bin_width <= 0.0 {
            return Err(HistError::invalid_bin_spec(format!(
                "bin width must be positive, got {}",
                bin_width
            )));
        }

        let spec = Self {
            range_start,
            range_end,
            bin_width,
        };
        let bins = spec.raw_bin_count();
        if bins > MAX_BIN_COUNT as f64 {
            return Err(HistError::invalid_bin_spec(format!(
                "{} bins requested, at most {} are supported",
                bins, MAX_BIN_COUNT
            )));
        }
        Ok(spec)
    }

    pub fn range_start(&self) -> f64 {
        self.range_start
    }

    pub fn range_end(&self) -> f64 {
        self.range_end
    }

    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    fn raw_bin_count(&self) -> f64 {
        ((self.range_end - self.range_start) / self.bin_width).floor()
    }

    /// `floor(extent / bin_width)`, never less than one
    pub fn bin_count(&self) -> usize {
        (self.raw_bin_count() as usize).max(1)
    }

    /// `bin_count + 1` evenly spaced edges; the last one is exactly `range_end`.
    ///
    /// When the extent is not a multiple of the bin width the bins are
    /// stretched to cover the whole range, so the effective width can differ
    /// from the requested one.
    pub fn edges(&self) -> Vec<f64> {
        let n = self.bin_count();
        let extent = self.range_end - self.range_start;
        (0..=n)
            .map(|i| {
                if i == n {
                    self.range_end
                } else {
                    self.range_start + extent * (i as f64 / n as f64)
                }
            })
            .collect()
    }

    /// Index of the bin holding `value`, or `None` when it falls outside
    /// `[range_start, range_end]` or is NaN. The last bin is closed on the right.
    pub fn bin_of(&self, value: f64, edges: &[f64]) -> Option<usize> {
        if value.is_nan() || value < self.range_start || value > self.range_end {
            return None;
        }
        let n = edges.len() - 1;
        if value == self.range_end {
            return Some(n - 1);
        }

        let scaled = (value - self.range_start) / (self.range_end - self.range_start) * n as f64;
        let mut idx = (scaled.floor() as usize).min(n - 1);

        // The scaled guess can land one bin off around an edge
        if value < edges[idx] {
            idx -= 1;
        } else if idx + 1 < n && value >= edges[idx + 1] {
            idx += 1;
        }
        Some(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_count_floors_with_minimum_one() {
        assert_eq!(BinSpec::new(0.0, 5.0, 5.0).unwrap().bin_count(), 1);
        assert_eq!(BinSpec::new(0.0, 10.0, 3.0).unwrap().bin_count(), 3);
        assert_eq!(BinSpec::new(-60.0, 120.0, 5.0).unwrap().bin_count(), 36);
        // Width wider than the range still yields one bin
        assert_eq!(BinSpec::new(0.0, 1.0, 10.0).unwrap().bin_count(), 1);
    }

    #[test]
    fn test_edges_cover_range_contiguously() {
        let spec = BinSpec::new(0.0, 10.0, 3.0).unwrap();
        let edges = spec.edges();

        assert_eq!(edges.len(), 4);
        assert_eq!(edges[0], 0.0);
        assert_eq!(*edges.last().unwrap(), 10.0);
        for pair in edges.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_rejects_invalid_specs() {
        assert!(matches!(
            BinSpec::new(0.0, 10.0, 0.0),
            Err(HistError::InvalidBinSpec { .. })
        ));
        assert!(BinSpec::new(0.0, 10.0, -1.0).is_err());
        assert!(BinSpec::new(10.0, 10.0, 1.0).is_err());
        assert!(BinSpec::new(10.0, 0.0, 1.0).is_err());
        assert!(BinSpec::new(f64::NAN, 1.0, 1.0).is_err());
        assert!(BinSpec::new(0.0, f64::INFINITY, 1.0).is_err());
        assert!(BinSpec::new(0.0, 1.0, f64::NAN).is_err());
        assert!(BinSpec::new(0.0, 1e12, 1e-6).is_err());
    }

    #[test]
    fn test_fixed_range_semantics() {
        let spec = BinSpec::new(0.0, 4.0, 1.0).unwrap();
        let edges = spec.edges();
        let mut counts = vec![0; spec.bin_count()];
        for value in [-1.0, 0.0, 0.5, 1.0, 3.999, 4.0, 4.5, f64::NAN] {
            if let Some(idx) = spec.bin_of(value, &edges) {
                counts[idx] += 1;
            }
        }

        // -1, 4.5 and NaN are outside; 4.0 lands in the closed last bin
        assert_eq!(counts, vec![2, 1, 0, 2]);
    }

    #[test]
    fn test_values_on_inner_edges_go_right() {
        let spec = BinSpec::new(0.0, 1.0, 0.1).unwrap();
        let edges = spec.edges();
        for (i, &edge) in edges.iter().enumerate().take(edges.len() - 1) {
            assert_eq!(spec.bin_of(edge, &edges), Some(i));
        }
    }
}
