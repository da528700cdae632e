//! Equal-width binning shared by the histogram and the distribution chart.

/// Equal-width bins spanning a value range.
///
/// Every bin is half-open `[lo, hi)` except the last, which also includes its
/// upper edge so the maximum value is always counted.
#[derive(Debug, Clone, PartialEq)]
pub struct Bins {
    edges: Vec<f64>,
}

impl Bins {
    /// Split the range of `values` into `count` bins.
    ///
    /// Returns `None` when there are no values. A degenerate range (all values
    /// equal) is widened to one unit centred on the value.
    pub fn equal_width(values: &[f64], count: u32) -> Option<Self> {
        let count = count.max(1) as usize;
        let (min, max) = values.iter().fold(None, |acc: Option<(f64, f64)>, &v| {
            Some(match acc {
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
                None => (v, v),
            })
        })?;

        let (lo, hi) = if min == max {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };
        let width = (hi - lo) / count as f64;

        let mut edges: Vec<f64> = (0..count).map(|i| lo + width * i as f64).collect();
        edges.push(hi);
        Some(Self { edges })
    }

    /// Bin boundaries, `len() + 1` of them.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    /// Midpoint of every bin.
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
    }

    /// Index of the bin holding `value`, `None` when outside the range.
    pub fn index_of(&self, value: f64) -> Option<usize> {
        let lo = self.edges[0];
        let hi = self.edges[self.len()];
        if !(lo..=hi).contains(&value) {
            return None;
        }
        // Compare against the stored edges so a value on an edge opens the next bin.
        let idx = self.edges.partition_point(|edge| *edge <= value);
        Some(idx.saturating_sub(1).min(self.len() - 1))
    }

    /// Number of values falling into each bin.
    pub fn counts(&self, values: impl IntoIterator<Item = f64>) -> Vec<u32> {
        let mut counts = vec![0; self.len()];
        for value in values {
            if let Some(idx) = self.index_of(value) {
                counts[idx] += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_values() {
        assert!(Bins::equal_width(&[], 10).is_none());
    }

    #[test]
    fn test_edges_span_range() {
        let bins = Bins::equal_width(&[0.0, 10.0, 5.0], 4).unwrap();
        assert_eq!(bins.edges(), &[0.0, 2.5, 5.0, 7.5, 10.0]);
        assert_eq!(bins.len(), 4);
        assert_eq!(bins.centers(), vec![1.25, 3.75, 6.25, 8.75]);
    }

    #[test]
    fn test_last_bin_is_closed() {
        let bins = Bins::equal_width(&[0.0, 10.0], 2).unwrap();
        assert_eq!(bins.counts([0.0, 5.0, 10.0]), vec![1, 2]);
        assert_eq!(bins.index_of(10.0), Some(1));
        assert_eq!(bins.index_of(10.5), None);
    }

    #[test]
    fn test_degenerate_range() {
        let bins = Bins::equal_width(&[3.0, 3.0], 5).unwrap();
        assert_eq!(bins.edges()[0], 2.5);
        assert_eq!(bins.edges()[5], 3.5);
        assert_eq!(bins.counts([3.0, 3.0]).iter().sum::<u32>(), 2);
    }

    #[test]
    fn test_value_on_inner_edge_opens_next_bin() {
        for count in 1..=100 {
            let bins = Bins::equal_width(&[0.1, 0.7], count).unwrap();
            for (i, &edge) in bins.edges()[..bins.len()].iter().enumerate() {
                assert_eq!(bins.index_of(edge), Some(i), "edge {} of {} bins", i, count);
            }
            assert_eq!(bins.index_of(0.7), Some(bins.len() - 1));
        }
    }

    #[test]
    fn test_counts_agree_with_edges() {
        let masses: Vec<f64> = (0..60).map(|i| 2700.0 + 25.0 * i as f64).collect();
        for count in 1..=100 {
            let bins = Bins::equal_width(&masses, count).unwrap();
            let edges = bins.edges();
            let last = bins.len() - 1;
            let expected: Vec<u32> = (0..bins.len())
                .map(|i| {
                    masses
                        .iter()
                        .filter(|&&v| v >= edges[i] && (v < edges[i + 1] || (i == last && v <= edges[i + 1])))
                        .count() as u32
                })
                .collect();
            assert_eq!(bins.counts(masses.iter().copied()), expected, "{} bins", count);
        }
    }

    #[test]
    fn test_counts_total_matches_input() {
        let values: Vec<f64> = (0..97).map(|i| i as f64 * 0.37).collect();
        let bins = Bins::equal_width(&values, 13).unwrap();
        assert_eq!(bins.counts(values.iter().copied()).iter().sum::<u32>(), 97);
    }
}
