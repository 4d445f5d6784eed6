use std::ops::Range;

/// An equal-width histogram normalised so that its total area is one.
///
/// Bin heights are densities (`count / (total * width)`), which puts the
/// histogram on the same scale as a probability density function evaluated
/// over the same range.
#[derive(Debug, Clone)]
pub struct DensityHistogram {
    /// Bins in ascending order of their ranges.
    pub bins: Vec<DensityBin>,
}

/// A single bin of a [`DensityHistogram`].
#[derive(Debug, Clone)]
pub struct DensityBin {
    /// The range of values covered by this bin (inclusive start, exclusive end).
    ///
    /// The last bin also contains values equal to its end.
    pub range: Range<f64>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
    /// The normalised height of this bin.
    pub density: f64,
}

impl DensityHistogram {
    /// Creates a density histogram with `num_bins` equal-width bins spanning
    /// the minimum to the maximum of `values`.
    ///
    /// If every value is identical, the bins span one unit centred on that value.
    /// An empty dataset or `num_bins == 0` produces a histogram without bins.
    /// Non-finite values are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// # use datagames_stats::histogram::DensityHistogram;
    /// let histogram = DensityHistogram::new(&[0.0, 1.0, 1.0, 2.0], 2);
    /// assert_eq!(histogram.bins[0].count, 1);
    /// assert_eq!(histogram.bins[1].count, 3);
    /// assert!((histogram.area() - 1.0).abs() < 1e-12);
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn new(values: &[f64], num_bins: usize) -> Self {
        let finite = values.iter().copied().filter(|v| v.is_finite());
        let Some((mut min, mut max)) = finite.clone().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
        }) else {
            return Self { bins: vec![] };
        };
        if num_bins == 0 {
            return Self { bins: vec![] };
        }
        if max - min < f64::EPSILON {
            min -= 0.5;
            max += 0.5;
        }

        let width = (max - min) / num_bins as f64;
        let mut bins = (0..num_bins)
            .map(|i| {
                // Recompute each edge from `min` to avoid accumulating rounding error
                let start = min + width * i as f64;
                let end = if i + 1 == num_bins {
                    max
                } else {
                    min + width * (i + 1) as f64
                };
                DensityBin {
                    range: start..end,
                    count: 0,
                    density: 0.0,
                }
            })
            .collect::<Vec<_>>();

        let mut total = 0_u64;
        for value in finite {
            let idx = (((value - min) / width).floor() as usize).min(num_bins - 1);
            bins[idx].count += 1;
            total += 1;
        }

        for bin in &mut bins {
            bin.density = bin.count as f64 / (total as f64 * width);
        }

        Self { bins }
    }

    /// Returns the `len() + 1` bin edges, from the first bin's start to the
    /// last bin's end.
    #[must_use]
    pub fn edges(&self) -> Vec<f64> {
        let Some(last) = self.bins.last() else {
            return vec![];
        };
        self.bins
            .iter()
            .map(|bin| bin.range.start)
            .chain([last.range.end])
            .collect()
    }

    /// Returns the height of the tallest bin, or zero for an empty histogram.
    #[must_use]
    pub fn max_density(&self) -> f64 {
        self.bins
            .iter()
            .map(|bin| bin.density)
            .fold(0.0, f64::max)
    }

    /// Returns the total area under the histogram (one, unless it has no bins).
    #[must_use]
    pub fn area(&self) -> f64 {
        self.bins
            .iter()
            .map(|bin| bin.density * (bin.range.end - bin.range.start))
            .sum()
    }
}
