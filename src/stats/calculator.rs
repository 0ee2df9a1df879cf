//! Statistics Calculator Module
//! Histogram binning, box summaries and normal Q-Q points for the diagnostic plots.

use crate::config::PlotConfig;
use crate::data::{DataProcessor, ProcessorError};
use statrs::distribution::{ContinuousCDF, Normal};

/// Frequency histogram over evenly spaced bins.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Bin edges, one more than the number of bins.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// (left edge, right edge, count) for each bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(self.counts.iter())
            .map(|(edge, &count)| (edge[0], edge[1], count))
    }
}

/// Five-number box summary plus outliers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub count: usize,
    pub mean: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    /// Points beyond the whiskers, ascending.
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Least-squares line through the Q-Q points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation of the Q-Q points.
    pub r: f64,
}

impl LinearFit {
    pub fn at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Sample quantiles against standard normal quantiles.
#[derive(Debug, Clone, PartialEq)]
pub struct QqPlot {
    pub theoretical: Vec<f64>,
    /// Sorted sample values.
    pub ordered: Vec<f64>,
    /// Absent for a single point or a constant sample.
    pub fit: Option<LinearFit>,
}

impl QqPlot {
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.theoretical
            .iter()
            .copied()
            .zip(self.ordered.iter().copied())
    }
}

/// Everything the three diagnostic panels draw for one column.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticSummary {
    pub variable: String,
    pub histogram: Histogram,
    pub boxplot: BoxSummary,
    pub qq: QqPlot,
}

impl DiagnosticSummary {
    /// Compute the histogram, box summary and Q-Q points for a numeric column.
    pub fn compute(
        df: &polars::prelude::DataFrame,
        variable: &str,
        config: &PlotConfig,
    ) -> Result<Self, ProcessorError> {
        let values = DataProcessor::diagnostic_values(df, variable)?;
        log::debug!("Diagnostics for '{}' over {} values", variable, values.len());
        Ok(Self::from_values(variable, &values, config))
    }

    /// Build the summary from finite, non-empty values.
    pub fn from_values(variable: &str, values: &[f64], config: &PlotConfig) -> Self {
        Self {
            variable: variable.to_string(),
            histogram: StatsCalculator::histogram(values, config.histogram_bins),
            boxplot: StatsCalculator::box_summary(values, config.whisker_coef),
            qq: StatsCalculator::qq_plot(values),
        }
    }
}

/// Handles the statistical calculations behind the plots.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Count values into `bins` equal-width bins spanning the data.
    ///
    /// Bins are half-open except the last, which also holds the maximum. A constant
    /// sample is centred in a range of width one.
    pub fn histogram(values: &[f64], bins: usize) -> Histogram {
        let bins = bins.max(1);
        if values.is_empty() {
            return Histogram {
                edges: vec![0.0; bins + 1],
                counts: vec![0; bins],
            };
        }

        let (mut lo, mut hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let mut edges: Vec<f64> = (0..bins).map(|i| lo + i as f64 * width).collect();
        edges.push(hi);

        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Histogram { edges, counts }
    }

    /// Quartiles, whiskers at `coef` x IQR and outliers.
    pub fn box_summary(values: &[f64], coef: f64) -> BoxSummary {
        let n = values.len();
        if n == 0 {
            return BoxSummary {
                count: 0,
                mean: f64::NAN,
                q1: f64::NAN,
                median: f64::NAN,
                q3: f64::NAN,
                whisker_low: f64::NAN,
                whisker_high: f64::NAN,
                outliers: Vec::new(),
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = values.iter().sum::<f64>() / n as f64;
        let q1 = Self::percentile(&sorted, 25.0);
        let median = Self::percentile(&sorted, 50.0);
        let q3 = Self::percentile(&sorted, 75.0);

        let iqr = q3 - q1;
        let low_limit = q1 - coef * iqr;
        let high_limit = q3 + coef * iqr;

        // Whiskers stop at the last data point inside the limits
        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= low_limit)
            .map_or(q1, |v| v.min(q1));
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_limit)
            .map_or(q3, |v| v.max(q3));

        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < whisker_low || v > whisker_high)
            .collect();

        BoxSummary {
            count: n,
            mean,
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            outliers,
        }
    }

    /// Normal probability plot points with a least-squares fit.
    ///
    /// Plotting positions are Filliben's order statistic medians.
    pub fn qq_plot(values: &[f64]) -> QqPlot {
        let mut ordered = values.to_vec();
        ordered.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let theoretical: Vec<f64> = Self::order_statistic_medians(ordered.len())
            .into_iter()
            .map(Self::normal_ppf)
            .collect();
        let fit = Self::linear_fit(&theoretical, &ordered);

        QqPlot {
            theoretical,
            ordered,
            fit,
        }
    }

    /// Filliben's estimate of the uniform order statistic medians.
    pub fn order_statistic_medians(n: usize) -> Vec<f64> {
        if n == 0 {
            return Vec::new();
        }

        let nf = n as f64;
        let last = 0.5f64.powf(1.0 / nf);
        let mut medians: Vec<f64> = (0..n)
            .map(|i| (i as f64 + 1.0 - 0.3175) / (nf + 0.365))
            .collect();
        medians[n - 1] = last;
        medians[0] = 1.0 - last;
        medians
    }

    /// Standard normal quantile function.
    fn normal_ppf(p: f64) -> f64 {
        Normal::new(0.0, 1.0)
            .map(|dist| dist.inverse_cdf(p))
            .unwrap_or(f64::NAN)
    }

    fn linear_fit(x: &[f64], y: &[f64]) -> Option<LinearFit> {
        let n = x.len();
        if n < 2 || n != y.len() {
            return None;
        }

        let nf = n as f64;
        let mean_x = x.iter().sum::<f64>() / nf;
        let mean_y = y.iter().sum::<f64>() / nf;

        let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
        for (&xi, &yi) in x.iter().zip(y) {
            let dx = xi - mean_x;
            let dy = yi - mean_y;
            sxx += dx * dx;
            syy += dy * dy;
            sxy += dx * dy;
        }

        if sxx == 0.0 || syy == 0.0 {
            return None;
        }

        let slope = sxy / sxx;
        Some(LinearFit {
            slope,
            intercept: mean_y - slope * mean_x,
            r: sxy / (sxx * syy).sqrt(),
        })
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use polars::prelude::*;

    #[test]
    fn test_one_to_five_median() {
        let df = df!("x" => [1i64, 2, 3, 4, 5]).unwrap();
        let summary = DiagnosticSummary::compute(&df, "x", &PlotConfig::default()).unwrap();

        assert_eq!(summary.boxplot.median, 3.0);
        assert_eq!(summary.boxplot.q1, 2.0);
        assert_eq!(summary.boxplot.q3, 4.0);
        assert_eq!(summary.boxplot.whisker_low, 1.0);
        assert_eq!(summary.boxplot.whisker_high, 5.0);
        assert!(summary.boxplot.outliers.is_empty());
        assert_eq!(summary.histogram.counts.len(), 30);
        assert_eq!(summary.histogram.total(), 5);
    }

    #[test]
    fn test_compute_is_deterministic() {
        let df = df!("x" => [4.0, 8.0, 15.0, 16.0, 23.0, 42.0]).unwrap();
        let config = PlotConfig::default();
        let first = DiagnosticSummary::compute(&df, "x", &config).unwrap();
        let second = DiagnosticSummary::compute(&df, "x", &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_compute_missing_and_text_columns() {
        let df = df!("x" => [1.0], "name" => ["a"]).unwrap();
        let config = PlotConfig::default();

        assert!(matches!(
            DiagnosticSummary::compute(&df, "y", &config),
            Err(ProcessorError::ColumnNotFound { .. })
        ));
        assert!(matches!(
            DiagnosticSummary::compute(&df, "name", &config),
            Err(ProcessorError::NotNumeric { .. })
        ));
    }

    #[test]
    fn test_histogram_last_bin_inclusive() {
        let hist = StatsCalculator::histogram(&[1.0, 2.0, 3.0, 4.0, 5.0], 4);
        assert_eq!(hist.edges, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(hist.counts, vec![1, 1, 1, 2]);
        assert_eq!(hist.max_count(), 2);
    }

    #[test]
    fn test_histogram_constant_sample() {
        let hist = StatsCalculator::histogram(&[7.0, 7.0, 7.0], 10);
        assert_relative_eq!(hist.edges[0], 6.5);
        assert_relative_eq!(hist.edges[10], 7.5);
        assert_eq!(hist.total(), 3);
        assert_eq!(hist.counts[5], 3);
    }

    #[test]
    fn test_histogram_bins_iter() {
        let hist = StatsCalculator::histogram(&[0.0, 10.0], 2);
        let bins: Vec<_> = hist.bins().collect();
        assert_eq!(bins, vec![(0.0, 5.0, 1), (5.0, 10.0, 1)]);
    }

    #[test]
    fn test_box_summary_outlier() {
        let summary = StatsCalculator::box_summary(&[100.0, 1.0, 2.0, 3.0, 4.0], 1.5);
        assert_eq!(summary.q1, 2.0);
        assert_eq!(summary.q3, 4.0);
        assert_eq!(summary.iqr(), 2.0);
        assert_eq!(summary.whisker_high, 4.0);
        assert_eq!(summary.whisker_low, 1.0);
        assert_eq!(summary.outliers, vec![100.0]);
        assert_eq!(summary.mean, 22.0);
        assert_eq!(summary.count, 5);
    }

    #[test]
    fn test_box_summary_interpolated_quartiles() {
        let summary = StatsCalculator::box_summary(&[1.0, 2.0, 3.0, 4.0], 1.5);
        assert_relative_eq!(summary.q1, 1.75);
        assert_relative_eq!(summary.median, 2.5);
        assert_relative_eq!(summary.q3, 3.25);
    }

    #[test]
    fn test_order_statistic_medians() {
        let m = StatsCalculator::order_statistic_medians(5);
        assert_relative_eq!(m[4], 0.5f64.powf(0.2));
        assert_relative_eq!(m[0], 1.0 - 0.5f64.powf(0.2));
        assert_relative_eq!(m[2], 0.5, epsilon = 1e-12);

        assert_eq!(StatsCalculator::order_statistic_medians(1), vec![0.5]);
        assert!(StatsCalculator::order_statistic_medians(0).is_empty());
    }

    #[test]
    fn test_qq_symmetric_theoretical_quantiles() {
        let qq = StatsCalculator::qq_plot(&[5.0, 3.0, 1.0, 4.0, 2.0]);
        assert_eq!(qq.ordered, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_relative_eq!(qq.theoretical[2], 0.0, epsilon = 1e-9);
        assert_relative_eq!(qq.theoretical[0], -qq.theoretical[4], epsilon = 1e-9);

        let fit = qq.fit.unwrap();
        assert!(fit.slope > 0.0);
        assert!(fit.r > 0.98);
        assert_relative_eq!(fit.intercept, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_qq_perfect_fit_for_linear_sample() {
        let base = StatsCalculator::qq_plot(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let sample: Vec<f64> = base.theoretical.iter().map(|t| 2.0 * t + 10.0).collect();

        let fit = StatsCalculator::qq_plot(&sample).fit.unwrap();
        assert_relative_eq!(fit.slope, 2.0, epsilon = 1e-9);
        assert_relative_eq!(fit.intercept, 10.0, epsilon = 1e-9);
        assert_relative_eq!(fit.r, 1.0, epsilon = 1e-9);
        assert_relative_eq!(fit.at(1.0), 12.0, epsilon = 1e-9);
    }

    #[test]
    fn test_qq_without_fit() {
        assert!(StatsCalculator::qq_plot(&[3.0]).fit.is_none());
        assert!(StatsCalculator::qq_plot(&[2.0, 2.0, 2.0]).fit.is_none());
    }

    #[test]
    fn test_percentile() {
        let sorted = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(StatsCalculator::percentile(&sorted, 50.0), 3.0);
        assert_eq!(StatsCalculator::percentile(&sorted, 0.0), 1.0);
        assert_eq!(StatsCalculator::percentile(&sorted, 100.0), 5.0);
        assert!(StatsCalculator::percentile(&[], 50.0).is_nan());
    }
}
