//! UI-free numeric kernel: means, quantiles, five-number summaries,
//! Pearson correlation and locally-weighted (LOWESS) smoothing.
//!
//! Every function degrades to `f64::NAN` (or `None` for the smoother) on
//! empty or degenerate input instead of panicking; the dashboard renders
//! those sentinels as-is.

// ---------------------------------------------------------------------------
// Basic moments
// ---------------------------------------------------------------------------

/// Arithmetic mean. NaN when `values` is empty.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (ddof = 1). NaN for fewer than two values.
pub fn std_dev(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (n - 1) as f64).sqrt()
}

// ---------------------------------------------------------------------------
// Quantiles
// ---------------------------------------------------------------------------

/// Quantile with linear interpolation at rank `q * (n - 1)`.
/// `sorted` must be ascending; NaN when empty.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted[0];
    }
    let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

// ---------------------------------------------------------------------------
// Five-number summary (box plots)
// ---------------------------------------------------------------------------

/// Box-plot geometry for one group: quartiles, 1.5·IQR whiskers and the
/// points beyond them.
#[derive(Debug, Clone, PartialEq)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Lowest data point within 1.5·IQR below `q1`.
    pub whisker_low: f64,
    /// Highest data point within 1.5·IQR above `q3`.
    pub whisker_high: f64,
    /// Data points beyond either whisker.
    pub outliers: Vec<f64>,
}

/// Compute the five-number summary of `values`. `None` when empty.
pub fn five_number_summary(values: &[f64]) -> Option<FiveNumberSummary> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let q1 = quantile(&sorted, 0.25);
    let median = quantile(&sorted, 0.50);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    let lo_fence = q1 - 1.5 * iqr;
    let hi_fence = q3 + 1.5 * iqr;

    let whisker_low = sorted
        .iter()
        .copied()
        .find(|&v| v >= lo_fence)
        .unwrap_or(sorted[0]);
    let whisker_high = sorted
        .iter()
        .rev()
        .copied()
        .find(|&v| v <= hi_fence)
        .unwrap_or(sorted[sorted.len() - 1]);
    let outliers = sorted
        .iter()
        .copied()
        .filter(|&v| v < lo_fence || v > hi_fence)
        .collect();

    Some(FiveNumberSummary {
        min: sorted[0],
        q1,
        median,
        q3,
        max: sorted[sorted.len() - 1],
        whisker_low,
        whisker_high,
        outliers,
    })
}

// ---------------------------------------------------------------------------
// Correlation
// ---------------------------------------------------------------------------

/// Pearson correlation of two equally long columns.
/// NaN when fewer than two points or either column has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return f64::NAN;
    }
    let mx = mean(&xs[..n]);
    let my = mean(&ys[..n]);
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for i in 0..n {
        let dx = xs[i] - mx;
        let dy = ys[i] - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    sxy / (sxx.sqrt() * syy.sqrt())
}

/// Pairwise Pearson matrix over `columns`. Symmetric; diagonal entries are
/// 1.0 wherever the column has positive variance, NaN otherwise.
pub fn correlation_matrix(columns: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let k = columns.len();
    let mut matrix = vec![vec![f64::NAN; k]; k];
    for i in 0..k {
        for j in i..k {
            let r = if i == j {
                if std_dev(&columns[i]) > 0.0 {
                    1.0
                } else {
                    f64::NAN
                }
            } else {
                pearson(&columns[i], &columns[j])
            };
            matrix[i][j] = r;
            matrix[j][i] = r;
        }
    }
    matrix
}

// ---------------------------------------------------------------------------
// LOWESS smoothing
// ---------------------------------------------------------------------------

/// Locally-weighted linear regression over `(x, y)` points.
///
/// For each observed x, fits a weighted least-squares line over the
/// `ceil(frac * n)` nearest neighbors with tricube weights and evaluates it
/// at that x. Returns the smoothed curve sorted by x, or `None` when a fit
/// is impossible (fewer than three points, or all x identical).
pub fn lowess(points: &[(f64, f64)], frac: f64) -> Option<Vec<[f64; 2]>> {
    let n = points.len();
    if n < 3 {
        return None;
    }
    let mut pts = points.to_vec();
    pts.sort_by(|a, b| a.0.total_cmp(&b.0));
    if pts[0].0 == pts[n - 1].0 {
        return None;
    }

    let k = ((frac * n as f64).ceil() as usize).clamp(2, n);
    let mut curve = Vec::with_capacity(n);

    for &(x0, _) in &pts {
        // k-th smallest distance defines the neighborhood radius.
        let mut dists: Vec<f64> = pts.iter().map(|&(x, _)| (x - x0).abs()).collect();
        dists.sort_by(f64::total_cmp);
        let dmax = dists[k - 1];

        let mut sw = 0.0;
        let mut swx = 0.0;
        let mut swy = 0.0;
        let mut swxx = 0.0;
        let mut swxy = 0.0;
        for &(x, y) in &pts {
            let d = (x - x0).abs();
            let w = if dmax > 0.0 {
                let u = (d / dmax).min(1.0);
                let t = 1.0 - u * u * u;
                t * t * t
            } else if d == 0.0 {
                1.0
            } else {
                0.0
            };
            if w <= 0.0 {
                continue;
            }
            sw += w;
            swx += w * x;
            swy += w * y;
            swxx += w * x * x;
            swxy += w * x * y;
        }

        let denom = sw * swxx - swx * swx;
        let fitted = if denom.abs() > 1e-12 * sw.max(1.0) {
            let slope = (sw * swxy - swx * swy) / denom;
            let intercept = (swy - slope * swx) / sw;
            intercept + slope * x0
        } else {
            // Degenerate local window: fall back to the weighted mean.
            swy / sw
        };
        curve.push([x0, fitted]);
    }

    Some(curve)
}

// ---------------------------------------------------------------------------
// Descriptive summary (summary table)
// ---------------------------------------------------------------------------

/// One column's descriptive statistics, pandas `describe()` layout.
#[derive(Debug, Clone)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Descriptive statistics for one column; all NaN at count 0.
pub fn describe(values: &[f64]) -> Describe {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Describe {
        count: values.len(),
        mean: mean(values),
        std: std_dev(values),
        min: sorted.first().copied().unwrap_or(f64::NAN),
        q25: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.50),
        q75: quantile(&sorted, 0.75),
        max: sorted.last().copied().unwrap_or(f64::NAN),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn mean_of_empty_is_nan() {
        assert!(mean(&[]).is_nan());
        assert!(close(mean(&[8.0, 4.0, 6.0]), 6.0));
    }

    #[test]
    fn std_dev_needs_two_values() {
        assert!(std_dev(&[3.0]).is_nan());
        assert!(close(std_dev(&[2.0, 4.0]), std::f64::consts::SQRT_2));
    }

    #[test]
    fn quantile_interpolates_linearly() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert!(close(quantile(&v, 0.25), 1.75));
        assert!(close(quantile(&v, 0.5), 2.5));
        assert!(close(quantile(&v, 0.75), 3.25));
        assert!(close(quantile(&v, 0.0), 1.0));
        assert!(close(quantile(&v, 1.0), 4.0));
        assert!(quantile(&[], 0.5).is_nan());
    }

    #[test]
    fn five_number_summary_flags_outliers() {
        let v = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0];
        let s = five_number_summary(&v).unwrap();
        assert!(close(s.q1, 3.25));
        assert!(close(s.q3, 7.75));
        assert!(close(s.median, 5.5));
        assert!(close(s.min, 1.0));
        assert!(close(s.max, 100.0));
        assert!(close(s.whisker_low, 1.0));
        assert!(close(s.whisker_high, 9.0));
        assert_eq!(s.outliers, vec![100.0]);
        assert!(five_number_summary(&[]).is_none());
    }

    #[test]
    fn pearson_perfect_correlation() {
        assert!(close(pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]), 1.0));
        assert!(close(pearson(&[1.0, 2.0, 3.0], &[6.0, 4.0, 2.0]), -1.0));
        assert!(pearson(&[1.0], &[2.0]).is_nan());
        assert!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_nan());
    }

    #[test]
    fn correlation_matrix_is_symmetric_and_bounded() {
        let cols = vec![
            vec![1.0, 2.0, 3.0, 4.0],
            vec![2.0, 1.0, 4.0, 3.0],
            vec![4.0, 3.0, 2.0, 1.0],
        ];
        let m = correlation_matrix(&cols);
        for i in 0..3 {
            assert!(close(m[i][i], 1.0));
            for j in 0..3 {
                assert!(close(m[i][j], m[j][i]));
                assert!(m[i][j] >= -1.0 - 1e-9 && m[i][j] <= 1.0 + 1e-9);
            }
        }
    }

    #[test]
    fn correlation_matrix_zero_variance_diagonal_is_nan() {
        let m = correlation_matrix(&[vec![5.0, 5.0, 5.0], vec![1.0, 2.0, 3.0]]);
        assert!(m[0][0].is_nan());
        assert!(close(m[1][1], 1.0));
        assert!(m[0][1].is_nan());
    }

    #[test]
    fn lowess_reproduces_a_straight_line() {
        let pts: Vec<(f64, f64)> = (0..20).map(|i| (i as f64, 2.0 * i as f64 + 1.0)).collect();
        let curve = lowess(&pts, 0.5).unwrap();
        assert_eq!(curve.len(), 20);
        for [x, y] in curve {
            assert!(close(y, 2.0 * x + 1.0), "({x}, {y}) off the line");
        }
    }

    #[test]
    fn lowess_refuses_degenerate_input() {
        assert!(lowess(&[(0.0, 1.0), (1.0, 2.0)], 0.5).is_none());
        assert!(lowess(&[(2.0, 1.0), (2.0, 2.0), (2.0, 3.0)], 0.5).is_none());
    }

    #[test]
    fn describe_matches_pandas_layout() {
        let d = describe(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(d.count, 4);
        assert!(close(d.mean, 2.5));
        assert!(close(d.q25, 1.75));
        assert!(close(d.median, 2.5));
        assert!(close(d.q75, 3.25));
        assert!(close(d.min, 1.0));
        assert!(close(d.max, 4.0));
        assert!(describe(&[]).mean.is_nan());
    }
}
