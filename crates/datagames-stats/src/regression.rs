/// Result of an ordinary least-squares line fit `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Fitted slope.
    pub slope: f64,
    /// Fitted intercept.
    pub intercept: f64,
    /// Coefficient of determination, the squared Pearson correlation, in `[0, 1]`.
    pub r2: f64,
}

/// Reasons a line cannot be fitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum FitError {
    #[display("at least two points are required to fit a line, got {len}")]
    InsufficientData { len: usize },
    #[display("all x values are identical, slope is undefined")]
    DegenerateInput,
    #[display("x and y must have the same length (x: {x_len}, y: {y_len})")]
    LengthMismatch { x_len: usize, y_len: usize },
}

impl LinearFit {
    /// Fits a straight line to paired samples by ordinary least squares.
    ///
    /// The correlation is computed from centred sums. When every `y` is
    /// identical the correlation is defined as zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use datagames_stats::regression::{FitError, LinearFit};
    /// let fit = LinearFit::fit(&[0.0, 1.0, 2.0, 3.0, 4.0], &[0.0, 1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert!((fit.slope - 1.0).abs() < 1e-12);
    /// assert!(fit.intercept.abs() < 1e-12);
    /// assert!((fit.r2 - 1.0).abs() < 1e-12);
    ///
    /// assert_eq!(
    ///     LinearFit::fit(&[1.0, 1.0], &[0.0, 2.0]),
    ///     Err(FitError::DegenerateInput)
    /// );
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self, FitError> {
        if xs.len() != ys.len() {
            return Err(FitError::LengthMismatch {
                x_len: xs.len(),
                y_len: ys.len(),
            });
        }
        if xs.len() < 2 {
            return Err(FitError::InsufficientData { len: xs.len() });
        }

        let (x_min, x_max) = xs
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            });
        if x_max - x_min <= 0.0 {
            return Err(FitError::DegenerateInput);
        }

        let n = xs.len() as f64;
        let x_mean = xs.iter().sum::<f64>() / n;
        let y_mean = ys.iter().sum::<f64>() / n;

        let (sxx, syy, sxy) = xs.iter().zip(ys).fold(
            (0.0, 0.0, 0.0),
            |(sxx, syy, sxy), (&x, &y)| {
                let dx = x - x_mean;
                let dy = y - y_mean;
                (sxx + dx * dx, syy + dy * dy, sxy + dx * dy)
            },
        );
        if sxx <= 0.0 {
            return Err(FitError::DegenerateInput);
        }

        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;
        let r = if syy <= 0.0 {
            0.0
        } else {
            (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
        };

        Ok(Self {
            slope,
            intercept,
            r2: r * r,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-10;

    #[test]
    fn test_perfect_identity_line() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let fit = LinearFit::fit(&xs, &xs).unwrap();
        assert!((fit.slope - 1.0).abs() < EPS);
        assert!(fit.intercept.abs() < EPS);
        assert!((fit.r2 - 1.0).abs() < EPS);
    }

    #[test]
    fn test_negative_slope_is_a_perfect_fit() {
        let fit = LinearFit::fit(&[0.0, 1.0, 2.0], &[4.0, 2.0, 0.0]).unwrap();
        assert!((fit.slope + 2.0).abs() < EPS);
        assert!((fit.intercept - 4.0).abs() < EPS);
        assert!((fit.r2 - 1.0).abs() < EPS);
    }

    #[test]
    fn test_noisy_fit_matches_hand_computation() {
        // x mean 2, y mean 2.6; sxx 10, sxy 8, syy 7.2
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [1.0, 2.0, 2.0, 4.0, 4.0];
        let fit = LinearFit::fit(&xs, &ys).unwrap();
        assert!((fit.slope - 0.8).abs() < EPS);
        assert!((fit.intercept - 1.0).abs() < EPS);
        assert!((fit.r2 - 8.0 / 9.0).abs() < EPS);
    }

    #[test]
    fn test_constant_y_has_zero_r2() {
        let fit = LinearFit::fit(&[0.0, 1.0, 2.0], &[3.0, 3.0, 3.0]).unwrap();
        assert!(fit.slope.abs() < EPS);
        assert!((fit.intercept - 3.0).abs() < EPS);
        assert!(fit.r2.abs() < EPS);
    }

    #[test]
    fn test_insufficient_data() {
        assert_eq!(
            LinearFit::fit(&[1.0], &[1.0]),
            Err(FitError::InsufficientData { len: 1 })
        );
        assert_eq!(
            LinearFit::fit(&[], &[]),
            Err(FitError::InsufficientData { len: 0 })
        );
    }

    #[test]
    fn test_identical_x_is_degenerate() {
        assert_eq!(
            LinearFit::fit(&[2.0, 2.0], &[1.0, 5.0]),
            Err(FitError::DegenerateInput)
        );
        assert_eq!(
            LinearFit::fit(&[0.1, 0.1, 0.1], &[1.0, 2.0, 3.0]),
            Err(FitError::DegenerateInput)
        );
    }

    #[test]
    fn test_length_mismatch() {
        let err = LinearFit::fit(&[1.0, 2.0, 3.0], &[1.0, 2.0]).unwrap_err();
        assert_eq!(err, FitError::LengthMismatch { x_len: 3, y_len: 2 });
        assert!(err.to_string().contains("same length"));
    }
}
