//! Regression metrics on the held-out split

use serde::Serialize;

use crate::errors::TrainerError;

/// Standard regression metrics
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RegressionMetrics {
    /// Coefficient of determination
    pub r_squared: f64,
    /// Root mean squared error
    pub rmse: f64,
    /// Mean absolute error
    pub mae: f64,
    /// Mean squared error
    pub mse: f64,
}

impl RegressionMetrics {
    /// Compare predictions against true labels
    ///
    /// A constant label column makes R² undefined; it is reported as 1.0 for
    /// a perfect fit and 0.0 otherwise.
    pub fn compute(truth: &[f64], predicted: &[f64]) -> Result<Self, TrainerError> {
        if truth.len() != predicted.len() {
            return Err(TrainerError::Training(format!(
                "{} labels but {} predictions",
                truth.len(),
                predicted.len()
            )));
        }

        let n = truth.len();
        if n == 0 {
            return Ok(Self {
                r_squared: 0.0,
                rmse: 0.0,
                mae: 0.0,
                mse: 0.0,
            });
        }

        let count = n as f64;
        let mean = truth.iter().sum::<f64>() / count;

        let mut ss_res = 0.0;
        let mut ss_tot = 0.0;
        let mut abs_err = 0.0;
        for (&t, &p) in truth.iter().zip(predicted) {
            let err = t - p;
            ss_res += err * err;
            abs_err += err.abs();
            ss_tot += (t - mean) * (t - mean);
        }

        let r_squared = if ss_tot > 0.0 {
            1.0 - ss_res / ss_tot
        } else if ss_res == 0.0 {
            1.0
        } else {
            0.0
        };

        let mse = ss_res / count;
        Ok(Self {
            r_squared,
            rmse: mse.sqrt(),
            mae: abs_err / count,
            mse,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_predictions() {
        let y = [1.0, 2.0, 3.0, 4.0];
        let m = RegressionMetrics::compute(&y, &y).unwrap();
        assert_eq!(m.r_squared, 1.0);
        assert_eq!(m.rmse, 0.0);
        assert_eq!(m.mae, 0.0);
    }

    #[test]
    fn known_errors() {
        let truth = [2.0, 4.0, 6.0, 8.0];
        let predicted = [3.0, 3.0, 7.0, 7.0];
        let m = RegressionMetrics::compute(&truth, &predicted).unwrap();

        // ss_res = 4, ss_tot = 20
        assert!((m.r_squared - 0.8).abs() < 1e-12);
        assert_eq!(m.mse, 1.0);
        assert_eq!(m.rmse, 1.0);
        assert_eq!(m.mae, 1.0);
    }

    #[test]
    fn mean_predictor_scores_zero() {
        let truth = [1.0, 3.0];
        let m = RegressionMetrics::compute(&truth, &[2.0, 2.0]).unwrap();
        assert_eq!(m.r_squared, 0.0);
    }

    #[test]
    fn constant_labels() {
        assert_eq!(RegressionMetrics::compute(&[5.0], &[5.0]).unwrap().r_squared, 1.0);

        let m = RegressionMetrics::compute(&[5.0], &[3.0]).unwrap();
        assert_eq!(m.r_squared, 0.0);
        assert_eq!(m.rmse, 2.0);
    }

    #[test]
    fn length_mismatch_is_an_error() {
        assert!(matches!(
            RegressionMetrics::compute(&[1.0, 2.0], &[1.0]),
            Err(TrainerError::Training(_))
        ));
    }
}
