use crate::error::{Error, Result};
use crate::{Matrix, Vector};

/// Per-feature z-score standardization.
///
/// `fit` learns per-column mean and standard deviation; `transform` maps
/// each entry to `(x - mean) / std`. The fitted parameters are retained so
/// the same transform can be applied to data other than the training matrix.
#[derive(Clone, Debug)]
pub struct StandardScaler {
    mean: Option<Vector>,
    std: Option<Vector>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self {
            mean: None,
            std: None,
        }
    }

    pub fn fit(&mut self, data: &Matrix) -> Result<()> {
        if data.nrows() == 0 || data.ncols() == 0 {
            return Err(Error::InvalidInput(
                "input matrix must have at least one sample and one feature".to_string(),
            ));
        }

        let mean = data
            .mean_axis(ndarray::Axis(0))
            .ok_or_else(|| Error::InvalidInput("failed to compute mean".to_string()))?;
        let std = data.std_axis(ndarray::Axis(0), 0.0);

        // A constant column would divide by zero downstream.
        for (feature, &s) in std.iter().enumerate() {
            if s == 0.0 {
                return Err(Error::DegenerateFeature { feature });
            }
        }

        self.mean = Some(mean);
        self.std = Some(std);
        Ok(())
    }

    pub fn transform(&self, data: &Matrix) -> Result<Matrix> {
        let (mean, std) = self.params()?;

        if data.ncols() != mean.len() {
            return Err(Error::ShapeMismatch {
                what: "feature columns",
                got: data.ncols(),
                expected: mean.len(),
            });
        }

        let mut result = data.clone();
        for mut row in result.axis_iter_mut(ndarray::Axis(0)) {
            row -= mean;
            row /= std;
        }

        Ok(result)
    }

    pub fn fit_transform(&mut self, data: &Matrix) -> Result<Matrix> {
        self.fit(data)?;
        self.transform(data)
    }

    /// Maps standardized values back to original units.
    pub fn inverse_transform(&self, data: &Matrix) -> Result<Matrix> {
        let (mean, std) = self.params()?;

        if data.ncols() != mean.len() {
            return Err(Error::ShapeMismatch {
                what: "feature columns",
                got: data.ncols(),
                expected: mean.len(),
            });
        }

        let mut result = data.clone();
        for mut row in result.axis_iter_mut(ndarray::Axis(0)) {
            row *= std;
            row += mean;
        }

        Ok(result)
    }

    pub fn mean(&self) -> Option<&Vector> {
        self.mean.as_ref()
    }

    pub fn std(&self) -> Option<&Vector> {
        self.std.as_ref()
    }

    fn params(&self) -> Result<(&Vector, &Vector)> {
        let mean = self.mean.as_ref().ok_or(Error::NotFitted {
            what: "StandardScaler",
        })?;
        let std = self.std.as_ref().ok_or(Error::NotFitted {
            what: "StandardScaler",
        })?;
        Ok((mean, std))
    }
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_standard_scaler() {
        let data = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let mut scaler = StandardScaler::new();

        let scaled = scaler.fit_transform(&data).unwrap();
        assert_eq!(scaled.shape(), data.shape());
    }

    #[test]
    fn test_scaled_columns_have_zero_mean_unit_std() {
        let data = array![
            [1400.0, 3.0, 2.0, 250000.0],
            [2100.0, 4.0, 3.0, 410000.0],
            [980.0, 2.0, 1.0, 160000.0],
            [1750.0, 3.0, 2.0, 320000.0],
            [3200.0, 5.0, 4.0, 780000.0]
        ];
        let mut scaler = StandardScaler::new();
        let scaled = scaler.fit_transform(&data).unwrap();

        let means = scaled.mean_axis(ndarray::Axis(0)).unwrap();
        let stds = scaled.std_axis(ndarray::Axis(0), 0.0);
        for j in 0..scaled.ncols() {
            assert!(means[j].abs() < 1e-9, "column {} mean {}", j, means[j]);
            assert!((stds[j] - 1.0).abs() < 1e-9, "column {} std {}", j, stds[j]);
        }
    }

    #[test]
    fn test_round_trip_recovers_original() {
        let data = array![
            [1400.0, 3.0, 2.0, 250000.0],
            [2100.0, 4.0, 3.0, 410000.0],
            [980.0, 2.0, 1.0, 160000.0]
        ];
        let mut scaler = StandardScaler::new();
        let scaled = scaler.fit_transform(&data).unwrap();
        let recovered = scaler.inverse_transform(&scaled).unwrap();

        for (orig, rec) in data.iter().zip(recovered.iter()) {
            assert!((orig - rec).abs() < 1e-9 * orig.abs().max(1.0));
        }
    }

    #[test]
    fn test_degenerate_feature_is_an_error() {
        // Second column is constant.
        let data = array![[1.0, 7.0], [2.0, 7.0], [3.0, 7.0]];
        let mut scaler = StandardScaler::new();

        let err = scaler.fit(&data).unwrap_err();
        assert_eq!(err, Error::DegenerateFeature { feature: 1 });
    }

    #[test]
    fn test_transform_without_fit() {
        let data = array![[1.0, 2.0], [3.0, 4.0]];
        let scaler = StandardScaler::new();

        assert!(scaler.transform(&data).is_err());
    }

    #[test]
    fn test_transform_dimension_mismatch() {
        let train = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let test = array![[1.0, 2.0], [3.0, 4.0]];

        let mut scaler = StandardScaler::new();
        scaler.fit(&train).unwrap();

        assert!(scaler.transform(&test).is_err());
    }
}
