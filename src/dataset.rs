use crate::error::{Error, Result};
use crate::Matrix;

/// Feature columns the clustering core operates on, in matrix column order.
pub const FEATURE_COLUMNS: [&str; 4] = ["Square Footage", "Bedrooms", "Bathrooms", "Price"];

/// Number of feature columns.
pub const N_FEATURES: usize = FEATURE_COLUMNS.len();

/// A validated table of residential property records.
///
/// The upstream loader is responsible for column coercion and for dropping
/// non-numeric rows; this type only enforces the matrix shape.
#[derive(Clone, Debug)]
pub struct HousingDataset {
    pub features: Matrix,
}

impl HousingDataset {
    pub fn new(features: Matrix) -> Result<Self> {
        if features.nrows() == 0 {
            return Err(Error::InvalidInput(
                "dataset must contain at least one row".to_string(),
            ));
        }
        if features.ncols() != N_FEATURES {
            return Err(Error::ShapeMismatch {
                what: "feature columns",
                got: features.ncols(),
                expected: N_FEATURES,
            });
        }

        Ok(Self { features })
    }

    /// Builds a dataset from row tuples, rejecting ragged rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::InvalidInput(
                "dataset must contain at least one row".to_string(),
            ));
        }

        let mut flat = Vec::with_capacity(rows.len() * N_FEATURES);
        for row in rows {
            if row.len() != N_FEATURES {
                return Err(Error::ShapeMismatch {
                    what: "row length",
                    got: row.len(),
                    expected: N_FEATURES,
                });
            }
            flat.extend_from_slice(row);
        }

        let features = Matrix::from_shape_vec((rows.len(), N_FEATURES), flat)
            .map_err(|e| Error::InvalidInput(e.to_string()))?;
        Self::new(features)
    }

    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }
}
