use crate::dataset::N_FEATURES;
use crate::error::{Error, Result};
use crate::{Labels, Matrix};
use std::collections::BTreeMap;

/// Average feature values of the rows assigned to one cluster.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterDescriptor {
    pub avg_square_footage: f64,
    pub avg_bedrooms: f64,
    pub avg_bathrooms: f64,
    pub avg_price: f64,
}

impl ClusterDescriptor {
    /// Display label for the cluster, averages truncated to integers.
    pub fn label(&self) -> String {
        format!(
            "SF {} | BD {} | BA {} | PR ${}",
            self.avg_square_footage as i64,
            self.avg_bedrooms as i64,
            self.avg_bathrooms as i64,
            self.avg_price as i64
        )
    }
}

/// Per-feature arithmetic means for every distinct label present.
///
/// `features` is expected in original units so the resulting labels read as
/// physical quantities.
pub fn cluster_descriptors(
    features: &Matrix,
    labels: &Labels,
) -> Result<BTreeMap<usize, ClusterDescriptor>> {
    if features.nrows() != labels.len() {
        return Err(Error::ShapeMismatch {
            what: "label count",
            got: labels.len(),
            expected: features.nrows(),
        });
    }
    if features.ncols() != N_FEATURES {
        return Err(Error::ShapeMismatch {
            what: "feature columns",
            got: features.ncols(),
            expected: N_FEATURES,
        });
    }

    let mut members: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, &label) in labels.iter().enumerate() {
        members.entry(label).or_default().push(i);
    }

    let mut descriptors = BTreeMap::new();
    for (cluster, rows) in members {
        if rows.is_empty() {
            return Err(Error::EmptyCluster { cluster });
        }

        let mut sums = [0.0; N_FEATURES];
        for &i in &rows {
            for (j, sum) in sums.iter_mut().enumerate() {
                *sum += features[[i, j]];
            }
        }
        let count = rows.len() as f64;

        descriptors.insert(
            cluster,
            ClusterDescriptor {
                avg_square_footage: sums[0] / count,
                avg_bedrooms: sums[1] / count,
                avg_bathrooms: sums[2] / count,
                avg_price: sums[3] / count,
            },
        );
    }

    Ok(descriptors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_descriptor_means_match_recomputation() {
        let features = array![
            [1400.0, 3.0, 2.0, 250000.0],
            [2100.0, 4.0, 3.0, 410000.0],
            [980.0, 2.0, 1.0, 160000.0],
            [1800.0, 3.0, 2.0, 330000.0]
        ];
        let labels = Labels::from_vec(vec![0, 1, 0, 1]);

        let descriptors = cluster_descriptors(&features, &labels).unwrap();
        assert_eq!(descriptors.len(), 2);

        let zero = &descriptors[&0];
        assert!((zero.avg_square_footage - 1190.0).abs() < 1e-12);
        assert!((zero.avg_bedrooms - 2.5).abs() < 1e-12);
        assert!((zero.avg_bathrooms - 1.5).abs() < 1e-12);
        assert!((zero.avg_price - 205000.0).abs() < 1e-12);

        let one = &descriptors[&1];
        assert!((one.avg_square_footage - 1950.0).abs() < 1e-12);
        assert!((one.avg_price - 370000.0).abs() < 1e-12);
    }

    #[test]
    fn test_label_rendering_truncates_to_integers() {
        let descriptor = ClusterDescriptor {
            avg_square_footage: 1190.9,
            avg_bedrooms: 2.5,
            avg_bathrooms: 1.5,
            avg_price: 205000.75,
        };

        assert_eq!(descriptor.label(), "SF 1190 | BD 2 | BA 1 | PR $205000");
    }

    #[test]
    fn test_only_present_labels_get_descriptors() {
        let features = array![
            [1400.0, 3.0, 2.0, 250000.0],
            [2100.0, 4.0, 3.0, 410000.0]
        ];
        // Component 1 never won a row.
        let labels = Labels::from_vec(vec![0, 2]);

        let descriptors = cluster_descriptors(&features, &labels).unwrap();
        assert_eq!(descriptors.keys().copied().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn test_label_count_mismatch() {
        let features = array![[1400.0, 3.0, 2.0, 250000.0]];
        let labels = Labels::from_vec(vec![0, 1]);

        assert!(cluster_descriptors(&features, &labels).is_err());
    }

    #[test]
    fn test_wrong_column_count() {
        let features = array![[1.0, 2.0], [3.0, 4.0]];
        let labels = Labels::from_vec(vec![0, 1]);

        assert!(cluster_descriptors(&features, &labels).is_err());
    }
}
