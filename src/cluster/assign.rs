use crate::error::{Error, Result};
use crate::{Labels, Matrix};

/// Hard labels from a responsibility matrix.
///
/// Each row's label is the index of its maximum responsibility; ties break
/// to the lowest component index so repeated runs always agree.
pub fn assign_labels(responsibilities: &Matrix) -> Result<Labels> {
    if responsibilities.ncols() == 0 {
        return Err(Error::InvalidInput(
            "responsibility matrix must have at least one component column".to_string(),
        ));
    }

    let mut labels = Labels::zeros(responsibilities.nrows());

    for (i, row) in responsibilities.axis_iter(ndarray::Axis(0)).enumerate() {
        let mut best = 0;
        let mut best_value = row[0];
        for (k, &value) in row.iter().enumerate().skip(1) {
            if value > best_value {
                best = k;
                best_value = value;
            }
        }
        labels[i] = best;
    }

    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_assign_picks_max_responsibility() {
        let resp = array![[0.1, 0.7, 0.2], [0.6, 0.3, 0.1], [0.2, 0.2, 0.6]];

        let labels = assign_labels(&resp).unwrap();
        assert_eq!(labels.to_vec(), vec![1, 0, 2]);
    }

    #[test]
    fn test_ties_break_to_lowest_index() {
        let resp = array![[0.5, 0.5], [0.25, 0.25]];

        let labels = assign_labels(&resp).unwrap();
        assert_eq!(labels.to_vec(), vec![0, 0]);
    }

    #[test]
    fn test_empty_component_axis_is_an_error() {
        let resp = Matrix::zeros((3, 0));
        assert!(assign_labels(&resp).is_err());
    }

    #[test]
    fn test_no_rows_gives_no_labels() {
        let resp = Matrix::zeros((0, 2));
        let labels = assign_labels(&resp).unwrap();
        assert_eq!(labels.len(), 0);
    }
}
