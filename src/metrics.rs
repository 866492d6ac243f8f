use crate::error::{Error, Result};
use crate::{Labels, Matrix};
use std::collections::BTreeMap;

/// Mean silhouette coefficient over all samples.
///
/// For each sample, `a` is the mean distance to the other members of its
/// own cluster and `b` the smallest mean distance to any other cluster;
/// the silhouette is `(b - a) / max(a, b)`. Samples in singleton clusters
/// score 0. Intended for external model-selection sweeps over the
/// component count.
pub fn silhouette_score(x: &Matrix, labels: &Labels) -> Result<f64> {
    if x.nrows() != labels.len() {
        return Err(Error::ShapeMismatch {
            what: "label count",
            got: labels.len(),
            expected: x.nrows(),
        });
    }

    let n_samples = x.nrows();
    if n_samples == 0 {
        return Err(Error::InvalidInput(
            "silhouette requires at least one sample".to_string(),
        ));
    }

    let mut cluster_sizes: BTreeMap<usize, usize> = BTreeMap::new();
    for &label in labels.iter() {
        *cluster_sizes.entry(label).or_insert(0) += 1;
    }

    let n_clusters = cluster_sizes.len();
    if n_clusters < 2 || n_clusters >= n_samples {
        return Err(Error::InvalidInput(format!(
            "silhouette requires 2 <= n_clusters < n_samples, got n_clusters={} for n_samples={}",
            n_clusters, n_samples
        )));
    }

    let mut total = 0.0;
    for i in 0..n_samples {
        let own = labels[i];
        if cluster_sizes[&own] == 1 {
            continue; // singleton scores 0
        }

        let mut distance_sums: BTreeMap<usize, f64> = BTreeMap::new();
        for j in 0..n_samples {
            if i == j {
                continue;
            }
            let dist = euclidean_distance(&x.row(i), &x.row(j));
            *distance_sums.entry(labels[j]).or_insert(0.0) += dist;
        }

        let a = distance_sums.get(&own).copied().unwrap_or(0.0)
            / (cluster_sizes[&own] - 1) as f64;

        let mut b = f64::INFINITY;
        for (&cluster, &sum) in &distance_sums {
            if cluster != own {
                b = b.min(sum / cluster_sizes[&cluster] as f64);
            }
        }

        let denom = a.max(b);
        if denom > 0.0 {
            total += (b - a) / denom;
        }
    }

    Ok(total / n_samples as f64)
}

fn euclidean_distance(a: &ndarray::ArrayView1<f64>, b: &ndarray::ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_well_separated_clusters_score_high() {
        let x = array![
            [0.0, 0.0],
            [0.0, 1.0],
            [1.0, 0.0],
            [10.0, 10.0],
            [10.0, 11.0],
            [11.0, 10.0]
        ];
        let labels = Labels::from_vec(vec![0, 0, 0, 1, 1, 1]);

        let score = silhouette_score(&x, &labels).unwrap();
        assert!(score > 0.85, "expected high silhouette, got {}", score);
        assert!(score <= 1.0);
    }

    #[test]
    fn test_mixed_assignment_scores_lower_than_clean_one() {
        let x = array![
            [0.0, 0.0],
            [0.2, 0.1],
            [0.1, 0.3],
            [5.0, 5.0],
            [5.2, 5.1],
            [5.1, 4.8]
        ];
        let clean = Labels::from_vec(vec![0, 0, 0, 1, 1, 1]);
        let mixed = Labels::from_vec(vec![0, 1, 0, 1, 0, 1]);

        let clean_score = silhouette_score(&x, &clean).unwrap();
        let mixed_score = silhouette_score(&x, &mixed).unwrap();
        assert!(clean_score > 0.8);
        assert!(clean_score > mixed_score);
    }

    #[test]
    fn test_single_cluster_is_an_error() {
        let x = array![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]];
        let labels = Labels::from_vec(vec![0, 0, 0]);

        assert!(silhouette_score(&x, &labels).is_err());
    }

    #[test]
    fn test_label_count_mismatch() {
        let x = array![[0.0, 0.0], [1.0, 1.0]];
        let labels = Labels::from_vec(vec![0]);

        assert!(silhouette_score(&x, &labels).is_err());
    }
}
