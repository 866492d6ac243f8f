pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub mod cluster;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod mixture;
pub mod pipeline;
pub mod preprocessing;

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;
/// Hard cluster assignment, one component index in `[0, K)` per sample.
pub type Labels = Array1<usize>;

pub use cluster::{ClusterDescriptor, assign_labels, cluster_descriptors};
pub use dataset::{FEATURE_COLUMNS, HousingDataset};
pub use error::{Error, Result};
pub use mixture::GaussianMixture;
pub use pipeline::{ClusterPipeline, PipelineOutcome};
pub use preprocessing::StandardScaler;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_types_work() {
        let vec = Vector::zeros(5);
        let mat = Matrix::zeros((3, 4));
        let labels = Labels::zeros(3);
        assert_eq!(vec.len(), 5);
        assert_eq!(mat.shape(), &[3, 4]);
        assert_eq!(labels.len(), 3);
    }
}
