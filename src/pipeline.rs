use crate::Labels;
use crate::cluster::{ClusterDescriptor, assign_labels, cluster_descriptors};
use crate::dataset::HousingDataset;
use crate::error::Result;
use crate::mixture::GaussianMixture;
use crate::preprocessing::StandardScaler;
use log::info;
use std::collections::BTreeMap;

/// End-to-end clustering run over a housing dataset.
///
/// Standardizes the features, fits the mixture model, derives hard labels
/// and per-cluster descriptors, and renders one display label per row.
/// All inputs and outputs are in-memory; serialization and rendering are
/// left to external collaborators.
#[derive(Clone, Debug)]
pub struct ClusterPipeline {
    n_components: usize,
    max_iter: usize,
    tolerance: f64,
    random_state: Option<u64>,
}

/// Everything one pipeline run produces.
///
/// `labels` and `row_labels` are the two derived columns an output writer
/// appends to the original rows; the fitted `mixture` and `scaler` are kept
/// for downstream collaborators (visualization embeddings, model-selection
/// sweeps over new component counts).
#[derive(Clone, Debug)]
pub struct PipelineOutcome {
    pub labels: Labels,
    pub descriptors: BTreeMap<usize, ClusterDescriptor>,
    pub row_labels: Vec<String>,
    pub converged: bool,
    pub mixture: GaussianMixture,
    pub scaler: StandardScaler,
}

impl ClusterPipeline {
    pub fn new(n_components: usize) -> Self {
        if n_components == 0 {
            panic!("n_components must be > 0, got {}", n_components);
        }

        Self {
            n_components,
            max_iter: 100,
            tolerance: 1e-4,
            random_state: None,
        }
    }

    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    pub fn run(&self, dataset: &HousingDataset) -> Result<PipelineOutcome> {
        let mut scaler = StandardScaler::new();
        let standardized = scaler.fit_transform(&dataset.features)?;
        info!(
            "standardized {} samples across {} features",
            dataset.n_samples(),
            dataset.n_features()
        );

        let mut mixture = GaussianMixture::new(self.n_components)
            .max_iter(self.max_iter)
            .tolerance(self.tolerance);
        if let Some(seed) = self.random_state {
            mixture = mixture.random_state(seed);
        }
        mixture.fit(&standardized)?;
        let converged = mixture.converged.unwrap_or(false);
        info!(
            "fitted {}-component mixture in {} iterations (converged: {})",
            self.n_components,
            mixture.n_iter.unwrap_or(0),
            converged
        );

        let responsibilities = mixture.predict_proba(&standardized)?;
        let labels = assign_labels(&responsibilities)?;

        // Averages come from original units so the rendered labels read as
        // physical quantities.
        let descriptors = cluster_descriptors(&dataset.features, &labels)?;
        info!("derived descriptors for {} clusters", descriptors.len());

        let row_labels = labels.iter().map(|label| descriptors[label].label()).collect();

        Ok(PipelineOutcome {
            labels,
            descriptors,
            row_labels,
            converged,
            mixture,
            scaler,
        })
    }
}
