//! Common error types for housemix.

use thiserror::Error;

/// Common result type for housemix operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the clustering core.
///
/// Structural and precondition violations abort the operation that raised
/// them with no partial result. Numerical degeneracies inside a single EM
/// iteration are recovered via covariance regularization and never surface
/// here; only total loss of a component's membership does.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A feature column has zero variance and cannot be standardized.
    #[error("feature {feature} has zero standard deviation and cannot be standardized")]
    DegenerateFeature { feature: usize },

    /// A shape invariant was violated (ragged rows, wrong column count,
    /// fit/transform dimension disagreement).
    #[error("shape mismatch for {what}: got {got}, expected {expected}")]
    ShapeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },

    /// Invalid input for semantic or domain reasons.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// More mixture components requested than there are samples.
    #[error("n_samples={n_samples} should be >= n_components={n_components}")]
    TooFewSamples {
        n_samples: usize,
        n_components: usize,
    },

    /// A component's total responsibility mass collapsed during fitting.
    #[error("component {component} lost all responsibility mass during fitting")]
    EmptyComponent { component: usize },

    /// A covariance matrix stayed non-positive-definite after
    /// regularization escalation.
    #[error("covariance of component {component} is not positive definite")]
    SingularCovariance { component: usize },

    /// A cluster label with zero member rows reached the descriptor
    /// calculator.
    #[error("cluster {cluster} has no member rows")]
    EmptyCluster { cluster: usize },

    /// An estimator was used before fitting.
    #[error("{what} not fitted. Call fit() first.")]
    NotFitted { what: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::TooFewSamples {
            n_samples: 3,
            n_components: 5,
        };
        assert_eq!(err.to_string(), "n_samples=3 should be >= n_components=5");

        let err = Error::NotFitted {
            what: "GaussianMixture",
        };
        assert_eq!(err.to_string(), "GaussianMixture not fitted. Call fit() first.");
    }
}
