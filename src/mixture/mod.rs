//! Gaussian mixture modelling for unsupervised clustering.
//!
//! This module provides `GaussianMixture`, a K-component multivariate
//! Gaussian mixture with full covariance per component, fitted by
//! Expectation-Maximization. Fitting is deterministic for a given
//! `random_state`, so identical data, seed and component count always
//! reproduce identical parameters and labels.
//!
//! # Examples
//!
//! ```rust
//! use housemix::{GaussianMixture, Matrix};
//! use ndarray::array;
//!
//! let x = array![
//!     [0.0, 0.1],
//!     [0.2, -0.1],
//!     [-0.1, 0.0],
//!     [5.0, 5.1],
//!     [5.2, 4.9],
//!     [4.9, 5.0]
//! ];
//!
//! let mut gmm = GaussianMixture::new(2).random_state(0);
//! let labels = gmm.fit_predict(&x).unwrap();
//! assert_eq!(labels.len(), 6);
//!
//! // Mixing weights sum to one
//! let weights = gmm.weights.as_ref().unwrap();
//! assert!((weights.sum() - 1.0).abs() < 1e-9);
//! ```

mod gaussian;

pub use gaussian::GaussianMixture;
