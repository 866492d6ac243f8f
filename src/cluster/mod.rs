//! Hard cluster assignment and per-cluster descriptive statistics.
//!
//! This module turns the mixture model's posterior responsibilities into
//! concrete cluster artifacts:
//! - `assign_labels`: hard labels by maximum responsibility
//! - `cluster_descriptors`: per-cluster feature averages
//! - `ClusterDescriptor`: one cluster's averages plus its display label
//!
//! # Examples
//!
//! ```rust
//! use housemix::{assign_labels, cluster_descriptors};
//! use ndarray::array;
//!
//! let responsibilities = array![
//!     [0.9, 0.1],
//!     [0.2, 0.8],
//!     [0.7, 0.3]
//! ];
//! let labels = assign_labels(&responsibilities).unwrap();
//! assert_eq!(labels.to_vec(), vec![0, 1, 0]);
//!
//! let features = array![
//!     [1400.0, 3.0, 2.0, 250000.0],
//!     [2100.0, 4.0, 3.0, 410000.0],
//!     [1600.0, 3.0, 2.0, 290000.0]
//! ];
//! let descriptors = cluster_descriptors(&features, &labels).unwrap();
//! assert_eq!(descriptors[&0].label(), "SF 1500 | BD 3 | BA 2 | PR $270000");
//! ```

mod assign;
mod descriptors;

pub use assign::assign_labels;
pub use descriptors::{ClusterDescriptor, cluster_descriptors};
