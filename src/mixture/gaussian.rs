use crate::cluster::assign_labels;
use crate::error::{Error, Result};
use crate::{Labels, Matrix, Vector};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Clone, Debug)]
pub struct GaussianMixture {
    pub weights: Option<Vector>,
    pub means: Option<Matrix>,
    pub covariances: Option<Vec<Matrix>>,
    pub log_likelihood: Option<f64>,
    pub n_iter: Option<usize>,
    pub converged: Option<bool>,
    n_components: usize,
    max_iter: usize,
    tolerance: f64,
    reg_covar: f64,
    random_state: Option<u64>,
}

impl GaussianMixture {
    pub fn new(n_components: usize) -> Self {
        if n_components == 0 {
            panic!("n_components must be > 0, got {}", n_components);
        }

        Self {
            weights: None,
            means: None,
            covariances: None,
            log_likelihood: None,
            n_iter: None,
            converged: None,
            n_components,
            max_iter: 100,
            tolerance: 1e-4,
            reg_covar: 1e-6,
            random_state: None,
        }
    }

    pub fn max_iter(mut self, max_iter: usize) -> Self {
        if max_iter == 0 {
            panic!("max_iter must be > 0, got {}", max_iter);
        }
        self.max_iter = max_iter;
        self
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        if tolerance <= 0.0 {
            panic!("tolerance must be > 0, got {}", tolerance);
        }
        self.tolerance = tolerance;
        self
    }

    pub fn reg_covar(mut self, reg_covar: f64) -> Self {
        if reg_covar < 0.0 {
            panic!("reg_covar must be non-negative, got {}", reg_covar);
        }
        self.reg_covar = reg_covar;
        self
    }

    pub fn random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    pub fn fit(&mut self, x: &Matrix) -> Result<()> {
        if x.nrows() == 0 || x.ncols() == 0 {
            return Err(Error::InvalidInput(
                "input matrix must have at least one sample and one feature".to_string(),
            ));
        }

        if x.nrows() < self.n_components {
            return Err(Error::TooFewSamples {
                n_samples: x.nrows(),
                n_components: self.n_components,
            });
        }

        let n_features = x.ncols();
        let mut rng = StdRng::seed_from_u64(self.random_state.unwrap_or(0));

        let mut means = initialize_means(x, self.n_components, &mut rng);
        let mut weights = Vector::from_elem(self.n_components, 1.0 / self.n_components as f64);
        let mut covariances: Vec<Matrix> =
            (0..self.n_components).map(|_| Matrix::eye(n_features)).collect();

        let mut prev_ll = f64::NEG_INFINITY;
        let mut ll = f64::NEG_INFINITY;
        let mut converged = false;
        let mut n_iter = 0;

        for iteration in 0..self.max_iter {
            n_iter = iteration + 1;

            let factors = factorize_all(&covariances, self.reg_covar)?;
            let (iter_ll, resp) = e_step(x, &weights, &means, &factors);
            let (new_weights, new_means, new_covariances) = m_step(x, &resp, self.reg_covar)?;

            weights = new_weights;
            means = new_means;
            covariances = new_covariances;
            ll = iter_ll;

            debug!("EM iteration {}: log-likelihood {:.6}", n_iter, ll);

            if (ll - prev_ll).abs() < self.tolerance {
                converged = true;
                break;
            }
            prev_ll = ll;
        }

        if !converged {
            warn!(
                "EM did not converge within {} iterations (log-likelihood {:.6})",
                self.max_iter, ll
            );
        }

        self.weights = Some(weights);
        self.means = Some(means);
        self.covariances = Some(covariances);
        self.log_likelihood = Some(ll);
        self.n_iter = Some(n_iter);
        self.converged = Some(converged);

        Ok(())
    }

    /// Posterior responsibilities of each component for each sample.
    ///
    /// Runs the E-step only; the fitted model is read-only here, so this
    /// works on any matrix with the training feature count, not just the
    /// training data.
    pub fn predict_proba(&self, x: &Matrix) -> Result<Matrix> {
        let (weights, means, covariances) = self.fitted_params()?;

        if x.ncols() != means.ncols() {
            return Err(Error::ShapeMismatch {
                what: "feature columns",
                got: x.ncols(),
                expected: means.ncols(),
            });
        }

        let factors = factorize_all(covariances, self.reg_covar)?;
        let (_, resp) = e_step(x, weights, means, &factors);
        Ok(resp)
    }

    pub fn predict(&self, x: &Matrix) -> Result<Labels> {
        let resp = self.predict_proba(x)?;
        assign_labels(&resp)
    }

    pub fn fit_predict(&mut self, x: &Matrix) -> Result<Labels> {
        self.fit(x)?;
        self.predict(x)
    }

    /// Mean per-sample log-likelihood of `x` under the fitted model.
    pub fn score(&self, x: &Matrix) -> Result<f64> {
        let (weights, means, covariances) = self.fitted_params()?;

        if x.ncols() != means.ncols() {
            return Err(Error::ShapeMismatch {
                what: "feature columns",
                got: x.ncols(),
                expected: means.ncols(),
            });
        }
        if x.nrows() == 0 {
            return Err(Error::InvalidInput(
                "input matrix must have at least one sample".to_string(),
            ));
        }

        let factors = factorize_all(covariances, self.reg_covar)?;
        let (ll, _) = e_step(x, weights, means, &factors);
        Ok(ll / x.nrows() as f64)
    }

    pub fn n_components(&self) -> usize {
        self.n_components
    }

    fn fitted_params(&self) -> Result<(&Vector, &Matrix, &[Matrix])> {
        let not_fitted = Error::NotFitted {
            what: "GaussianMixture",
        };
        let weights = self.weights.as_ref().ok_or(not_fitted.clone())?;
        let means = self.means.as_ref().ok_or(not_fitted.clone())?;
        let covariances = self.covariances.as_ref().ok_or(not_fitted)?;
        Ok((weights, means, covariances.as_slice()))
    }
}

/// Seed component means from data points, first uniformly, then weighted by
/// squared distance to the nearest already-chosen mean.
fn initialize_means(x: &Matrix, n_components: usize, rng: &mut StdRng) -> Matrix {
    let n_samples = x.nrows();
    let mut means = Matrix::zeros((n_components, x.ncols()));

    let first = rng.gen_range(0..n_samples);
    means.row_mut(0).assign(&x.row(first));

    for k in 1..n_components {
        let mut distances = Vector::zeros(n_samples);
        for i in 0..n_samples {
            let mut min_dist = f64::INFINITY;
            for j in 0..k {
                let dist = squared_distance(&x.row(i), &means.row(j));
                min_dist = min_dist.min(dist);
            }
            distances[i] = min_dist;
        }

        let total: f64 = distances.sum();
        if total > 0.0 {
            let target = rng.gen_range(0.0..1.0) * total;
            let mut cumulative = 0.0;
            let mut chosen = n_samples - 1;
            for i in 0..n_samples {
                cumulative += distances[i];
                if cumulative >= target {
                    chosen = i;
                    break;
                }
            }
            means.row_mut(k).assign(&x.row(chosen));
        } else {
            // Every remaining point coincides with a chosen mean.
            let fallback = rng.gen_range(0..n_samples);
            means.row_mut(k).assign(&x.row(fallback));
        }
    }

    means
}

fn squared_distance(a: &ndarray::ArrayView1<f64>, b: &ndarray::ArrayView1<f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Lower-triangular Cholesky factor, or `None` if the matrix is not
/// positive-definite.
fn cholesky(matrix: &Matrix) -> Option<Matrix> {
    let n = matrix.nrows();
    let mut lower = Matrix::zeros((n, n));

    for i in 0..n {
        for j in 0..=i {
            let mut sum = matrix[[i, j]];
            for k in 0..j {
                sum -= lower[[i, k]] * lower[[j, k]];
            }

            if i == j {
                if sum <= 0.0 {
                    return None;
                }
                lower[[i, j]] = sum.sqrt();
            } else {
                lower[[i, j]] = sum / lower[[j, j]];
            }
        }
    }

    Some(lower)
}

fn factorize_all(covariances: &[Matrix], reg_covar: f64) -> Result<Vec<Matrix>> {
    covariances
        .iter()
        .enumerate()
        .map(|(component, cov)| factorize(cov, reg_covar, component))
        .collect()
}

fn factorize(cov: &Matrix, reg_covar: f64, component: usize) -> Result<Matrix> {
    if let Some(lower) = cholesky(cov) {
        return Ok(lower);
    }

    // Escalate the diagonal jitter for a near-singular update.
    let mut jitter = reg_covar.max(f64::EPSILON);
    for _ in 0..4 {
        jitter *= 10.0;
        let mut padded = cov.clone();
        for d in 0..padded.nrows() {
            padded[[d, d]] += jitter;
        }
        if let Some(lower) = cholesky(&padded) {
            return Ok(lower);
        }
    }

    Err(Error::SingularCovariance { component })
}

/// Log-density of `x` under a Gaussian given the Cholesky factor of its
/// covariance. The triangular solve gives the Mahalanobis term and the
/// factor diagonal gives the log-determinant, so the covariance is never
/// explicitly inverted.
fn log_gaussian(x: &ndarray::ArrayView1<f64>, mean: &ndarray::ArrayView1<f64>, chol: &Matrix) -> f64 {
    let d = x.len();

    let mut z = vec![0.0; d];
    for i in 0..d {
        let mut sum = x[i] - mean[i];
        for j in 0..i {
            sum -= chol[[i, j]] * z[j];
        }
        z[i] = sum / chol[[i, i]];
    }

    let mahalanobis: f64 = z.iter().map(|v| v * v).sum();
    let log_det: f64 = (0..d).map(|i| chol[[i, i]].ln()).sum::<f64>() * 2.0;

    -0.5 * (d as f64 * (2.0 * std::f64::consts::PI).ln() + log_det + mahalanobis)
}

/// E-step: per-sample responsibilities and the total data log-likelihood.
fn e_step(x: &Matrix, weights: &Vector, means: &Matrix, factors: &[Matrix]) -> (f64, Matrix) {
    let n_samples = x.nrows();
    let n_components = weights.len();
    let mut resp = Matrix::zeros((n_samples, n_components));
    let mut total = 0.0;

    let mut log_prob = vec![0.0; n_components];
    for i in 0..n_samples {
        let row = x.row(i);
        for k in 0..n_components {
            log_prob[k] = weights[k].ln() + log_gaussian(&row, &means.row(k), &factors[k]);
        }

        // log-sum-exp keeps normalization finite for far-out samples
        let max = log_prob.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let sum_exp: f64 = log_prob.iter().map(|lp| (lp - max).exp()).sum();
        let log_norm = max + sum_exp.ln();

        for k in 0..n_components {
            resp[[i, k]] = (log_prob[k] - log_norm).exp();
        }
        total += log_norm;
    }

    (total, resp)
}

/// M-step: weight, mean and covariance of every component from the
/// responsibility-weighted sums, with `reg_covar` added to each covariance
/// diagonal.
fn m_step(x: &Matrix, resp: &Matrix, reg_covar: f64) -> Result<(Vector, Matrix, Vec<Matrix>)> {
    let n_samples = x.nrows();
    let n_features = x.ncols();
    let n_components = resp.ncols();

    let mut weights = Vector::zeros(n_components);
    let mut means = Matrix::zeros((n_components, n_features));
    let mut covariances = Vec::with_capacity(n_components);

    for k in 0..n_components {
        let mass: f64 = resp.column(k).sum();
        if mass < 10.0 * f64::EPSILON {
            return Err(Error::EmptyComponent { component: k });
        }

        weights[k] = mass / n_samples as f64;

        let mut mean = Vector::zeros(n_features);
        for i in 0..n_samples {
            mean.scaled_add(resp[[i, k]], &x.row(i));
        }
        mean /= mass;

        let mut cov = Matrix::zeros((n_features, n_features));
        for i in 0..n_samples {
            let r = resp[[i, k]];
            for a in 0..n_features {
                let da = x[[i, a]] - mean[a];
                for b in 0..=a {
                    cov[[a, b]] += r * da * (x[[i, b]] - mean[b]);
                }
            }
        }
        for a in 0..n_features {
            for b in 0..a {
                cov[[a, b]] /= mass;
                cov[[b, a]] = cov[[a, b]];
            }
            cov[[a, a]] = cov[[a, a]] / mass + reg_covar;
        }

        means.row_mut(k).assign(&mean);
        covariances.push(cov);
    }

    Ok((weights, means, covariances))
}
