//! External model-selection sweep: re-run the pipeline over a range of
//! component counts and score each clustering with the silhouette metric.

use housemix::metrics::silhouette_score;
use housemix::preprocessing::StandardScaler;
use housemix::{ClusterPipeline, HousingDataset};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== Component Count Selection ===\n");

    let dataset = synthetic_listings(5, 30, 17);
    println!("Dataset: {} listings\n", dataset.n_samples());

    // Silhouette is evaluated in the same standardized space the mixture
    // was fitted in.
    let mut scaler = StandardScaler::new();
    let standardized = scaler.fit_transform(&dataset.features)?;

    let mut best: Option<(usize, f64)> = None;
    for n_components in (2..=12).step_by(2) {
        match evaluate(&dataset, &standardized, n_components) {
            Ok((score, summary)) => {
                println!("k={:>2}: {}", n_components, summary);
                if best.map_or(true, |(_, s)| score > s) {
                    best = Some((n_components, score));
                }
            }
            Err(e) => println!("k={:>2}: failed: {}", n_components, e),
        }
    }

    if let Some((k, score)) = best {
        println!("\nBest component count: k={} (silhouette {:.4})", k, score);
    }

    Ok(())
}

fn evaluate(
    dataset: &HousingDataset,
    standardized: &housemix::Matrix,
    n_components: usize,
) -> housemix::Result<(f64, String)> {
    let pipeline = ClusterPipeline::new(n_components).random_state(0);
    let outcome = pipeline.run(dataset)?;
    let score = silhouette_score(standardized, &outcome.labels)?;

    Ok((
        score,
        format!(
            "silhouette {:.4}, converged {}, {} populated clusters",
            score,
            outcome.converged,
            outcome.descriptors.len()
        ),
    ))
}

fn synthetic_listings(groups: usize, per_group: usize, seed: u64) -> HousingDataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = Vec::new();

    for g in 0..groups {
        let tier = g as f64;
        for _ in 0..per_group {
            rows.push(vec![
                900.0 + tier * 650.0 + rng.gen_range(-90.0..90.0),
                2.0 + tier * 0.8 + rng.gen_range(-0.4..0.4),
                1.0 + tier * 0.7 + rng.gen_range(-0.3..0.3),
                140_000.0 + tier * 160_000.0 + rng.gen_range(-18_000.0..18_000.0),
            ]);
        }
    }

    HousingDataset::from_rows(&rows).expect("synthetic rows are well formed")
}
