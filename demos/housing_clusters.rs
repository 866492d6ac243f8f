use housemix::{ClusterPipeline, FEATURE_COLUMNS, HousingDataset};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== Housing Cluster Pipeline ===\n");

    let dataset = synthetic_listings(4, 40, 9);
    println!(
        "Dataset: {} listings, {} features ({})",
        dataset.n_samples(),
        dataset.n_features(),
        FEATURE_COLUMNS.join(", ")
    );

    let pipeline = ClusterPipeline::new(4).random_state(0);
    let outcome = pipeline.run(&dataset)?;

    println!(
        "Fit converged: {} ({} iterations)\n",
        outcome.converged,
        outcome.mixture.n_iter.unwrap_or(0)
    );

    println!("=== Cluster Summary ===");
    for (cluster, descriptor) in &outcome.descriptors {
        let count = outcome.labels.iter().filter(|&&l| l == *cluster).count();
        println!("Cluster {}: {} listings -> {}", cluster, count, descriptor.label());
    }

    println!("\n=== Sample of Labeled Rows ===");
    for i in (0..dataset.n_samples()).step_by(dataset.n_samples() / 8) {
        println!(
            "row {:>3}: sf {:>6.0} bd {:>3.1} ba {:>3.1} price {:>8.0} -> cluster {} [{}]",
            i,
            dataset.features[[i, 0]],
            dataset.features[[i, 1]],
            dataset.features[[i, 2]],
            dataset.features[[i, 3]],
            outcome.labels[i],
            outcome.row_labels[i]
        );
    }

    let weights = outcome.mixture.weights.as_ref().unwrap();
    println!("\nMixing weights: {:?}", weights.to_vec());
    println!("Weight sum: {:.6}", weights.sum());

    Ok(())
}

/// Synthetic listings drawn from `groups` price/size tiers.
fn synthetic_listings(groups: usize, per_group: usize, seed: u64) -> HousingDataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = Vec::new();

    for g in 0..groups {
        let tier = g as f64;
        for _ in 0..per_group {
            rows.push(vec![
                900.0 + tier * 700.0 + rng.gen_range(-100.0..100.0),
                2.0 + tier + rng.gen_range(-0.4..0.4),
                1.0 + tier * 0.8 + rng.gen_range(-0.3..0.3),
                150_000.0 + tier * 180_000.0 + rng.gen_range(-20_000.0..20_000.0),
            ]);
        }
    }

    HousingDataset::from_rows(&rows).expect("synthetic rows are well formed")
}
