//! Near-duplicate coalescing of company names with a few metrics and pass counts.

use strclump::cluster::{Clusterer, Clustering};
use strclump::metrics::{CaseInsensitive, Jaccard, Metric};

fn main() {
    env_logger::init();

    let names = [
        "Acme Corp",
        "ACME Corp.",
        "Acme Corporation",
        "Globex",
        "Globex Inc",
        "Initech",
        "Inittech",
        "Umbrella",
        "Umbrela Corp",
        "Hooli",
    ];

    // --- Default: Jaro-Winkler, threshold 0.9, one pass ---
    let groups = Clusterer::default().cluster(names);
    println!("=== Jaro-Winkler (threshold 0.9) ===");
    for (i, group) in groups.iter().enumerate() {
        println!("  group {:2} => {:?}", i, group);
    }

    // --- Case-insensitive bigram Jaccard, two passes ---
    let jaccard = Clusterer::new(CaseInsensitive(Jaccard::new()))
        .with_threshold(0.5)
        .with_iterations(2);
    let labels = jaccard.cluster_labels(&names);
    println!("\n=== Jaccard, case-insensitive (threshold 0.5, 2 passes) ===");
    for (name, label) in names.iter().zip(&labels) {
        println!("  {:<18} => group {}", name, label);
    }

    // --- Metric picked by name ---
    for name in ["levenshtein", "smith-waterman-gotoh"] {
        let metric = match name.parse::<Metric>() {
            Ok(metric) => metric.with_case_sensitive(false),
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };
        let groups = Clusterer::new(metric).with_threshold(0.8).cluster(names);
        println!("\n=== {} (threshold 0.8) => {} groups ===", name, groups.len());
        for group in groups {
            println!("  {:?}", group);
        }
    }
}
