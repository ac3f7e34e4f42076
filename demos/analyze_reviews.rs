use review_pipelines::analysis::AnalysisPipelineBuilder;
use review_pipelines::dataset;
use review_pipelines::embedding::EmbeddingTable;
use review_pipelines::error::Result;

fn main() -> Result<()> {
    let vectors_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "models/vectors.txt".to_string());
    let reviews_path = std::env::args()
        .nth(2)
        .unwrap_or_else(|| "reviews.csv".to_string());

    println!("Building pipeline...");

    let pipeline = AnalysisPipelineBuilder::new()
        .embeddings(EmbeddingTable::from_path(&vectors_path)?)
        .progress(|checkpoint| println!("  {checkpoint:?}"))
        .build()?;

    let reviews = dataset::read_reviews_from_path(&reviews_path)?;
    println!("Analyzing {} reviews...", reviews.len());

    let output = pipeline.run(&reviews)?;
    let summary = &output.result.summary;

    println!("\n=== Aspect Sentiment ===");
    for (name, counts) in &output.result.features {
        println!(
            "{name}: +{} -{} (related: {})",
            counts.positives,
            counts.negatives,
            counts.related.join(", ")
        );
    }

    println!(
        "\n{} sentences | {} positive | {} negative | {} features",
        summary.total_sentences,
        summary.positive_count,
        summary.negative_count,
        summary.features_found
    );
    if !output.diagnostics.skipped.is_empty() {
        println!("Skipped {} review(s):", output.diagnostics.skipped.len());
        for skip in &output.diagnostics.skipped {
            println!("  #{}: {}", skip.index, skip.reason);
        }
    }
    println!(
        "Completed in {:.2}ms",
        output.stats.total_time.as_secs_f64() * 1000.0
    );

    Ok(())
}
