use data_loader::{Catalog, LoadOptions};
use std::path::Path;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    let data_dir = Path::new("data");

    println!("Loading mood catalog...\n");

    let start = Instant::now();
    let catalog = Catalog::load_from_dir(data_dir, &LoadOptions::default())?;
    let elapsed = start.elapsed();

    let cells = catalog.similarity.dim() * catalog.similarity.dim();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", catalog.movies.len());
    println!("Similarity matrix: {0}x{0}", catalog.similarity.dim());
    println!("Aligned: {}", catalog.is_aligned());
    println!("\nPerformance: {:.0} matrix cells/second",
             cells as f64 / elapsed.as_secs_f64());
    Ok(())
}
