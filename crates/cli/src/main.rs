use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{CatalogHandle, LoadOptions, Mood, RowIndex};
use server::{
    MovieRecommendation, RecommendationService, RecommendationSource, DEFAULT_COUNT,
    DEFAULT_DIVERSITY,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Results shown by `search`
const SEARCH_LIMIT: usize = 20;

/// mood-recs - Mood-based movie recommendations
#[derive(Parser)]
#[command(name = "mood-recs")]
#[command(about = "Movie recommendations by mood, ranked for diversity", long_about = None)]
struct Cli {
    /// Directory holding movies.jsonl and similarity.csv
    #[arg(short, long, global = true, env = "MOOD_RECS_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Fail when the catalog and similarity matrix sizes differ
    #[arg(long, global = true)]
    strict_alignment: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the supported moods
    Moods,

    /// Get movie recommendations for a mood
    Recommend {
        /// Mood to recommend for (unknown moods get the top-rated list)
        #[arg(long)]
        mood: String,

        /// Number of recommendations to return
        #[arg(long, default_value_t = DEFAULT_COUNT)]
        count: usize,

        /// Relevance/diversity trade-off in [0, 1]
        #[arg(long, default_value_t = DEFAULT_DIVERSITY)]
        diversity: f32,

        /// Show scores, source and explanation for each recommendation
        #[arg(long)]
        explain: bool,
    },

    /// Show the movies most similar to a catalog row
    Similar {
        /// Catalog row of the anchor movie
        #[arg(long)]
        id: RowIndex,

        /// Number of similar movies to return
        #[arg(long, default_value_t = DEFAULT_COUNT)]
        count: usize,
    },

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Commands::Moods = cli.command {
        handle_moods();
        return Ok(());
    }

    let options = LoadOptions {
        strict_alignment: cli.strict_alignment,
    };
    let service = load_service(&cli.data_dir, options)?;

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Moods => handle_moods(),
        Commands::Recommend {
            mood,
            count,
            diversity,
            explain,
        } => handle_recommend(&service, &mood, count, diversity, explain)?,
        Commands::Similar { id, count } => handle_similar(&service, id, count)?,
        Commands::Search { title } => handle_search(&service, &title)?,
        Commands::Benchmark { requests } => handle_benchmark(service, requests).await?,
    }

    Ok(())
}

/// Load the catalog up front so command timings exclude it
fn load_service(data_dir: &Path, options: LoadOptions) -> Result<RecommendationService> {
    println!("Loading catalog from {}...", data_dir.display());
    let start = Instant::now();

    let service = RecommendationService::new(Arc::new(CatalogHandle::new(data_dir, options)));
    let catalog = service.catalog().context("Failed to load catalog")?;

    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        catalog.movies.len(),
        start.elapsed()
    );
    Ok(service)
}

/// Handle the 'moods' command
fn handle_moods() {
    println!("{}", "Available moods:".bold().blue());
    for mood in RecommendationService::moods() {
        println!("  {} {}", "•".green(), mood);
    }
}

/// Handle the 'recommend' command
fn handle_recommend(
    service: &RecommendationService,
    mood: &str,
    count: usize,
    diversity: f32,
    explain: bool,
) -> Result<()> {
    if Mood::parse(mood).is_none() {
        println!(
            "{} Unknown mood '{}', showing top-rated movies",
            "!".yellow(),
            mood
        );
    }

    let recommendations = service.recommend(mood, count, diversity)?;
    print_recommendations(&format!("Recommendations for '{}':", mood), &recommendations, explain);
    Ok(())
}

/// Handle the 'similar' command
fn handle_similar(service: &RecommendationService, id: RowIndex, count: usize) -> Result<()> {
    let catalog = service.catalog()?;
    let anchor = catalog
        .movies
        .get(id)
        .map(|movie| movie.title.clone())
        .unwrap_or_default();

    let recommendations = service.similar(id, count)?;
    print_recommendations(&format!("Movies similar to {}:", anchor), &recommendations, true);
    Ok(())
}

/// Handle the 'search' command
fn handle_search(service: &RecommendationService, title: &str) -> Result<()> {
    let results = service.search(title, SEARCH_LIMIT)?;

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if results.is_empty() {
        println!("  (no matches)");
    }
    for movie in &results {
        println!(
            "{}: {} [{}] rating {:.1} ({} votes)",
            movie.id,
            movie.title,
            movie.genres.join(", "),
            movie.rating,
            movie.vote_count
        );
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(service: RecommendationService, requests: usize) -> Result<()> {
    // Random moods, with the occasional unknown one to exercise the fallback
    let moods: Vec<String> = (0..requests)
        .map(|_| {
            let pick = rand::random::<u32>() as usize % (Mood::COUNT + 1);
            Mood::ALL
                .get(pick)
                .map(|mood| mood.as_str().to_string())
                .unwrap_or_else(|| "unknown".to_string())
        })
        .collect();

    let wall_clock = Instant::now();
    let mut handles = Vec::with_capacity(requests);
    for mood in moods {
        let service = service.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            let start = Instant::now();
            service.recommend(&mood, DEFAULT_COUNT, DEFAULT_DIVERSITY)?;
            Ok::<_, anyhow::Error>(start.elapsed())
        }));
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = Vec::with_capacity(requests);
    for handle in handles {
        timings.push(handle.await??);
    }
    let total_time = wall_clock.elapsed();
    debug!("Collected {} timings", timings.len());

    if timings.is_empty() {
        println!("No requests made");
        return Ok(());
    }

    timings.sort();
    let avg_latency = timings.iter().sum::<Duration>() / timings.len() as u32;
    let throughput = timings.len() as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {}", timings.len());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(&timings, 0.50));
    println!("P95 latency: {:?}", percentile(&timings, 0.95));
    println!("P99 latency: {:?}", percentile(&timings, 0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Nearest-rank percentile over sorted, non-empty timings
fn percentile(sorted: &[Duration], p: f64) -> Duration {
    let idx = ((sorted.len() as f64 * p) as usize).min(sorted.len() - 1);
    sorted[idx]
}

/// Helper function to format and print recommendations
fn print_recommendations(header: &str, recommendations: &[MovieRecommendation], explain: bool) {
    println!("{}", header.bold().blue());
    if recommendations.is_empty() {
        println!("  (none)");
    }

    for (i, rec) in recommendations.iter().enumerate() {
        let movie = &rec.movie;
        let year = movie.release_date.get(..4).unwrap_or("????");
        let score = rec
            .score
            .map(|s| format!(" - Score: {:.2}", s))
            .unwrap_or_default();
        println!(
            "{}. {} ({}) [{}]{}",
            (i + 1).to_string().green(),
            movie.title,
            year,
            movie.genres.join(", "),
            score
        );

        if explain {
            let source = match rec.source {
                RecommendationSource::MoodDiversified => "mood".cyan(),
                RecommendationSource::TopRated => "top-rated".yellow(),
                RecommendationSource::Similar => "similar".magenta(),
            };
            println!("   [{}] row {}: {}", source, rec.row, rec.explanation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile() {
        let timings: Vec<Duration> = (1..=100).map(Duration::from_millis).collect();
        assert_eq!(percentile(&timings, 0.50), Duration::from_millis(51));
        assert_eq!(percentile(&timings, 0.99), Duration::from_millis(100));
        assert_eq!(percentile(&timings[..1], 0.99), Duration::from_millis(1));
    }

    #[test]
    fn test_cli_parses_recommend() {
        let cli = Cli::try_parse_from(["mood-recs", "recommend", "--mood", "happy", "--explain"]).unwrap();
        match cli.command {
            Commands::Recommend {
                mood,
                count,
                diversity,
                explain,
            } => {
                assert_eq!(mood, "happy");
                assert_eq!(count, DEFAULT_COUNT);
                assert_eq!(diversity, DEFAULT_DIVERSITY);
                assert!(explain);
            }
            _ => panic!("expected recommend"),
        }
    }
}
