use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use data_loader::{Genre, Movie, MovieCatalog, RatingStore, UserId, load_dataset};
use model::{CrossValidationReport, SvdModel, SvdParams, cross_validate};
use recommender::{
    ColdStartPolicy, RatingCollector, SYNTHETIC_USER_ID, collect_ratings, merge_cold_start,
    recommend_by_genre, sample_candidates, top_n,
};
use std::collections::BTreeSet;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Movie recommendation engine over MovieLens-style rating data
#[derive(Parser)]
#[command(name = "movie-recs")]
#[command(about = "Movie recommendations from a latent factor model", long_about = None)]
struct Cli {
    /// Path to the dataset directory (ratings.dat + movies.dat)
    #[arg(short, long, default_value = "data/ml-1m")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Training hyperparameters shared by every command that fits a model
#[derive(Args)]
struct TrainingOpts {
    /// Latent factor dimensionality
    #[arg(long, default_value_t = 20)]
    factors: usize,

    /// Number of SGD epochs
    #[arg(long, default_value_t = 20)]
    epochs: usize,

    /// SGD step size
    #[arg(long, default_value_t = 0.005)]
    learning_rate: f32,

    /// L2 regularization strength
    #[arg(long, default_value_t = 0.02)]
    regularization: f32,

    /// Seed for factor initialization, fold shuffling, and sampling
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

impl TrainingOpts {
    fn to_params(&self) -> SvdParams {
        SvdParams::default()
            .with_factors(self.factors)
            .with_epochs(self.epochs)
            .with_learning_rate(self.learning_rate)
            .with_regularization(self.regularization)
            .with_seed(self.seed)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend by favorite genres (community average ratings)
    Genres {
        /// Comma-separated genre names; prompts interactively if omitted
        #[arg(long)]
        genres: Option<String>,

        /// Number of recommendations to return
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Rate a few movies, then get personalized recommendations (cold start)
    Rate {
        /// How many movies to ask about
        #[arg(long, default_value_t = 10)]
        count: usize,

        /// Number of recommendations to return
        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Cross-validation folds for the diagnostic report
        #[arg(long, default_value_t = 3)]
        folds: usize,

        /// Discard ratings from previous sessions instead of accumulating
        #[arg(long)]
        reset: bool,

        #[command(flatten)]
        opts: TrainingOpts,
    },

    /// Get model recommendations for an existing user
    Recommend {
        /// User ID to recommend for
        #[arg(long)]
        user_id: UserId,

        /// Number of recommendations to return
        #[arg(long, default_value_t = 10)]
        limit: usize,

        #[command(flatten)]
        opts: TrainingOpts,
    },

    /// Cross-validate the model on the dataset and report RMSE/MAE
    Evaluate {
        /// Number of folds
        #[arg(long, default_value_t = 3)]
        folds: usize,

        #[command(flatten)]
        opts: TrainingOpts,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    println!("Loading dataset from {}...", cli.data_dir.display());
    let start = Instant::now();
    let (store, catalog) =
        load_dataset(&cli.data_dir).context("Failed to load the rating dataset")?;
    println!(
        "{} Loaded {} ratings over {} movies in {:?}",
        "✓".green(),
        store.len(),
        catalog.len(),
        start.elapsed()
    );

    match cli.command {
        Commands::Genres { genres, limit } => handle_genres(&store, &catalog, genres, limit),
        Commands::Rate {
            count,
            limit,
            folds,
            reset,
            opts,
        } => handle_rate(store, &catalog, count, limit, folds, reset, &opts.to_params()),
        Commands::Recommend {
            user_id,
            limit,
            opts,
        } => handle_recommend(&store, &catalog, user_id, limit, &opts.to_params()),
        Commands::Evaluate { folds, opts } => handle_evaluate(&store, folds, &opts.to_params()),
    }
}

/// Handle the 'genres' command
fn handle_genres(
    store: &RatingStore,
    catalog: &MovieCatalog,
    genres: Option<String>,
    limit: usize,
) -> Result<()> {
    let favorites = match genres {
        Some(list) => parse_genre_list(&list)?,
        None => ask_genres()?,
    };

    let picks = recommend_by_genre(store, catalog, &favorites, limit)?;

    let names: Vec<String> = favorites.iter().map(|g| g.to_string()).collect();
    println!(
        "\n{}",
        format!("Top {} for genres: {}", picks.len(), names.join(", "))
            .bold()
            .blue()
    );
    for (rank, pick) in picks.iter().enumerate() {
        println!(
            "{:2}. {} {} avg {:.2}",
            (rank + 1).to_string().green(),
            pick.title,
            format!("(#{})", pick.movie_id).dimmed(),
            pick.avg_rating
        );
    }
    Ok(())
}

/// Handle the 'rate' command: the interactive cold-start session
fn handle_rate(
    store: RatingStore,
    catalog: &MovieCatalog,
    count: usize,
    limit: usize,
    folds: usize,
    reset: bool,
    params: &SvdParams,
) -> Result<()> {
    let candidates = sample_candidates(catalog, &store, count, params.seed);
    if candidates.is_empty() {
        bail!("No unrated movies left to sample");
    }

    println!("\nPlease rate the following movies (1-5, 's' to skip):");
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);
    let mut collector = StdinCollector::new();
    let new_ratings = collect_ratings(&mut collector, catalog, &candidates, timestamp);
    if new_ratings.is_empty() {
        bail!("No ratings were entered, nothing to train on");
    }

    let policy = if reset {
        ColdStartPolicy::Reset
    } else {
        ColdStartPolicy::Accumulate
    };
    let store = merge_cold_start(store, new_ratings, policy)?;

    let report = cross_validate(store.observations(), params, folds)?;
    print_cv_report(&report);

    println!("Training the final model on the full dataset...");
    let start = Instant::now();
    let model = SvdModel::fit(store.observations(), params)?;
    println!("{} Trained in {:?}", "✓".green(), start.elapsed());

    let recs = top_n(&model, catalog, &store, SYNTHETIC_USER_ID, limit, true);
    print_recommendations("Top picks for you", &recs);
    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    store: &RatingStore,
    catalog: &MovieCatalog,
    user_id: UserId,
    limit: usize,
    params: &SvdParams,
) -> Result<()> {
    if store.ratings_by_user(user_id).is_empty() {
        println!(
            "{}",
            format!("Note: user {user_id} has no rating history, predictions are bias-only")
                .yellow()
        );
    }

    println!("Training model...");
    let start = Instant::now();
    let model = SvdModel::fit(store.observations(), params)?;
    println!("{} Trained in {:?}", "✓".green(), start.elapsed());

    let recs = top_n(&model, catalog, store, user_id, limit, true);
    print_recommendations(&format!("Top picks for user {user_id}"), &recs);
    Ok(())
}

/// Handle the 'evaluate' command
fn handle_evaluate(store: &RatingStore, folds: usize, params: &SvdParams) -> Result<()> {
    let start = Instant::now();
    let report = cross_validate(store.observations(), params, folds)?;
    print_cv_report(&report);
    println!("Evaluated in {:?}", start.elapsed());
    Ok(())
}

/// Parse a comma-separated genre list like "Comedy,Sci-Fi"
fn parse_genre_list(list: &str) -> Result<BTreeSet<Genre>> {
    let mut favorites = BTreeSet::new();
    for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match Genre::from_name(name) {
            Some(genre) => {
                favorites.insert(genre);
            }
            None => {
                let valid: Vec<&str> = Genre::ALL.iter().map(|g| g.name()).collect();
                bail!("Unknown genre '{}'. Valid genres: {}", name, valid.join(", "));
            }
        }
    }
    Ok(favorites)
}

/// Interactive genre selection: numbered menu, comma-separated picks.
/// Out-of-range or non-numeric entries are silently ignored.
fn ask_genres() -> Result<BTreeSet<Genre>> {
    println!("Select your favorite genres (comma-separated numbers):");
    for (i, genre) in Genre::ALL.iter().enumerate() {
        println!("{:2}. {}", i + 1, genre);
    }
    print!("Numbers: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;

    let favorites = line
        .split(',')
        .filter_map(|s| s.trim().parse::<usize>().ok())
        .filter_map(|i| Genre::ALL.get(i.wrapping_sub(1)).copied())
        .collect();
    Ok(favorites)
}

/// Prompts on stdin, re-prompting until the rating is valid or skipped.
struct StdinCollector {
    stdin: std::io::Stdin,
}

impl StdinCollector {
    fn new() -> Self {
        Self {
            stdin: std::io::stdin(),
        }
    }
}

impl RatingCollector for StdinCollector {
    fn collect(&mut self, movie: &Movie) -> Option<f32> {
        loop {
            print!(" » '{}': ", movie.title);
            if std::io::stdout().flush().is_err() {
                return None;
            }

            let mut line = String::new();
            // EOF or read failure ends the session gracefully
            match self.stdin.lock().read_line(&mut line) {
                Ok(0) | Err(_) => return None,
                Ok(_) => {}
            }

            let input = line.trim();
            if input.eq_ignore_ascii_case("s") {
                return None;
            }
            if let Ok(value) = input.parse::<f32>() {
                if (1.0..=5.0).contains(&value) {
                    return Some(value);
                }
            }
            println!("   Enter a numeric value between 1 and 5.");
        }
    }
}

fn print_cv_report(report: &CrossValidationReport) {
    println!("\n{}", "Cross-validation".bold().blue());
    for (i, fold) in report.folds.iter().enumerate() {
        println!(
            "  fold {}: RMSE {:.4}  MAE {:.4}",
            i + 1,
            fold.rmse,
            fold.mae
        );
    }
    println!(
        "  {} RMSE {:.4}  MAE {:.4}",
        "mean".bold(),
        report.mean_rmse(),
        report.mean_mae()
    );
}

fn print_recommendations(header: &str, recs: &[recommender::RankedMovie]) {
    println!("\n{}", header.bold().blue());
    if recs.is_empty() {
        println!("  (no candidates left to recommend)");
        return;
    }
    for (rank, rec) in recs.iter().enumerate() {
        println!(
            "{:2}. {} {} predicted {:.2}",
            (rank + 1).to_string().green(),
            rec.title,
            format!("(#{})", rec.movie_id).dimmed(),
            rec.score
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_genre_list() {
        let favorites = parse_genre_list("Comedy, Sci-Fi").unwrap();
        assert_eq!(favorites, BTreeSet::from([Genre::Comedy, Genre::SciFi]));
    }

    #[test]
    fn test_parse_genre_list_rejects_unknown() {
        assert!(parse_genre_list("Comedy,Mockumentary").is_err());
    }

    #[test]
    fn test_training_opts_to_params() {
        let opts = TrainingOpts {
            factors: 50,
            epochs: 30,
            learning_rate: 0.01,
            regularization: 0.1,
            seed: 7,
        };
        let params = opts.to_params();
        assert_eq!(params.factors, 50);
        assert_eq!(params.epochs, 30);
        assert_eq!(params.seed, 7);
    }
}
