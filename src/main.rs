use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use picktle::config::Config;
use picktle::embeddings::cache::EmbeddingCache;
use picktle::game::Round;
use picktle::output::terminal;
use picktle::similarity::scorer::SimilarityScorer;
use picktle::similarity::split_guess;

/// Picktle: guess the words behind a picture, scored by meaning.
///
/// Guesses are compared to the target words with text embeddings and
/// reported as a 0-100 similarity, a rank, and a hot/cold label.
#[derive(Parser)]
#[command(name = "picktle", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single guess against target words
    Score {
        /// A target word (repeat for each word, e.g. --target brain --target freeze)
        #[arg(long = "target", required = true)]
        targets: Vec<String>,

        /// The guess, as one or more words
        #[arg(required = true, num_args = 1..)]
        guess: Vec<String>,
    },

    /// Play an interactive round, reading guesses from stdin
    Play {
        /// A target word (repeat for each word)
        #[arg(long = "target", required = true)]
        targets: Vec<String>,
    },

    /// Run the HTTP API
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (default: PICKTLE_PORT or 3000)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (default: PICKTLE_BIND or 127.0.0.1)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Show whether semantic scoring is configured
    Check {
        /// Exit with an error if the embedding provider is unavailable
        #[arg(long)]
        strict: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("picktle=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Score { targets, guess } => {
            let config = Config::load()?;
            let scorer = SimilarityScorer::from_config(&config, EmbeddingCache::new())?;

            let guess_words = split_guess(&guess.join(" "));
            let result = scorer
                .calculate_word_similarity(&targets, &guess_words)
                .await?;

            terminal::display_similarity(&result);
        }

        Commands::Play { targets } => {
            let config = Config::load()?;
            let scorer = SimilarityScorer::from_config(&config, EmbeddingCache::new())?;
            let mut round = Round::new(&targets)?;

            if !scorer.has_provider_access() {
                println!(
                    "{}",
                    "No embedding provider configured; guesses get fallback scores.".dimmed()
                );
            }
            println!(
                "Guess the {} hidden word(s). Empty line or Ctrl-D to give up.",
                round.target_words().len()
            );

            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                if line.trim().is_empty() {
                    break;
                }

                let guess = match round.submit(&scorer, &line).await {
                    Ok(guess) => guess,
                    Err(e) => {
                        println!("{}", e.to_string().red());
                        continue;
                    }
                };
                terminal::display_similarity(&guess.result);
                terminal::display_outcome(guess.outcome);

                if round.is_solved() {
                    break;
                }
            }

            terminal::display_round(&round);
            if !round.is_solved() {
                println!("The words were: {}", round.target_words().join(" ").bold());
            }
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            let scorer = SimilarityScorer::from_config(&config, EmbeddingCache::new())?;
            let port = port.unwrap_or(config.port);
            let bind = bind.unwrap_or_else(|| config.bind.clone());

            tracing::info!(
                semantic = scorer.has_provider_access(),
                model = %config.embedding_model,
                "Starting Picktle API"
            );

            let state = picktle::web::AppState::new(config, scorer);
            picktle::web::run_server(state, port, &bind).await?;
        }

        Commands::Check { strict } => {
            let config = Config::load()?;
            if strict {
                config.require_provider()?;
            }

            if config.has_provider_access() {
                println!("Semantic scoring: {}", "enabled".green().bold());
                println!("  Model: {}", config.embedding_model);
                println!("  Endpoint: {}", config.embedding_url);
                println!("  Dimensions: {}", config.embedding_dim);
                println!("  Timeout: {}s", config.embedding_timeout.as_secs());
            } else {
                println!("Semantic scoring: {}", "disabled".yellow().bold());
                println!("  Guesses are scored with the fallback heuristic.");
                if !config.provider_access {
                    println!("  PICKTLE_PROVIDER_ACCESS is off.");
                } else {
                    println!("  Set OPENAI_API_KEY in your .env file to enable it.");
                }
            }
        }
    }

    Ok(())
}
