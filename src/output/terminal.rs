// Colored terminal output for scored guesses and round history.
//
// Colors follow the proximity bands: hot is red, cold is blue.

use colored::{ColoredString, Colorize};

use super::format_percent;
use crate::game::{GuessOutcome, Round};
use crate::similarity::models::SimilarityResult;
use crate::similarity::proximity::Proximity;

/// Display one scored guess with its per-word breakdown.
pub fn display_similarity(result: &SimilarityResult) {
    if result.word_similarities.is_empty() {
        println!("Nothing to score. Provide at least one target word and one guess word.");
        return;
    }

    let proximity = Proximity::from_similarity(result.similarity);
    println!(
        "\n{}  {}  rank {}",
        colorize(&format_percent(result.similarity), proximity).bold(),
        colorize(proximity.as_str(), proximity),
        result.rank,
    );

    if result.is_fallback() {
        println!(
            "  {}",
            "Semantic scoring unavailable; these are fallback estimates.".dimmed()
        );
    }

    println!(
        "\n  {:<20} {:<20} {:>9}",
        "Guess".dimmed(),
        "Closest target".dimmed(),
        "Score".dimmed(),
    );
    println!("  {}", "-".repeat(60).dimmed());

    for word in &result.word_similarities {
        let p = Proximity::from_similarity(word.similarity);
        println!(
            "  {:<20} {:<20} {:>9}  {}",
            word.word,
            word.target_word,
            colorize(&format_percent(word.similarity), p),
            colorize(p.as_str(), p),
        );
    }
    println!();
}

/// Display the guesses made so far in a round, best first.
pub fn display_round(round: &Round) {
    if round.guesses().is_empty() {
        return;
    }

    println!("{}", format!("=== Guesses ({}) ===", round.guess_count()).bold());
    for (i, guess) in round.guesses().iter().enumerate() {
        let p = Proximity::from_similarity(guess.result.similarity);
        println!(
            "  {:>3}. {:<30} {:>9}  rank {:>4}",
            i + 1,
            guess.text,
            colorize(&format_percent(guess.result.similarity), p),
            guess.result.rank,
        );
    }
    println!();
}

/// One-line reaction to a guess outcome.
pub fn display_outcome(outcome: GuessOutcome) {
    match outcome {
        GuessOutcome::Solved => println!("{}", "Solved!".green().bold()),
        GuessOutcome::Close => println!("{}", "So close...".yellow()),
        GuessOutcome::Miss => {}
    }
}

fn colorize(text: &str, proximity: Proximity) -> ColoredString {
    match proximity {
        Proximity::Hot => text.red(),
        Proximity::Warm => text.bright_red(),
        Proximity::Tepid => text.yellow(),
        Proximity::Cool => text.blue(),
        Proximity::Cold => text.bright_blue().dimmed(),
    }
}
