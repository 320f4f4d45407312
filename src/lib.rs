// Picktle: semantic word-similarity scoring for a word-guessing game
//
// This is the library root. Each module corresponds to a subsystem of the
// scoring service.

pub mod config;
pub mod embeddings;
pub mod game;
pub mod output;
pub mod similarity;

#[cfg(feature = "web")]
pub mod web;
