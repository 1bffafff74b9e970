// Configuration module for reading Snake.toml
//
// Engine-level tunables that are not part of the per-request genome: the
// bounds on the reachability analysis and the tie-break policy for
// equal-cost candidates.

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub search: SearchConfig,
    pub selection: SelectionConfig,
}

/// Bounds for the per-decision reachability analysis
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// BFS depth for the danger gradient built around enemy heads.
    pub head_danger_depth: u32,
    /// A move's reachable region is only explored up to
    /// `length * trap_size_multiplier` cells.
    pub trap_size_multiplier: usize,
}

/// How equal-cost candidates are resolved
#[derive(Debug, Deserialize, Clone)]
pub struct SelectionConfig {
    pub tie_break: TieBreak,
}

/// Tie-break policy applied both to equal-cost target paths and to
/// equal-cost fallback neighbors.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep the first candidate found, making decisions reproducible.
    FirstFound,
    /// Choose uniformly at random among the tied candidates.
    Random,
}

impl Config {
    /// Loads configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            search: SearchConfig {
                head_danger_depth: 5,
                trap_size_multiplier: 2,
            },
            selection: SelectionConfig {
                tie_break: TieBreak::Random,
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            eprintln!(
                "Warning: Could not load Snake.toml ({}), using hardcoded defaults",
                e
            );
            Self::default_hardcoded()
        })
    }
}
