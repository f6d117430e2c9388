use anyhow::{Context, Result};
use serde::Deserialize;
use std::{env, time::Duration};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub puzzle: PuzzleConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PuzzleConfig {
    /// Smallest grid dimension, whatever the word count
    pub min_size: usize,
    /// Grid cells budgeted per word when deriving the size
    pub cells_per_word: usize,
    /// Largest grid a caller may ask for explicitly
    pub max_size: usize,
    /// Random placement attempts per word before it is dropped
    pub max_attempts: usize,
    pub max_words: usize,
    pub ttl_secs: u64,
    pub cleanup_interval_secs: u64,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            min_size: 15,
            cells_per_word: 10,
            max_size: 64,
            max_attempts: 100,
            max_words: 200,
            ttl_secs: 3600,
            cleanup_interval_secs: 60,
        }
    }
}

impl PuzzleConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs.max(1))
    }
}

/// Read a numeric variable, keeping the default when unset or malformed
fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let server = ServerConfig {
            host: env::var("HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a number")?,
        };

        let defaults = PuzzleConfig::default();
        let puzzle = PuzzleConfig {
            min_size: env_or("GRID_MIN_SIZE", defaults.min_size),
            cells_per_word: env_or("GRID_CELLS_PER_WORD", defaults.cells_per_word),
            max_size: env_or("GRID_MAX_SIZE", defaults.max_size),
            max_attempts: env_or("GRID_MAX_ATTEMPTS", defaults.max_attempts),
            max_words: env_or("MAX_WORDS", defaults.max_words),
            ttl_secs: env_or("PUZZLE_TTL_SECS", defaults.ttl_secs),
            cleanup_interval_secs: env_or("CLEANUP_INTERVAL_SECS", defaults.cleanup_interval_secs),
        };

        Ok(Config { server, puzzle })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_falls_back_on_missing_and_malformed() {
        assert_eq!(env_or("WORDSEARCH_TEST_UNSET_VARIABLE", 15usize), 15);

        // Only this test touches this variable
        env::set_var("WORDSEARCH_TEST_MALFORMED", "fifteen");
        assert_eq!(env_or("WORDSEARCH_TEST_MALFORMED", 15usize), 15);

        env::set_var("WORDSEARCH_TEST_MALFORMED", "20");
        assert_eq!(env_or("WORDSEARCH_TEST_MALFORMED", 15usize), 20);
    }

    #[test]
    fn test_server_addr() {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            puzzle: PuzzleConfig::default(),
        };
        assert_eq!(config.server_addr(), "127.0.0.1:8080");
    }
}
