mod config;
mod error;
mod models;
mod routes;
mod utils;
mod wordsearch;

use std::{
    collections::HashSet,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::Result;
use chrono::{DateTime, Utc};
use config::Config;
use dashmap::DashMap;
use models::WordSearch;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;
use wordsearch::GridBuilder;

/// A generated puzzle kept in memory while a client works on it
#[derive(Debug)]
pub struct PuzzleSession {
    pub puzzle: WordSearch,
    /// Placed words the player has already selected
    pub found_words: HashSet<String>,
    pub created_at: DateTime<Utc>,
    /// Monotonic creation time, used for expiry
    pub created: Instant,
}

impl PuzzleSession {
    pub fn new(puzzle: WordSearch) -> Self {
        Self {
            puzzle,
            found_words: HashSet::new(),
            created_at: Utc::now(),
            created: Instant::now(),
        }
    }

    /// Whether the puzzle has outlived `ttl` at `now`
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.created) > ttl
    }

    /// Found words in alphabetical order
    pub fn found_words_sorted(&self) -> Vec<String> {
        let mut words: Vec<String> = self.found_words.iter().cloned().collect();
        words.sort();
        words
    }

    /// Number of distinct placed words not found yet
    pub fn remaining(&self) -> usize {
        let placed: HashSet<&str> = self.puzzle.placed_words().collect();
        placed.len().saturating_sub(self.found_words.len())
    }
}

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub builder: GridBuilder,
    /// Live puzzles keyed by puzzle id
    pub puzzles: DashMap<Uuid, PuzzleSession>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            builder: GridBuilder::from_config(&config.puzzle),
            config,
            puzzles: DashMap::new(),
        }
    }

    /// Drop puzzles older than the configured TTL, returning how many were removed
    pub fn evict_expired(&self, now: Instant) -> usize {
        let ttl = self.config.puzzle.ttl();
        let mut evicted = 0;

        self.puzzles.retain(|puzzle_id, session| {
            let keep = !session.is_expired(now, ttl);
            if !keep {
                tracing::debug!("Evicting expired puzzle {}", puzzle_id);
                evicted += 1;
            }
            keep
        });

        evicted
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wordsearch_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting word search backend server...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(
        "Configuration loaded (min grid size {}, {} attempts per word, max {} words)",
        config.puzzle.min_size,
        config.puzzle.max_attempts,
        config.puzzle.max_words
    );

    let state = Arc::new(AppState::new(config.clone()));

    // Spawn background task to evict expired puzzles
    let cleanup_state = state.clone();
    tokio::spawn(async move {
        puzzle_cleanup_task(cleanup_state).await;
    });

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::create_routes()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("Word search API: http://{}/api/wordsearch", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Background task that periodically evicts puzzles past their TTL
async fn puzzle_cleanup_task(state: Arc<AppState>) {
    let mut interval = tokio::time::interval(state.config.puzzle.cleanup_interval());

    loop {
        interval.tick().await;

        let evicted = state.evict_expired(Instant::now());
        if evicted > 0 {
            tracing::info!(
                "Evicted {} expired puzzles ({} remaining)",
                evicted,
                state.puzzles.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PuzzleConfig, ServerConfig};
    use rand::{rngs::StdRng, SeedableRng};

    fn test_state() -> AppState {
        AppState::new(Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            puzzle: PuzzleConfig {
                ttl_secs: 60,
                ..PuzzleConfig::default()
            },
        })
    }

    fn sample_session(words: &[&str]) -> PuzzleSession {
        let words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        let puzzle = GridBuilder::default()
            .build(&words, &mut StdRng::seed_from_u64(99))
            .unwrap();
        PuzzleSession::new(puzzle)
    }

    #[test]
    fn test_session_tracks_remaining_words() {
        let mut session = sample_session(&["sol", "luna", "estrella"]);
        assert_eq!(session.remaining(), 3);

        session.found_words.insert("LUNA".to_string());
        session.found_words.insert("ESTRELLA".to_string());
        assert_eq!(session.remaining(), 1);
        assert_eq!(session.found_words_sorted(), vec!["ESTRELLA", "LUNA"]);
    }

    #[test]
    fn test_duplicate_words_count_once() {
        let session = sample_session(&["sol", "SOL"]);
        assert_eq!(session.remaining(), 1);
    }

    #[test]
    fn test_session_expires_after_ttl() {
        let session = sample_session(&["sol"]);
        let ttl = Duration::from_secs(60);

        assert!(!session.is_expired(session.created, ttl));
        assert!(!session.is_expired(session.created + ttl, ttl));
        assert!(session.is_expired(session.created + ttl + Duration::from_secs(1), ttl));
    }

    #[test]
    fn test_evict_expired_keeps_fresh_puzzles() {
        let state = test_state();
        state.puzzles.insert(Uuid::new_v4(), sample_session(&["sol"]));

        assert_eq!(state.evict_expired(Instant::now()), 0);
        assert_eq!(state.puzzles.len(), 1);
    }

    #[test]
    fn test_evict_expired_removes_old_puzzles() {
        let state = test_state();
        let fresh_id = Uuid::new_v4();
        state.puzzles.insert(Uuid::new_v4(), sample_session(&["sol"]));
        state.puzzles.insert(fresh_id, sample_session(&["luna"]));

        // Pretend the fresh one was created just now and the other long ago
        let later = Instant::now() + Duration::from_secs(61);
        state.puzzles.get_mut(&fresh_id).unwrap().created = later;

        assert_eq!(state.evict_expired(later), 1);
        assert!(state.puzzles.contains_key(&fresh_id));
    }
}
