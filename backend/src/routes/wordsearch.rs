use crate::{
    error::{ApiError, GridError},
    models::{Position, WordSearch},
    wordsearch::{GridBuilder, SelectionValidator},
    AppState, PuzzleSession,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::Instant};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub words: Vec<String>,
    /// Explicit grid dimension; derived from the word count when absent
    #[serde(default)]
    pub size: Option<usize>,
    /// Seed for a reproducible puzzle
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct PuzzleResponse {
    pub puzzle_id: Uuid,
    #[serde(flatten)]
    pub puzzle: WordSearch,
    pub found_words: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl PuzzleResponse {
    fn from_session(puzzle_id: Uuid, session: &PuzzleSession) -> Self {
        Self {
            puzzle_id,
            puzzle: session.puzzle.clone(),
            found_words: session.found_words_sorted(),
            created_at: session.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub positions: Vec<Position>,
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    /// The placed word matching the selection, if any
    pub found: Option<String>,
    pub already_found: bool,
    pub found_words: Vec<String>,
    pub remaining: usize,
}

fn build_puzzle<R: Rng>(
    builder: &GridBuilder,
    words: &[String],
    size: Option<usize>,
    rng: &mut R,
) -> Result<WordSearch, GridError> {
    match size {
        Some(size) => builder.build_with_size(words, size, rng),
        None => builder.build(words, rng),
    }
}

/// Generate a new puzzle from a word list and store it for later checks
pub async fn generate_puzzle(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GenerateRequest>,
) -> Result<(StatusCode, Json<PuzzleResponse>), ApiError> {
    tracing::info!("Generating word search for {} words", payload.words.len());

    // The whole grid is built before anything is stored or returned
    let builder = state.builder.clone();
    let puzzle = tokio::task::spawn_blocking(move || {
        let GenerateRequest { words, size, seed } = payload;
        match seed {
            Some(seed) => build_puzzle(&builder, &words, size, &mut StdRng::seed_from_u64(seed)),
            None => build_puzzle(&builder, &words, size, &mut rand::rng()),
        }
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Grid builder task failed: {}", e)))??;

    if !puzzle.dropped_words.is_empty() {
        tracing::warn!(
            "{} words left out of the puzzle: {:?}",
            puzzle.dropped_words.len(),
            puzzle.dropped_words
        );
    }

    let puzzle_id = Uuid::new_v4();
    let session = PuzzleSession::new(puzzle);
    let response = PuzzleResponse::from_session(puzzle_id, &session);
    state.puzzles.insert(puzzle_id, session);

    tracing::info!(
        "Puzzle {} created ({}x{}, {} words placed)",
        puzzle_id,
        response.puzzle.size,
        response.puzzle.size,
        response.puzzle.placements.len()
    );

    Ok((StatusCode::CREATED, Json(response)))
}

/// Fetch a stored puzzle with the words found so far
pub async fn get_puzzle(
    State(state): State<Arc<AppState>>,
    Path(puzzle_id): Path<Uuid>,
) -> Result<Json<PuzzleResponse>, ApiError> {
    let ttl = state.config.puzzle.ttl();
    let session = state
        .puzzles
        .get(&puzzle_id)
        .filter(|session| !session.is_expired(Instant::now(), ttl))
        .ok_or(ApiError::PuzzleNotFound(puzzle_id))?;

    Ok(Json(PuzzleResponse::from_session(puzzle_id, &session)))
}

/// Check a cell selection against the puzzle's placed words
pub async fn check_selection(
    State(state): State<Arc<AppState>>,
    Path(puzzle_id): Path<Uuid>,
    Json(payload): Json<CheckRequest>,
) -> Result<Json<CheckResponse>, ApiError> {
    let ttl = state.config.puzzle.ttl();
    let mut session = state
        .puzzles
        .get_mut(&puzzle_id)
        .filter(|session| !session.is_expired(Instant::now(), ttl))
        .ok_or(ApiError::PuzzleNotFound(puzzle_id))?;

    let found = SelectionValidator::check_selection(&session.puzzle, &payload.positions)
        .map(|placement| placement.word.clone());

    let already_found = match &found {
        Some(word) => !session.found_words.insert(word.clone()),
        None => false,
    };

    if let Some(word) = &found {
        tracing::debug!("Puzzle {}: selection matched {}", puzzle_id, word);
    }

    Ok(Json(CheckResponse {
        found,
        already_found,
        found_words: session.found_words_sorted(),
        remaining: session.remaining(),
    }))
}

/// Discard a puzzle before its TTL runs out
pub async fn delete_puzzle(
    State(state): State<Arc<AppState>>,
    Path(puzzle_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .puzzles
        .remove(&puzzle_id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(ApiError::PuzzleNotFound(puzzle_id))
}
