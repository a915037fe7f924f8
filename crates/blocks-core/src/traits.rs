//! Trait seams between the game logic and the remote API.
//!
//! These async traits are implemented over HTTP by the `blocks-client`
//! crate; tests substitute in-memory fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{FlashcardSet, ScoreRecord};

/// Score statistics as posted to the scoring service.
///
/// Field names mirror the API's JSON body exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorePayload {
    #[serde(rename = "CorrectAttempts")]
    pub correct_attempts: u32,
    #[serde(rename = "TotalAttempts")]
    pub total_attempts: u32,
    /// Elapsed session time in seconds.
    #[serde(rename = "Time")]
    pub time: u32,
}

/// Source of flashcard sets, keyed by public set identifier.
#[async_trait]
pub trait SetRepository: Send + Sync {
    /// Fetch a full set, cards included.
    async fn fetch_set(&self, set_id: &str) -> anyhow::Result<FlashcardSet>;
}

/// Sink for finished-session scores and source of prior results.
#[async_trait]
pub trait ScoreService: Send + Sync {
    /// Record a finished session's score for the given public set id.
    async fn submit(&self, public_set_id: &str, payload: &ScorePayload)
        -> anyhow::Result<ScoreRecord>;

    /// Ranked prior results for the given public set id, best time first.
    async fn leaderboard(&self, public_set_id: &str) -> anyhow::Result<Vec<ScoreRecord>>;
}
