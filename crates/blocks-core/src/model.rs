//! Core data model types for the blocks game.
//!
//! Wire-facing types carry PascalCase serde renames matching the
//! flashcard API's JSON shape (`ID`, `Term`, `Concept`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a single card, unique within a set.
pub type CardId = u64;

/// A term paired with its owning concept, the atomic unit a player selects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier for this card.
    #[serde(rename = "ID")]
    pub id: CardId,
    /// The text shown on the card.
    #[serde(rename = "Term")]
    pub term: String,
    /// The definition paired with the term. Unused by the matcher but
    /// part of the set model.
    #[serde(rename = "Solution", default)]
    pub solution: String,
    /// Name of the concept this card belongs to.
    #[serde(rename = "Concept")]
    pub concept: String,
}

/// A named group of cards, the matching target for a round.
///
/// Derived once per session by [`crate::partition::partition`]; never
/// constructed for a concept with zero cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Concept {
    /// Concept identifier (the concept name itself).
    pub id: String,
    /// Display name.
    pub name: String,
    /// How many cards must be selected to match this concept.
    pub required: usize,
}

/// A flashcard set as served by the set repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashcardSet {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "Title")]
    pub title: String,
    /// Public identifier used as the key for scoring and leaderboards.
    #[serde(rename = "PublicID")]
    pub public_id: String,
    #[serde(rename = "IsPublic", default)]
    pub is_public: bool,
    #[serde(rename = "Flashcards", default)]
    pub flashcards: Vec<Card>,
}

/// Attempt statistics frozen at session completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Evaluations that matched every selected card to the active concept.
    pub correct_attempts: u32,
    /// Total evaluations, successful or not.
    pub total_attempts: u32,
    /// Wall-clock seconds from start to completion.
    pub elapsed_secs: u32,
}

impl SessionSummary {
    /// Accuracy as a rounded percentage. 100 when no attempts were made.
    pub fn accuracy_percent(&self) -> u32 {
        accuracy_percent(self.correct_attempts, self.total_attempts)
    }
}

/// Rounded percentage of correct out of total; 100 when total is zero.
pub fn accuracy_percent(correct: u32, total: u32) -> u32 {
    if total == 0 {
        100
    } else {
        ((correct as f64 / total as f64) * 100.0).round() as u32
    }
}

/// One row of the scoring service's leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "TimeSeconds", default)]
    pub time_seconds: Option<u32>,
    #[serde(rename = "CorrectAttempts", default)]
    pub correct_attempts: Option<u32>,
    #[serde(rename = "TotalAttempts", default)]
    pub total_attempts: Option<u32>,
    #[serde(rename = "User", default)]
    pub user: Option<ScoreUser>,
    #[serde(rename = "PlayedAt", default)]
    pub played_at: Option<DateTime<Utc>>,
}

impl ScoreRecord {
    /// Nickname of the player, or "Unknown" when the API omits the user.
    pub fn nickname(&self) -> &str {
        self.user
            .as_ref()
            .map(|u| u.nickname.as_str())
            .unwrap_or("Unknown")
    }

    /// Accuracy percentage for display; 100 when attempt counts are missing.
    pub fn accuracy_percent(&self) -> u32 {
        match (self.correct_attempts, self.total_attempts) {
            (Some(c), Some(t)) if t > 0 => accuracy_percent(c, t),
            _ => 100,
        }
    }
}

/// Player info embedded in a leaderboard row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreUser {
    #[serde(rename = "ID", default)]
    pub id: u64,
    #[serde(rename = "Nickname", default)]
    pub nickname: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_deserializes_pascal_case() {
        let json = r#"{"ID": 7, "Term": "Mitochondria", "Solution": "Powerhouse", "Concept": "Biology"}"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.id, 7);
        assert_eq!(card.term, "Mitochondria");
        assert_eq!(card.concept, "Biology");
    }

    #[test]
    fn flashcard_set_tolerates_missing_cards() {
        let json = r#"{"ID": 1, "Title": "Bio 101", "PublicID": "abc123"}"#;
        let set: FlashcardSet = serde_json::from_str(json).unwrap();
        assert!(set.flashcards.is_empty());
        assert!(!set.is_public);
    }

    #[test]
    fn accuracy_rounds_and_defaults() {
        assert_eq!(accuracy_percent(0, 0), 100);
        assert_eq!(accuracy_percent(1, 3), 33);
        assert_eq!(accuracy_percent(2, 3), 67);
        assert_eq!(accuracy_percent(4, 4), 100);
    }

    #[test]
    fn score_record_display_fallbacks() {
        let record: ScoreRecord = serde_json::from_str(r#"{"ID": 3}"#).unwrap();
        assert_eq!(record.nickname(), "Unknown");
        assert_eq!(record.accuracy_percent(), 100);

        let record: ScoreRecord = serde_json::from_str(
            r#"{"ID": 4, "TimeSeconds": 57, "CorrectAttempts": 3, "TotalAttempts": 4, "User": {"ID": 1, "Nickname": "ada"}}"#,
        )
        .unwrap();
        assert_eq!(record.nickname(), "ada");
        assert_eq!(record.accuracy_percent(), 75);
    }
}
