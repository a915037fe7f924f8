//! Session state machine for one play-through of the blocks game.
//!
//! All mutation goes through the operations below; invalid operations
//! (toggling while not running, selecting a solved concept, ...) are
//! silent no-ops rather than errors, because the machine is driven by
//! user input that can race with deferred callbacks.
//!
//! Deferred work is modeled explicitly: a failed evaluation returns a
//! [`MissTicket`] and the driver schedules [`Session::clear_miss`]
//! after [`MISS_CLEAR_DELAY`]. Tickets carry the session epoch, so a
//! clear that fires after a reset (or any later evaluation) lands as a
//! no-op instead of wiping fresh state.

use std::collections::HashMap;
use std::time::Duration;

use uuid::Uuid;

use crate::model::{accuracy_percent, Card, CardId, Concept, SessionSummary};
use crate::partition::partition;

/// Interval between [`Session::tick`] calls while running.
pub const TICK: Duration = Duration::from_secs(1);

/// How long a failed attempt stays highlighted before it is cleared.
pub const MISS_CLEAR_DELAY: Duration = Duration::from_millis(700);

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Instructions shown, timer not started.
    NotStarted,
    /// Timer running, selections accepted.
    Running,
    /// Every concept matched. Terminal until [`Session::reset`].
    Complete,
}

/// Token returned by a failed evaluation, redeemed via [`Session::clear_miss`].
///
/// Invalidated by any later epoch bump (reset, concept switch, the
/// next evaluation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissTicket {
    epoch: u64,
}

/// Outcome of a [`Session::toggle_card`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toggle {
    /// The toggle was invalid in the current state and changed nothing.
    Ignored,
    /// The card was added to the selection.
    Selected,
    /// The card was removed from the selection.
    Deselected,
    /// The selection reached the required count and was correct.
    Matched {
        concept_id: String,
        /// True exactly once per session: this match solved the last
        /// concept. The driver triggers score reporting on this edge.
        completed: bool,
    },
    /// The selection reached the required count and was wrong.
    Missed {
        card_ids: Vec<CardId>,
        ticket: MissTicket,
    },
}

/// One play-through: cards, derived concepts, and all mutable state.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    cards: Vec<Card>,
    concepts: Vec<Concept>,
    phase: Phase,
    active_concept: Option<String>,
    selected: Vec<CardId>,
    matched: HashMap<String, Vec<CardId>>,
    misses: Vec<CardId>,
    correct_attempts: u32,
    total_attempts: u32,
    elapsed_secs: u32,
    final_secs: Option<u32>,
    epoch: u64,
}

impl Session {
    /// Create a session over the given cards. Concepts are partitioned
    /// once here; the session starts in [`Phase::NotStarted`].
    pub fn new(cards: Vec<Card>) -> Self {
        let concepts = partition(&cards);
        Self {
            id: Uuid::new_v4(),
            cards,
            concepts,
            phase: Phase::NotStarted,
            active_concept: None,
            selected: Vec::new(),
            matched: HashMap::new(),
            misses: Vec::new(),
            correct_attempts: 0,
            total_attempts: 0,
            elapsed_secs: 0,
            final_secs: None,
            epoch: 0,
        }
    }

    /// Begin play: first concept becomes active, timer starts.
    /// No-op unless the session is in [`Phase::NotStarted`].
    pub fn start(&mut self) {
        if self.phase != Phase::NotStarted {
            return;
        }
        self.active_concept = self.concepts.first().map(|c| c.id.clone());
        self.phase = Phase::Running;
        tracing::debug!(session = %self.id, concepts = self.concepts.len(), "session started");
    }

    /// Advance the clock by one second. No-op unless running.
    pub fn tick(&mut self) {
        if self.phase == Phase::Running {
            self.elapsed_secs += 1;
        }
    }

    /// Make `concept_id` the active concept. No-op unless running, the
    /// concept exists, and it is not already matched. Switching away
    /// from a partial selection discards it without recording an attempt.
    pub fn select_concept(&mut self, concept_id: &str) {
        if self.phase != Phase::Running
            || self.matched.contains_key(concept_id)
            || !self.concepts.iter().any(|c| c.id == concept_id)
        {
            return;
        }
        self.epoch += 1;
        self.active_concept = Some(concept_id.to_string());
        self.selected.clear();
        self.misses.clear();
    }

    /// Toggle a card in or out of the current selection. When the
    /// selection reaches the active concept's required count, the
    /// attempt is evaluated synchronously and the outcome returned.
    pub fn toggle_card(&mut self, card_id: CardId) -> Toggle {
        if self.phase != Phase::Running || self.active_concept.is_none() {
            return Toggle::Ignored;
        }
        if self.is_card_matched(card_id) || !self.cards.iter().any(|c| c.id == card_id) {
            return Toggle::Ignored;
        }

        // A toggle during the miss-highlight window interrupts it: the
        // failed selection is dropped and the pending deferred clear is
        // invalidated before the toggle applies.
        if !self.misses.is_empty() {
            self.epoch += 1;
            self.misses.clear();
            self.selected.clear();
        }

        if let Some(pos) = self.selected.iter().position(|&id| id == card_id) {
            self.selected.remove(pos);
            return Toggle::Deselected;
        }
        self.selected.push(card_id);

        let required = self
            .active_concept
            .as_deref()
            .and_then(|id| self.concepts.iter().find(|c| c.id == id))
            .map(|c| c.required)
            .unwrap_or(usize::MAX);
        if self.selected.len() == required {
            self.evaluate()
        } else {
            Toggle::Selected
        }
    }

    /// Drop the miss highlight and the failed selection. No-op if the
    /// ticket's epoch has been superseded.
    pub fn clear_miss(&mut self, ticket: MissTicket) {
        if ticket.epoch != self.epoch {
            return;
        }
        self.misses.clear();
        self.selected.clear();
    }

    /// Reinitialize all counters, selections, and matches, and go
    /// straight back to [`Phase::Running`] (replays skip the
    /// instructional gate). Valid from any phase.
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.selected.clear();
        self.matched.clear();
        self.misses.clear();
        self.correct_attempts = 0;
        self.total_attempts = 0;
        self.elapsed_secs = 0;
        self.final_secs = None;
        self.active_concept = self.concepts.first().map(|c| c.id.clone());
        self.phase = Phase::Running;
    }

    /// Evaluate the full selection against the active concept.
    ///
    /// Correctness requires every selected card's concept to equal the
    /// active concept id; the right count with one wrong-concept card
    /// is a miss.
    fn evaluate(&mut self) -> Toggle {
        let Some(concept_id) = self.active_concept.clone() else {
            return Toggle::Ignored;
        };
        self.epoch += 1;
        self.total_attempts += 1;

        let correct = self.selected.iter().all(|&id| {
            self.cards
                .iter()
                .find(|c| c.id == id)
                .is_some_and(|c| c.concept == concept_id)
        });

        if !correct {
            self.misses = self.selected.clone();
            return Toggle::Missed {
                card_ids: self.misses.clone(),
                ticket: MissTicket { epoch: self.epoch },
            };
        }

        self.correct_attempts += 1;
        let group = std::mem::take(&mut self.selected);
        self.matched.insert(concept_id.clone(), group);

        self.active_concept = self
            .concepts
            .iter()
            .find(|c| !self.matched.contains_key(&c.id))
            .map(|c| c.id.clone());

        let completed = self.active_concept.is_none() && !self.concepts.is_empty();
        if completed {
            self.final_secs = Some(self.elapsed_secs);
            self.phase = Phase::Complete;
            tracing::debug!(
                session = %self.id,
                secs = self.elapsed_secs,
                attempts = self.total_attempts,
                "session complete"
            );
        }

        Toggle::Matched {
            concept_id,
            completed,
        }
    }

    fn is_card_matched(&self, card_id: CardId) -> bool {
        self.matched.values().any(|group| group.contains(&card_id))
    }

    // --- accessors ---------------------------------------------------

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }

    pub fn active_concept(&self) -> Option<&str> {
        self.active_concept.as_deref()
    }

    pub fn selected(&self) -> &[CardId] {
        &self.selected
    }

    pub fn misses(&self) -> &[CardId] {
        &self.misses
    }

    pub fn matched(&self) -> &HashMap<String, Vec<CardId>> {
        &self.matched
    }

    /// Cards not yet matched to any concept, in set order.
    pub fn remaining_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| !self.is_card_matched(c.id))
    }

    /// Look up a card by id.
    pub fn card(&self, card_id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == card_id)
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn correct_attempts(&self) -> u32 {
        self.correct_attempts
    }

    pub fn total_attempts(&self) -> u32 {
        self.total_attempts
    }

    pub fn accuracy_percent(&self) -> u32 {
        accuracy_percent(self.correct_attempts, self.total_attempts)
    }

    /// Attempt statistics for reporting. Uses the frozen final time on
    /// a completed session, the live clock otherwise.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            correct_attempts: self.correct_attempts,
            total_attempts: self.total_attempts,
            elapsed_secs: self.final_secs.unwrap_or(self.elapsed_secs),
        }
    }
}
