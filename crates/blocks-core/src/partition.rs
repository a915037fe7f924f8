//! Concept partitioner.
//!
//! Derives the distinct concepts and their required match counts from a
//! flat card list. Pure; the result is stable for a given card order.

use std::collections::HashMap;

use crate::model::{Card, Concept};

/// Group cards by concept name, preserving first-seen order.
///
/// Concept names are compared by exact string equality; "Biology " and
/// "biology" are distinct concepts. Every returned concept has
/// `required >= 1`, and the required counts sum to `cards.len()`.
pub fn partition(cards: &[Card]) -> Vec<Concept> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for card in cards {
        let count = counts.entry(card.concept.as_str()).or_insert(0);
        if *count == 0 {
            order.push(card.concept.as_str());
        }
        *count += 1;
    }

    order
        .into_iter()
        .map(|name| Concept {
            id: name.to_string(),
            name: name.to_string(),
            required: counts[name],
        })
        .collect()
}
