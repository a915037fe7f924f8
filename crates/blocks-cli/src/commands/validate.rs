//! The `blocks validate` command.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use blocks_core::model::FlashcardSet;
use blocks_core::partition::partition;

pub fn execute(path: PathBuf) -> Result<()> {
    let files = if path.is_dir() {
        let mut files: Vec<PathBuf> = std::fs::read_dir(&path)
            .with_context(|| format!("failed to read directory: {}", path.display()))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();
        anyhow::ensure!(
            !files.is_empty(),
            "no .json set files in {}",
            path.display()
        );
        files
    } else {
        vec![path]
    };

    let mut total_warnings = 0;

    for file in &files {
        let set = load_set(file)?;
        let concepts = partition(&set.flashcards);
        println!(
            "Set: {} ({} cards, {} concepts)",
            set.title,
            set.flashcards.len(),
            concepts.len()
        );
        for concept in &concepts {
            println!("  {} — {} card(s)", concept.name, concept.required);
        }

        let warnings = validate_set(&set);
        for w in &warnings {
            println!("  WARNING: {w}");
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All sets valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

fn load_set(path: &Path) -> Result<FlashcardSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read set file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse set file: {}", path.display()))
}

/// Check a set for problems that make it unplayable or confusing.
fn validate_set(set: &FlashcardSet) -> Vec<String> {
    let mut warnings = Vec::new();

    if set.flashcards.is_empty() {
        warnings.push("set has no cards".to_string());
    }

    let mut seen = HashSet::new();
    for card in &set.flashcards {
        if !seen.insert(card.id) {
            warnings.push(format!("duplicate card id {}", card.id));
        }
        if card.term.trim().is_empty() {
            warnings.push(format!("card {} has an empty term", card.id));
        }
        if card.concept.trim().is_empty() {
            warnings.push(format!("card {} has an empty concept", card.id));
        }
    }

    // Concept grouping is exact-match; names differing only by case or
    // surrounding whitespace are almost always data-entry mistakes.
    let concepts = partition(&set.flashcards);
    for (i, a) in concepts.iter().enumerate() {
        for b in &concepts[i + 1..] {
            if a.name != b.name && a.name.trim().eq_ignore_ascii_case(b.name.trim()) {
                warnings.push(format!(
                    "concepts '{}' and '{}' differ only by case or whitespace",
                    a.name, b.name
                ));
            }
        }
    }

    warnings
}
