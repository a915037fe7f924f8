//! The `blocks play` command.
//!
//! Drives a `Session` from stdin. The once-per-second tick and the
//! miss-highlight clear run as spawned tasks; both are aborted when the
//! game ends so no background work outlives the session, and the clear
//! additionally carries a `MissTicket` so a stale callback lands as a
//! no-op after a reset.

use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::task::JoinHandle;

use blocks_client::{load_config_from, BlocksApi};
use blocks_core::model::FlashcardSet;
use blocks_core::reporter::ScoreReporter;
use blocks_core::session::{Session, Toggle, MISS_CLEAR_DELAY, TICK};
use blocks_core::traits::SetRepository;

use super::leaderboard::{format_time, render_table};

const INSTRUCTIONS: &str = "\
How to play Blocks
  Match every term to its concept as quickly as possible.
  A concept is pre-selected for you; pick the terms that belong to it.
  Once you select the required number of terms they are validated
  automatically. Wrong picks flash briefly and count against accuracy.

  Commands:  t <n>  toggle term n      c <n>  switch to concept n
             q      quit\n";

/// What to report scores with, when playing an API-backed set.
struct Reporting {
    reporter: ScoreReporter,
    public_set_id: String,
    leaderboard_limit: usize,
}

pub async fn execute(
    set_id: Option<String>,
    file: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (set, reporting) = match (set_id, file) {
        (_, Some(path)) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read set file: {}", path.display()))?;
            let set: FlashcardSet = serde_json::from_str(&content)
                .with_context(|| format!("failed to parse set file: {}", path.display()))?;
            (set, None)
        }
        (Some(id), None) => {
            let config = load_config_from(config_path.as_deref())?;
            let api = Arc::new(BlocksApi::new(&config.api_url, &config.api_token));
            let set = api.fetch_set(&id).await?;
            tracing::info!(set = %set.public_id, cards = set.flashcards.len(), "fetched set");
            let reporting = Reporting {
                reporter: ScoreReporter::new(api),
                public_set_id: set.public_id.clone(),
                leaderboard_limit: config.leaderboard_limit,
            };
            (set, Some(reporting))
        }
        (None, None) => anyhow::bail!("pass --set <PUBLIC_ID> or --file <set.json>"),
    };

    anyhow::ensure!(
        !set.flashcards.is_empty(),
        "set '{}' has no cards",
        set.title
    );

    println!("{} ({} cards)\n", set.title, set.flashcards.len());
    println!("{INSTRUCTIONS}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print!("Press Enter to start... ");
    std::io::stdout().flush()?;
    if lines.next_line().await?.is_none() {
        return Ok(());
    }

    let session = Arc::new(Mutex::new(Session::new(set.flashcards.clone())));
    session.lock().unwrap().start();

    let ticker = spawn_ticker(Arc::clone(&session));
    let mut miss_clear: Option<JoinHandle<()>> = None;

    let result = game_loop(&session, &mut lines, &mut miss_clear, reporting.as_ref()).await;

    ticker.abort();
    if let Some(handle) = miss_clear {
        handle.abort();
    }
    result
}

/// Advance the session clock once per second until aborted.
fn spawn_ticker(session: Arc<Mutex<Session>>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK);
        // The first tick completes immediately; skip it.
        interval.tick().await;
        loop {
            interval.tick().await;
            session.lock().unwrap().tick();
        }
    })
}

async fn game_loop(
    session: &Arc<Mutex<Session>>,
    lines: &mut Lines<BufReader<Stdin>>,
    miss_clear: &mut Option<JoinHandle<()>>,
    reporting: Option<&Reporting>,
) -> Result<()> {
    loop {
        println!("{}", render(&session.lock().unwrap()));
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            return Ok(());
        };

        match parse_command(&line) {
            Command::Quit => return Ok(()),
            Command::Redraw => continue,
            Command::Unknown => {
                println!("Unrecognized input. Use `t <n>`, `c <n>`, or `q`.");
                continue;
            }
            Command::SelectConcept(n) => {
                let mut s = session.lock().unwrap();
                let Some(concept_id) = s.concepts().get(n - 1).map(|c| c.id.clone()) else {
                    println!("No concept numbered {n}.");
                    continue;
                };
                s.select_concept(&concept_id);
            }
            Command::ToggleCard(n) => {
                let outcome = {
                    let mut s = session.lock().unwrap();
                    let Some(card_id) = s.remaining_cards().nth(n - 1).map(|c| c.id) else {
                        println!("No term numbered {n}.");
                        continue;
                    };
                    s.toggle_card(card_id)
                };

                match outcome {
                    Toggle::Missed { ticket, .. } => {
                        println!("Wrong match!");
                        if let Some(handle) = miss_clear.take() {
                            handle.abort();
                        }
                        let session = Arc::clone(session);
                        *miss_clear = Some(tokio::spawn(async move {
                            tokio::time::sleep(MISS_CLEAR_DELAY).await;
                            session.lock().unwrap().clear_miss(ticket);
                        }));
                    }
                    Toggle::Matched {
                        concept_id,
                        completed,
                    } => {
                        println!("Matched {concept_id}!");
                        if completed && !finish(session, lines, reporting).await? {
                            return Ok(());
                        }
                    }
                    Toggle::Selected | Toggle::Deselected | Toggle::Ignored => {}
                }
            }
        }
    }
}

/// Completed-session flow: summary, score report, leaderboard, replay
/// prompt. Returns false when the player is done.
async fn finish(
    session: &Arc<Mutex<Session>>,
    lines: &mut Lines<BufReader<Stdin>>,
    reporting: Option<&Reporting>,
) -> Result<bool> {
    let summary = session.lock().unwrap().summary();
    println!("\nSet complete!");
    println!(
        "  Time: {}   Accuracy: {}% ({}/{})",
        format_time(Duration::from_secs(summary.elapsed_secs as u64)),
        summary.accuracy_percent(),
        summary.correct_attempts,
        summary.total_attempts,
    );

    match reporting {
        Some(r) => {
            let report = r.reporter.report(&r.public_set_id, &summary).await;
            if !report.submitted {
                println!("Failed to submit score.");
            }
            if report.leaderboard.is_empty() {
                println!("No leaderboard data available.");
            } else {
                println!("\nLeaderboard:");
                println!("{}", render_table(&report.leaderboard, r.leaderboard_limit));
            }
        }
        None => println!("Offline set: score not submitted."),
    }

    print!("\nPlay again? [y/N] ");
    std::io::stdout().flush()?;
    match lines.next_line().await? {
        Some(line) if line.trim().eq_ignore_ascii_case("y") => {
            session.lock().unwrap().reset();
            Ok(true)
        }
        _ => Ok(false),
    }
}

enum Command {
    ToggleCard(usize),
    SelectConcept(usize),
    Quit,
    Redraw,
    Unknown,
}

fn parse_command(line: &str) -> Command {
    let mut parts = line.trim().split_whitespace();
    match parts.next() {
        None => Command::Redraw,
        Some("q") | Some("quit") => Command::Quit,
        Some("t") => match parts.next().and_then(|n| n.parse::<usize>().ok()) {
            Some(n) if n >= 1 => Command::ToggleCard(n),
            _ => Command::Unknown,
        },
        Some("c") => match parts.next().and_then(|n| n.parse::<usize>().ok()) {
            Some(n) if n >= 1 => Command::SelectConcept(n),
            _ => Command::Unknown,
        },
        // A bare number toggles a term.
        Some(word) => match word.parse::<usize>() {
            Ok(n) if n >= 1 => Command::ToggleCard(n),
            _ => Command::Unknown,
        },
    }
}

/// Plain-text view of the current state: concepts with progress, then
/// the remaining terms with selection and miss markers.
fn render(session: &Session) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "\nTime {}   Accuracy {}%\n\nConcepts:\n",
        format_time(Duration::from_secs(session.elapsed_secs() as u64)),
        session.accuracy_percent(),
    ));

    for (i, concept) in session.concepts().iter().enumerate() {
        let matched = session.matched().contains_key(&concept.id);
        let marker = if matched {
            "[done]"
        } else if session.active_concept() == Some(concept.id.as_str()) {
            "[>]   "
        } else {
            "[ ]   "
        };
        let progress = if matched {
            concept.required
        } else if session.active_concept() == Some(concept.id.as_str()) {
            session.selected().len()
        } else {
            0
        };
        out.push_str(&format!(
            "  {} {}. {} ({}/{})\n",
            marker,
            i + 1,
            concept.name,
            progress,
            concept.required
        ));
    }

    out.push_str("\nTerms:\n");
    for (i, card) in session.remaining_cards().enumerate() {
        let marker = if session.misses().contains(&card.id) {
            "!"
        } else if session.selected().contains(&card.id) {
            "*"
        } else {
            " "
        };
        out.push_str(&format!("  {} {}. {}\n", marker, i + 1, card.term));
    }

    out
}
