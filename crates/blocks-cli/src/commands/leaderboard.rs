//! The `blocks leaderboard` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use comfy_table::{Cell, Table};

use blocks_client::{load_config_from, BlocksApi};
use blocks_core::model::ScoreRecord;
use blocks_core::traits::ScoreService;

pub async fn execute(
    set_id: String,
    limit: Option<usize>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let limit = limit.unwrap_or(config.leaderboard_limit);
    anyhow::ensure!(limit >= 1, "limit must be at least 1");

    let api = BlocksApi::new(&config.api_url, &config.api_token);
    let rows = api.leaderboard(&set_id).await?;

    if rows.is_empty() {
        println!("No leaderboard data available for set {set_id}.");
        return Ok(());
    }

    println!("{}", render_table(&rows, limit));
    Ok(())
}

/// Render leaderboard rows as a table, best times first, capped at `limit`.
pub fn render_table(rows: &[ScoreRecord], limit: usize) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Player", "Time", "Accuracy", "Played"]);

    for (rank, row) in rows.iter().take(limit).enumerate() {
        let time = row
            .time_seconds
            .map(|s| format_time(Duration::from_secs(s as u64)))
            .unwrap_or_else(|| "-".to_string());
        let played = row
            .played_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(row.nickname()),
            Cell::new(time),
            Cell::new(format!("{}%", row.accuracy_percent())),
            Cell::new(played),
        ]);
    }

    table
}

/// Format seconds as MM:SS.
pub fn format_time(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
