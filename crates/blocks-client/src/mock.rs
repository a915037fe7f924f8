//! Mock score service for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use blocks_core::model::ScoreRecord;
use blocks_core::traits::{ScorePayload, ScoreService};

/// An in-memory score service that records submissions instead of
/// calling the API, for exercising the reporter and the CLI without a
/// server.
#[derive(Default)]
pub struct MockScoreService {
    /// Leaderboard rows returned by `leaderboard`.
    rows: Mutex<Vec<ScoreRecord>>,
    /// Payloads received by `submit`, in order.
    submissions: Mutex<Vec<ScorePayload>>,
    /// Number of leaderboard fetches.
    fetch_count: AtomicU32,
    /// When set, `submit` fails.
    fail_submit: bool,
}

impl MockScoreService {
    pub fn new(rows: Vec<ScoreRecord>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Default::default()
        }
    }

    /// A mock whose `submit` always fails.
    pub fn failing_submit() -> Self {
        Self {
            fail_submit: true,
            ..Default::default()
        }
    }

    /// Payloads received so far.
    pub fn submissions(&self) -> Vec<ScorePayload> {
        self.submissions.lock().unwrap().clone()
    }

    /// How many times the leaderboard was fetched.
    pub fn fetch_count(&self) -> u32 {
        self.fetch_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ScoreService for MockScoreService {
    async fn submit(
        &self,
        _public_set_id: &str,
        payload: &ScorePayload,
    ) -> anyhow::Result<ScoreRecord> {
        if self.fail_submit {
            anyhow::bail!("mock submit failure");
        }
        self.submissions.lock().unwrap().push(*payload);
        Ok(ScoreRecord {
            id: self.submissions.lock().unwrap().len() as u64,
            time_seconds: Some(payload.time),
            correct_attempts: Some(payload.correct_attempts),
            total_attempts: Some(payload.total_attempts),
            user: None,
            played_at: None,
        })
    }

    async fn leaderboard(&self, _public_set_id: &str) -> anyhow::Result<Vec<ScoreRecord>> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);
        Ok(self.rows.lock().unwrap().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_submissions_in_order() {
        let mock = MockScoreService::new(vec![]);
        let payload = ScorePayload {
            correct_attempts: 1,
            total_attempts: 2,
            time: 3,
        };
        mock.submit("set", &payload).await.unwrap();
        mock.submit("set", &payload).await.unwrap();
        assert_eq!(mock.submissions().len(), 2);
        assert_eq!(mock.fetch_count(), 0);

        mock.leaderboard("set").await.unwrap();
        assert_eq!(mock.fetch_count(), 1);
    }

    #[tokio::test]
    async fn failing_submit_reports_error() {
        let mock = MockScoreService::failing_submit();
        let payload = ScorePayload {
            correct_attempts: 0,
            total_attempts: 0,
            time: 0,
        };
        assert!(mock.submit("set", &payload).await.is_err());
        assert!(mock.submissions().is_empty());
    }
}
