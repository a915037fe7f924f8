//! Score reporter.
//!
//! Runs once per completed session: submit the score, then fetch the
//! leaderboard. The two calls are independent failure domains — a
//! failed submission is logged and surfaced as `submitted: false`, and
//! the leaderboard is fetched regardless; a failed fetch degrades to an
//! empty leaderboard. Neither failure propagates to the caller.

use std::sync::Arc;

use crate::model::{ScoreRecord, SessionSummary};
use crate::traits::{ScorePayload, ScoreService};

/// What happened when a completed session was reported.
#[derive(Debug, Clone)]
pub struct ScoreReport {
    /// Whether the score submission was accepted.
    pub submitted: bool,
    /// Prior results for the same set; empty when the fetch failed.
    pub leaderboard: Vec<ScoreRecord>,
}

/// Submits finished-session scores and retrieves leaderboards.
pub struct ScoreReporter {
    service: Arc<dyn ScoreService>,
}

impl ScoreReporter {
    pub fn new(service: Arc<dyn ScoreService>) -> Self {
        Self { service }
    }

    /// Report a completed session keyed by the set's public id.
    ///
    /// Submission is attempted first; the leaderboard fetch always
    /// follows, whether or not submission succeeded. One attempt each,
    /// no retries.
    pub async fn report(&self, public_set_id: &str, summary: &SessionSummary) -> ScoreReport {
        let payload = ScorePayload {
            correct_attempts: summary.correct_attempts,
            total_attempts: summary.total_attempts,
            time: summary.elapsed_secs,
        };

        let submitted = match self.service.submit(public_set_id, &payload).await {
            Ok(record) => {
                tracing::info!(set = public_set_id, score_id = record.id, "score submitted");
                true
            }
            Err(e) => {
                tracing::warn!(set = public_set_id, "score submission failed: {e:#}");
                false
            }
        };

        let leaderboard = match self.service.leaderboard(public_set_id).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(set = public_set_id, "leaderboard fetch failed: {e:#}");
                Vec::new()
            }
        };

        ScoreReport {
            submitted,
            leaderboard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;

    /// Records call order and payloads; each call can be made to fail.
    struct RecordingService {
        calls: Mutex<Vec<String>>,
        payloads: Mutex<Vec<ScorePayload>>,
        fail_submit: bool,
        fail_leaderboard: bool,
        rows: Vec<ScoreRecord>,
    }

    impl RecordingService {
        fn new(fail_submit: bool, fail_leaderboard: bool, rows: Vec<ScoreRecord>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                payloads: Mutex::new(Vec::new()),
                fail_submit,
                fail_leaderboard,
                rows,
            }
        }
    }

    #[async_trait]
    impl ScoreService for RecordingService {
        async fn submit(
            &self,
            public_set_id: &str,
            payload: &ScorePayload,
        ) -> anyhow::Result<ScoreRecord> {
            self.calls.lock().unwrap().push(format!("submit:{public_set_id}"));
            self.payloads.lock().unwrap().push(*payload);
            if self.fail_submit {
                anyhow::bail!("server unavailable");
            }
            Ok(ScoreRecord {
                id: 1,
                time_seconds: Some(payload.time),
                correct_attempts: Some(payload.correct_attempts),
                total_attempts: Some(payload.total_attempts),
                user: None,
                played_at: None,
            })
        }

        async fn leaderboard(&self, public_set_id: &str) -> anyhow::Result<Vec<ScoreRecord>> {
            self.calls.lock().unwrap().push(format!("board:{public_set_id}"));
            if self.fail_leaderboard {
                anyhow::bail!("server unavailable");
            }
            Ok(self.rows.clone())
        }
    }

    fn summary() -> SessionSummary {
        SessionSummary {
            correct_attempts: 3,
            total_attempts: 4,
            elapsed_secs: 57,
        }
    }

    #[tokio::test]
    async fn submits_before_fetching_leaderboard() {
        let service = Arc::new(RecordingService::new(false, false, vec![]));
        let reporter = ScoreReporter::new(service.clone());

        let report = reporter.report("set-1", &summary()).await;
        assert!(report.submitted);
        assert_eq!(
            *service.calls.lock().unwrap(),
            vec!["submit:set-1", "board:set-1"]
        );
        let payloads = service.payloads.lock().unwrap();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].correct_attempts, 3);
        assert_eq!(payloads[0].total_attempts, 4);
        assert_eq!(payloads[0].time, 57);
    }

    #[tokio::test]
    async fn leaderboard_fetched_even_when_submission_fails() {
        let rows = vec![ScoreRecord {
            id: 9,
            time_seconds: Some(30),
            correct_attempts: Some(2),
            total_attempts: Some(2),
            user: None,
            played_at: None,
        }];
        let service = Arc::new(RecordingService::new(true, false, rows));
        let reporter = ScoreReporter::new(service.clone());

        let report = reporter.report("set-1", &summary()).await;
        assert!(!report.submitted);
        assert_eq!(report.leaderboard.len(), 1);
        assert_eq!(
            *service.calls.lock().unwrap(),
            vec!["submit:set-1", "board:set-1"]
        );
    }

    #[tokio::test]
    async fn leaderboard_failure_degrades_to_empty() {
        let service = Arc::new(RecordingService::new(false, true, vec![]));
        let reporter = ScoreReporter::new(service.clone());

        let report = reporter.report("set-1", &summary()).await;
        assert!(report.submitted);
        assert!(report.leaderboard.is_empty());
    }
}
