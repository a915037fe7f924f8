//! Reqwest client for the flashcard set and blocks scoring endpoints.

use async_trait::async_trait;
use serde_json::Value;

use blocks_core::error::ApiError;
use blocks_core::model::{FlashcardSet, ScoreRecord};
use blocks_core::traits::{ScorePayload, ScoreService, SetRepository};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Bearer-token authenticated client for the flashcard API.
pub struct BlocksApi {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl BlocksApi {
    pub fn new(base_url: &str, token: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            client,
        }
    }

    fn map_send_error(e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout(DEFAULT_TIMEOUT_SECS)
        } else {
            ApiError::Network(e.to_string())
        }
    }

    /// Convert a non-success response into the matching `ApiError`.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status().as_u16();
        if status < 400 {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(status, message))
    }
}

#[async_trait]
impl SetRepository for BlocksApi {
    async fn fetch_set(&self, set_id: &str) -> anyhow::Result<FlashcardSet> {
        let response = self
            .client
            .get(format!("{}/api/sets/{set_id}", self.base_url))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let response = Self::check_status(response).await?;
        let set = response
            .json::<FlashcardSet>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        tracing::debug!(set = %set.public_id, cards = set.flashcards.len(), "fetched set");
        Ok(set)
    }
}

#[async_trait]
impl ScoreService for BlocksApi {
    async fn submit(
        &self,
        public_set_id: &str,
        payload: &ScorePayload,
    ) -> anyhow::Result<ScoreRecord> {
        let response = self
            .client
            .post(format!("{}/api/blocks/score/{public_set_id}", self.base_url))
            .bearer_auth(&self.token)
            .json(payload)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let response = Self::check_status(response).await?;
        let record = response
            .json::<ScoreRecord>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(record)
    }

    async fn leaderboard(&self, public_set_id: &str) -> anyhow::Result<Vec<ScoreRecord>> {
        let response = self
            .client
            .get(format!(
                "{}/api/blocks/leaderboard/{public_set_id}",
                self.base_url
            ))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let response = Self::check_status(response).await?;
        let body = response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(normalize_leaderboard(body)?)
    }
}

/// The leaderboard endpoint returns an array, but older API versions
/// return a bare object for a single entry and `null` for none.
fn normalize_leaderboard(body: Value) -> Result<Vec<ScoreRecord>, ApiError> {
    let records = match body {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<ScoreRecord>, _>>()
            .map_err(|e| ApiError::Decode(e.to_string()))?,
        other => vec![serde_json::from_value(other).map_err(|e| ApiError::Decode(e.to_string()))?],
    };
    Ok(records)
}
