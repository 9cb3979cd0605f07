//! Structured-Response Adapter for the offshore registry reconciliation API.
//!
//! One POST, one JSON candidate list back. The upstream service does the
//! matching, so candidates are passed through verbatim with no local
//! filtering and no cap.

use crate::config::OffshoreConfig;
use crate::error::ScreenError;
use crate::screen::result::{EntityCandidate, Record};
use crate::screen::Source;
use crate::sources::SourceAdapter;
use crate::transport::HttpClient;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Candidate shape returned by the reconciliation endpoint. Every field is
/// optional so an absent upstream field stays absent downstream; the score
/// stays raw JSON so a non-numeric value passes through untouched.
#[derive(Debug, Deserialize)]
struct ReconcileCandidate {
    name: Option<String>,
    description: Option<String>,
    score: Option<serde_json::Value>,
    id: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct ReconcileBody {
    /// Candidate list; an absent key means zero candidates.
    #[serde(default)]
    result: Vec<ReconcileCandidate>,
}

pub struct OffshoreApiAdapter {
    config: OffshoreConfig,
    http: HttpClient,
}

impl OffshoreApiAdapter {
    pub fn new(config: OffshoreConfig, timeout: Duration) -> Self {
        Self {
            config,
            http: HttpClient::new(timeout),
        }
    }
}

#[async_trait]
impl SourceAdapter for OffshoreApiAdapter {
    fn source(&self) -> Source {
        Source::Offshore
    }

    async fn search(&self, name: &str) -> Result<Vec<Record>, ScreenError> {
        let body = json!({ "query": name, "type": "Entity" });
        let resp = self
            .http
            .post_json(&self.config.api_url, &self.config.headers, &body)
            .await
            .map_err(|e| ScreenError::transport(Source::Offshore, e))?;

        // The endpoint answers 200 or 201 depending on deployment.
        if !matches!(resp.status, 200 | 201) {
            return Err(ScreenError::upstream(
                Source::Offshore,
                resp.status,
                &resp.body,
            ));
        }

        let records = parse_candidates(&resp.body)?;
        debug!(hits = records.len(), "reconciliation query complete");
        Ok(records)
    }
}

/// Decode the candidate list from a 2xx reconciliation response.
///
/// An absent or empty `result` list is zero hits; a body that is not JSON
/// at all means the endpoint no longer speaks the protocol we expect.
fn parse_candidates(body: &str) -> Result<Vec<Record>, ScreenError> {
    let parsed: ReconcileBody = serde_json::from_str(body).map_err(|e| ScreenError::Protocol {
        source: Source::Offshore,
        reason: format!("unreadable reconciliation body: {e}"),
    })?;

    Ok(parsed
        .result
        .into_iter()
        .map(|c| {
            Record::Entity(EntityCandidate {
                entity: c.name,
                description: c.description,
                score: c.score,
                id: c.id,
            })
        })
        .collect())
}
