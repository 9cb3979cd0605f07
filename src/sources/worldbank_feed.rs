//! Feed-Filter Adapter for the World Bank firm-sanctions feed.
//!
//! The feed has no server-side query parameter, so every call fetches the
//! whole feed and filters locally: case-insensitive substring containment
//! against the firm name, nothing fuzzier. Unlike the other sources, an
//! upstream failure here relays the upstream status code to the caller
//! as-is.

use crate::config::WorldbankConfig;
use crate::error::ScreenError;
use crate::screen::result::{DebarredFirm, Record};
use crate::screen::Source;
use crate::sources::SourceAdapter;
use crate::transport::HttpClient;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// One firm entry in the feed. All fields optional: the feed is not
/// uniform and an absent field stays absent in the output record.
#[derive(Debug, Deserialize)]
struct FeedEntry {
    #[serde(rename = "SUPP_NAME")]
    supp_name: Option<String>,
    #[serde(rename = "SUPP_ADDR")]
    supp_addr: Option<String>,
    #[serde(rename = "COUNTRY_NAME")]
    country_name: Option<String>,
    #[serde(rename = "DEBAR_FROM_DATE")]
    debar_from_date: Option<String>,
    #[serde(rename = "DEBAR_TO_DATE")]
    debar_to_date: Option<String>,
    #[serde(rename = "DEBAR_REASON")]
    debar_reason: Option<String>,
}

pub struct WorldbankFeedAdapter {
    config: WorldbankConfig,
    http: HttpClient,
}

impl WorldbankFeedAdapter {
    pub fn new(config: WorldbankConfig, timeout: Duration) -> Self {
        Self {
            config,
            http: HttpClient::new(timeout),
        }
    }
}

#[async_trait]
impl SourceAdapter for WorldbankFeedAdapter {
    fn source(&self) -> Source {
        Source::Worldbank
    }

    async fn search(&self, name: &str) -> Result<Vec<Record>, ScreenError> {
        let resp = self
            .http
            .get(&self.config.feed_url, &self.config.headers)
            .await
            .map_err(|e| ScreenError::transport(Source::Worldbank, e))?;

        if resp.status != 200 {
            return Err(ScreenError::upstream(
                Source::Worldbank,
                resp.status,
                &resp.body,
            ));
        }

        let entries = extract_entries(&resp.body, &self.config.feed_key);
        let total = entries.len();
        let records = filter_entries(entries, name);
        debug!(
            feed_size = total,
            hits = records.len(),
            "firm-sanctions feed filtered"
        );
        Ok(records)
    }
}

/// Pull the firm list out of `response.<feed_key>`.
///
/// Any absent path segment or non-list value defaults to an empty list.
/// Entries that are not objects are dropped, same policy as malformed
/// table rows elsewhere.
fn extract_entries(body: &str, feed_key: &str) -> Vec<FeedEntry> {
    let v: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => return Vec::new(),
    };
    v.get("response")
        .and_then(|r| r.get(feed_key))
        .and_then(|z| z.as_array())
        .map(|entries| {
            entries
                .iter()
                .filter_map(|e| serde_json::from_value(e.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Keep the firms whose name contains the query, case-insensitively.
///
/// No cap: this source returns every match in the feed.
fn filter_entries(entries: Vec<FeedEntry>, query: &str) -> Vec<Record> {
    let needle = query.trim().to_lowercase();
    entries
        .into_iter()
        .filter(|e| {
            e.supp_name
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(&needle))
        })
        .map(|e| {
            Record::DebarredFirm(DebarredFirm {
                firm_name: e.supp_name,
                address: e.supp_addr,
                country: e.country_name,
                from_date: e.debar_from_date,
                to_date: e.debar_to_date,
                grounds: e.debar_reason,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"{
        "response": {
            "ZPROCSUPP": [
                {
                    "SUPP_NAME": "Acme Holdings",
                    "SUPP_ADDR": "12 Harbour Rd",
                    "COUNTRY_NAME": "Panama",
                    "DEBAR_FROM_DATE": "2021-03-01",
                    "DEBAR_TO_DATE": "2026-03-01",
                    "DEBAR_REASON": "Fraudulent practice"
                },
                {
                    "SUPP_NAME": "Beta LLC",
                    "COUNTRY_NAME": "Kenya"
                }
            ]
        }
    }"#;

    #[test]
    fn test_filter_retains_substring_matches_only() {
        let entries = extract_entries(FEED, "ZPROCSUPP");
        assert_eq!(entries.len(), 2);
        let records = filter_entries(entries, "acme");
        assert_eq!(records.len(), 1);
        match &records[0] {
            Record::DebarredFirm(f) => {
                assert_eq!(f.firm_name.as_deref(), Some("Acme Holdings"));
                assert_eq!(f.grounds.as_deref(), Some("Fraudulent practice"));
            }
            other => panic!("expected DebarredFirm record, got {other:?}"),
        }
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let entries = extract_entries(FEED, "ZPROCSUPP");
        assert_eq!(filter_entries(entries, "ACME").len(), 1);
    }

    #[test]
    fn test_query_whitespace_trimmed_before_matching() {
        let entries = extract_entries(FEED, "ZPROCSUPP");
        assert_eq!(filter_entries(entries, "  acme  ").len(), 1);
    }

    #[test]
    fn test_substring_matches_anywhere_in_name() {
        let entries = extract_entries(FEED, "ZPROCSUPP");
        assert_eq!(filter_entries(entries, "holdings").len(), 1);
    }

    #[test]
    fn test_no_match_is_empty() {
        let entries = extract_entries(FEED, "ZPROCSUPP");
        assert!(filter_entries(entries, "gamma").is_empty());
    }

    #[test]
    fn test_entry_without_name_never_matches() {
        let body = r#"{"response": {"ZPROCSUPP": [{"COUNTRY_NAME": "Chad"}]}}"#;
        let entries = extract_entries(body, "ZPROCSUPP");
        assert_eq!(entries.len(), 1);
        assert!(filter_entries(entries, "chad").is_empty());
    }

    #[test]
    fn test_absent_path_defaults_to_empty_list() {
        assert!(extract_entries(r#"{"response": {}}"#, "ZPROCSUPP").is_empty());
        assert!(extract_entries(r#"{}"#, "ZPROCSUPP").is_empty());
        assert!(extract_entries(r#"{"response": {"ZPROCSUPP": "oops"}}"#, "ZPROCSUPP").is_empty());
    }

    #[test]
    fn test_absent_fields_stay_absent() {
        let entries = extract_entries(FEED, "ZPROCSUPP");
        let records = filter_entries(entries, "beta");
        match &records[0] {
            Record::DebarredFirm(f) => {
                assert_eq!(f.firm_name.as_deref(), Some("Beta LLC"));
                assert!(f.address.is_none());
                assert!(f.from_date.is_none());
            }
            other => panic!("expected DebarredFirm record, got {other:?}"),
        }
    }
}
