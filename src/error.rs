//! Error taxonomy for the screening core.
//!
//! Every adapter either returns a complete row set or fails with one of
//! these. There is no retry layer anywhere: a failed or timed-out upstream
//! exchange is surfaced to the caller with enough detail to diagnose it.

use crate::screen::Source;
use thiserror::Error;

/// How much of an upstream error body to keep. Diagnostics, not archival.
const BODY_SNIPPET_LEN: usize = 256;

#[derive(Debug, Error)]
pub enum ScreenError {
    /// Caller supplied a source identifier outside the recognized set.
    #[error("invalid source: {0:?}")]
    InvalidSource(String),

    /// Caller supplied an empty or whitespace-only query name.
    #[error("query name must not be empty")]
    EmptyQuery,

    /// An upstream list returned a non-success HTTP status. Never converted
    /// to a zero-hit success.
    #[error("{source} upstream returned status {status}: {body}")]
    Upstream {
        source: Source,
        status: u16,
        body: String,
    },

    /// The upstream response no longer matches the structure the adapter
    /// expects. Distinct from [`ScreenError::Upstream`] because the
    /// remediation differs: the scraper needs fixing, not the network.
    #[error("{source} protocol error: {reason}")]
    Protocol { source: Source, reason: String },

    /// Transport-level failure (connect, TLS, timeout). A timeout is
    /// treated the same as any other transport failure.
    #[error("{source} transport failure: {error}")]
    Transport {
        source: Source,
        #[source]
        error: reqwest::Error,
    },
}

impl ScreenError {
    /// Build an upstream error, truncating the body to a snippet.
    pub fn upstream(source: Source, status: u16, body: &str) -> Self {
        Self::Upstream {
            source,
            status,
            body: snippet(body),
        }
    }

    pub fn transport(source: Source, error: reqwest::Error) -> Self {
        Self::Transport { source, error }
    }

    /// HTTP status the transport shim should answer with.
    ///
    /// The worldbank feed relays its upstream status as-is; every other
    /// failure maps to 400 (caller fault) or 502 (gateway fault).
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidSource(_) | Self::EmptyQuery => 400,
            Self::Upstream {
                source: Source::Worldbank,
                status,
                ..
            } => *status,
            Self::Upstream { .. } | Self::Protocol { .. } | Self::Transport { .. } => 502,
        }
    }
}

/// Trim and truncate an upstream body on a char boundary.
fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.len() <= BODY_SNIPPET_LEN {
        return trimmed.to_string();
    }
    let mut end = BODY_SNIPPET_LEN;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &trimmed[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_source_maps_to_400() {
        let e = ScreenError::InvalidSource("unknown".to_string());
        assert_eq!(e.http_status(), 400);
        let e = ScreenError::EmptyQuery;
        assert_eq!(e.http_status(), 400);
    }

    #[test]
    fn test_upstream_normalizes_to_gateway_error() {
        let e = ScreenError::upstream(Source::Offshore, 503, "unavailable");
        assert_eq!(e.http_status(), 502);
        let e = ScreenError::upstream(Source::Ofac, 500, "oops");
        assert_eq!(e.http_status(), 502);
    }

    #[test]
    fn test_worldbank_upstream_status_relayed() {
        let e = ScreenError::upstream(Source::Worldbank, 429, "slow down");
        assert_eq!(e.http_status(), 429);
    }

    #[test]
    fn test_protocol_error_maps_to_gateway_error() {
        let e = ScreenError::Protocol {
            source: Source::Ofac,
            reason: "token extraction failed".to_string(),
        };
        assert_eq!(e.http_status(), 502);
    }

    #[test]
    fn test_body_snippet_truncated() {
        let long = "x".repeat(1000);
        let e = ScreenError::upstream(Source::Offshore, 500, &long);
        match e {
            ScreenError::Upstream { body, .. } => {
                assert!(body.len() <= BODY_SNIPPET_LEN + 3);
                assert!(body.ends_with("..."));
            }
            _ => panic!("expected Upstream"),
        }
    }

    #[test]
    fn test_body_snippet_trimmed() {
        let e = ScreenError::upstream(Source::Offshore, 500, "  short body \n");
        match e {
            ScreenError::Upstream { body, .. } => assert_eq!(body, "short body"),
            _ => panic!("expected Upstream"),
        }
    }
}
