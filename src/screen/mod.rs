//! Screening coordinator: one request, one source, one adapter.

pub mod result;

use crate::config::{OffshoreProtocol, ScreeningConfig};
use crate::error::ScreenError;
use crate::sources::offshore_api::OffshoreApiAdapter;
use crate::sources::offshore_page::OffshorePageAdapter;
use crate::sources::ofac_form::OfacFormAdapter;
use crate::sources::worldbank_feed::WorldbankFeedAdapter;
use crate::sources::SourceAdapter;
use self::result::ScreeningResult;
use serde::Serialize;
use std::fmt;
use tracing::info;

/// One external list/registry the service can query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Offshore,
    Worldbank,
    Ofac,
}

impl Source {
    /// Parse a caller-supplied source identifier.
    pub fn parse(s: &str) -> Result<Self, ScreenError> {
        match s {
            "offshore" => Ok(Self::Offshore),
            "worldbank" => Ok(Self::Worldbank),
            "ofac" => Ok(Self::Ofac),
            other => Err(ScreenError::InvalidSource(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Offshore => "offshore",
            Self::Worldbank => "worldbank",
            Self::Ofac => "ofac",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// `ScreenError` variants carry a field named `source`, which thiserror
// treats as the error source and therefore requires to be `Error`.
impl std::error::Error for Source {}

/// Dispatches screening requests to exactly one source adapter.
///
/// Holds no state across calls and does no local recovery: an adapter's
/// result or error is relayed to the caller verbatim. The offshore
/// identifier routes to whichever protocol the configuration selected —
/// never both.
pub struct Screener {
    offshore_api: OffshoreApiAdapter,
    offshore_page: OffshorePageAdapter,
    ofac: OfacFormAdapter,
    worldbank: WorldbankFeedAdapter,
    offshore_protocol: OffshoreProtocol,
}

impl Screener {
    pub fn new(config: ScreeningConfig) -> Self {
        let timeout = config.timeout;
        Self {
            offshore_protocol: config.offshore.protocol,
            offshore_api: OffshoreApiAdapter::new(config.offshore.clone(), timeout),
            offshore_page: OffshorePageAdapter::new(config.offshore, timeout),
            ofac: OfacFormAdapter::new(config.ofac, timeout),
            worldbank: WorldbankFeedAdapter::new(config.worldbank, timeout),
        }
    }

    /// Screen a name against one source.
    ///
    /// Fails with `InvalidSource` for an identifier outside the recognized
    /// set and `EmptyQuery` for a blank name; otherwise triggers exactly
    /// one adapter exchange and wraps its rows in the shared envelope.
    pub async fn screen(&self, name: &str, source: &str) -> Result<ScreeningResult, ScreenError> {
        let source = Source::parse(source)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ScreenError::EmptyQuery);
        }

        let adapter: &dyn SourceAdapter = match source {
            Source::Offshore => match self.offshore_protocol {
                OffshoreProtocol::Api => &self.offshore_api,
                OffshoreProtocol::Page => &self.offshore_page,
            },
            Source::Worldbank => &self.worldbank,
            Source::Ofac => &self.ofac,
        };

        let records = adapter.search(name).await?;
        info!(source = %source, hits = records.len(), "screening complete");
        Ok(ScreeningResult::new(source, records))
    }
}
