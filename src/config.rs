//! Static per-source configuration.
//!
//! Endpoints, header blocks, and result caps are data, not code: each
//! adapter receives its block at construction and never reaches for a
//! global. The World Bank `apikey` below ships embedded in the public
//! project pages and is sent with every feed request; it is upstream-site
//! configuration, not a secret this service manages.

use std::time::Duration;

/// Per-request timeout applied to every upstream exchange.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default result cap for the sources that accept one.
pub const DEFAULT_RESULT_CAP: usize = 50;

const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                          AppleWebKit/537.36 (KHTML, like Gecko) \
                          Chrome/140.0.0.0 Safari/537.36";

/// Which protocol serves the offshore registry.
///
/// The registry is reachable both through its reconciliation API and by
/// scraping its search page. The API is authoritative; the page variant is
/// kept for when the API is unavailable. Exactly one is active for the
/// `offshore` identifier at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffshoreProtocol {
    #[default]
    Api,
    Page,
}

/// Offshore registry endpoints (reconciliation API and search page).
#[derive(Debug, Clone)]
pub struct OffshoreConfig {
    pub protocol: OffshoreProtocol,
    pub api_url: String,
    pub page_url: String,
    pub result_cap: usize,
    pub headers: Vec<(String, String)>,
}

impl Default for OffshoreConfig {
    fn default() -> Self {
        Self {
            protocol: OffshoreProtocol::default(),
            api_url: "https://offshoreleaks.icij.org/api/v1/reconcile".to_string(),
            page_url: "https://offshoreleaks.icij.org/search".to_string(),
            result_cap: DEFAULT_RESULT_CAP,
            headers: vec![
                ("User-Agent".to_string(), "Mozilla/5.0".to_string()),
                ("Accept".to_string(), "application/json".to_string()),
            ],
        }
    }
}

/// Firm-sanctions feed endpoint and its fixed header block.
#[derive(Debug, Clone)]
pub struct WorldbankConfig {
    pub feed_url: String,
    /// Key of the firm list inside the feed's `response` object.
    pub feed_key: String,
    pub headers: Vec<(String, String)>,
}

impl Default for WorldbankConfig {
    fn default() -> Self {
        Self {
            feed_url: "https://apigwext.worldbank.org/dvsvc/v1.0/json/APPLICATION\
                       /ADOBE_EXPRNCE_MGR/FIRM/SANCTIONED_FIRM"
                .to_string(),
            feed_key: "ZPROCSUPP".to_string(),
            headers: vec![
                (
                    "accept".to_string(),
                    "application/json, text/javascript, */*; q=0.01".to_string(),
                ),
                ("accept-language".to_string(), "en-US,en;q=0.9".to_string()),
                (
                    "apikey".to_string(),
                    "z9duUaFUiEUYSHs97CU38fcZO7ipOPvm".to_string(),
                ),
                (
                    "content-type".to_string(),
                    "application/json; charset=utf-8".to_string(),
                ),
                (
                    "origin".to_string(),
                    "https://projects.worldbank.org".to_string(),
                ),
                (
                    "referer".to_string(),
                    "https://projects.worldbank.org/".to_string(),
                ),
                ("user-agent".to_string(), BROWSER_UA.to_string()),
            ],
        }
    }
}

/// Landing page of the consolidated sanctions search form.
#[derive(Debug, Clone)]
pub struct OfacConfig {
    pub landing_url: String,
    pub result_cap: usize,
    pub headers: Vec<(String, String)>,
}

impl Default for OfacConfig {
    fn default() -> Self {
        Self {
            landing_url: "https://sanctionssearch.ofac.treas.gov/".to_string(),
            result_cap: DEFAULT_RESULT_CAP,
            headers: vec![("User-Agent".to_string(), BROWSER_UA.to_string())],
        }
    }
}

/// Everything the coordinator needs to build its adapters, assembled once
/// at startup.
#[derive(Debug, Clone)]
pub struct ScreeningConfig {
    pub offshore: OffshoreConfig,
    pub worldbank: WorldbankConfig,
    pub ofac: OfacConfig,
    /// Per-request timeout for every outbound exchange.
    pub timeout: Duration,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            offshore: OffshoreConfig::default(),
            worldbank: WorldbankConfig::default(),
            ofac: OfacConfig::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
