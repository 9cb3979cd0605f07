//! Stateful-Form Adapter for the consolidated sanctions search form.
//!
//! The upstream is a server-rendered ASP.NET form, not an API, so a search
//! has to impersonate a browser through two phases: a priming GET that
//! harvests the per-session view-state tokens, then a form POST that
//! replays those tokens over the same cookie session. The server ties the
//! tokens to the session established by the priming GET — replaying them
//! on a fresh session gets the submission rejected or silently ignored.
//!
//! The flow moves through explicit states: not started, tokens fetched,
//! submitted, parsed. All session state (cookie jar included) lives for
//! exactly one screening call.

use crate::config::OfacConfig;
use crate::error::ScreenError;
use crate::screen::result::{Record, SdnRow};
use crate::screen::Source;
use crate::sources::SourceAdapter;
use crate::transport::HttpClient;
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::debug;

const VIEWSTATE_ID: &str = "__VIEWSTATE";
const VIEWSTATE_GENERATOR_ID: &str = "__VIEWSTATEGENERATOR";
const RESULTS_TABLE_ID: &str = "gvSearchResults";

/// Name, address, type, program, list, score.
const ROW_MIN_CELLS: usize = 6;

/// Session tokens harvested from the priming page.
///
/// Single-use: the server binds them to the cookie session of the priming
/// GET, so they are extracted fresh for every call and never cached or
/// shared across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub view_state: String,
    pub view_state_generator: String,
}

pub struct OfacFormAdapter {
    config: OfacConfig,
    timeout: Duration,
}

impl OfacFormAdapter {
    pub fn new(config: OfacConfig, timeout: Duration) -> Self {
        Self { config, timeout }
    }

    /// Phase 1: prime the session and harvest the view-state tokens.
    async fn prime(&self, http: &HttpClient) -> Result<SessionToken, ScreenError> {
        let resp = http
            .get(&self.config.landing_url, &self.config.headers)
            .await
            .map_err(|e| ScreenError::transport(Source::Ofac, e))?;

        if resp.status != 200 {
            return Err(ScreenError::upstream(Source::Ofac, resp.status, &resp.body));
        }

        extract_tokens(&resp.body)
    }

    /// Phase 2: submit the search form, replaying the tokens over the
    /// primed session.
    async fn submit(
        &self,
        http: &HttpClient,
        token: &SessionToken,
        name: &str,
    ) -> Result<String, ScreenError> {
        let fields = form_fields(token, name, self.config.result_cap);
        let resp = http
            .post_form(&self.config.landing_url, &self.config.headers, &fields)
            .await
            .map_err(|e| ScreenError::transport(Source::Ofac, e))?;

        if resp.status != 200 {
            return Err(ScreenError::upstream(Source::Ofac, resp.status, &resp.body));
        }

        Ok(resp.body)
    }
}

#[async_trait]
impl SourceAdapter for OfacFormAdapter {
    fn source(&self) -> Source {
        Source::Ofac
    }

    async fn search(&self, name: &str) -> Result<Vec<Record>, ScreenError> {
        // Fresh cookie jar per call; dropped when the call returns.
        let http = HttpClient::with_session(self.timeout);
        let token = self.prime(&http).await?;
        let body = self.submit(&http, &token, name).await?;
        let records = parse_results(&body, self.config.result_cap);
        debug!(hits = records.len(), "sanctions form search complete");
        Ok(records)
    }
}

/// Pull both hidden view-state inputs out of the priming page.
///
/// Either input missing means the upstream page structure drifted and the
/// scraper needs fixing — a protocol error, not an upstream outage.
fn extract_tokens(html: &str) -> Result<SessionToken, ScreenError> {
    let document = Html::parse_document(html);
    match (
        hidden_input(&document, VIEWSTATE_ID),
        hidden_input(&document, VIEWSTATE_GENERATOR_ID),
    ) {
        (Some(view_state), Some(view_state_generator)) => Ok(SessionToken {
            view_state,
            view_state_generator,
        }),
        _ => Err(ScreenError::Protocol {
            source: Source::Ofac,
            reason: "token extraction failed".to_string(),
        }),
    }
}

fn hidden_input(document: &Html, id: &str) -> Option<String> {
    let sel = Selector::parse(&format!("input#{id}")).ok()?;
    document
        .select(&sel)
        .next()
        .and_then(|el| el.value().attr("value"))
        .map(|v| v.to_string())
}

/// Full form payload: the harvested tokens, the query as last name, every
/// other filter left blank, and the result-size slider at the cap.
fn form_fields(token: &SessionToken, name: &str, cap: usize) -> Vec<(String, String)> {
    vec![
        (VIEWSTATE_ID.to_string(), token.view_state.clone()),
        (
            VIEWSTATE_GENERATOR_ID.to_string(),
            token.view_state_generator.clone(),
        ),
        (
            "ctl00$MainContent$txtLastName".to_string(),
            name.to_string(),
        ),
        ("ctl00$MainContent$txtAddress".to_string(), String::new()),
        ("ctl00$MainContent$txtCity".to_string(), String::new()),
        ("ctl00$MainContent$txtState".to_string(), String::new()),
        ("ctl00$MainContent$txtID".to_string(), String::new()),
        ("ctl00$MainContent$ddlCountry".to_string(), "All".to_string()),
        ("ctl00$MainContent$ddlType".to_string(), "All".to_string()),
        ("ctl00$MainContent$Slider1".to_string(), cap.to_string()),
        (
            "ctl00$MainContent$Slider1_Boundcontrol".to_string(),
            cap.to_string(),
        ),
        ("ctl00$MainContent$btnSearch".to_string(), "Search".to_string()),
    ]
}

/// Extract result rows from the submitted page.
///
/// The results grid is absent entirely when nothing matched: zero hits,
/// not an error. Rows with fewer than six cells (including the header row,
/// which renders `<th>` cells) are dropped.
fn parse_results(html: &str, cap: usize) -> Vec<Record> {
    let document = Html::parse_document(html);
    let row_sel = Selector::parse(&format!("table#{RESULTS_TABLE_ID} tr")).unwrap();
    let cell_sel = Selector::parse("td").unwrap();

    let mut records = Vec::new();
    for row in document.select(&row_sel) {
        if records.len() >= cap {
            break;
        }
        let cells: Vec<String> = row
            .select(&cell_sel)
            .map(|td| td.text().collect::<String>().trim().to_string())
            .collect();
        if cells.len() < ROW_MIN_CELLS {
            continue;
        }
        records.push(Record::Sdn(SdnRow {
            name: cells[0].clone(),
            address: cells[1].clone(),
            entity_type: cells[2].clone(),
            program: cells[3].clone(),
            list: cells[4].clone(),
            score: cells[5].clone(),
        }));
    }
    records
}
