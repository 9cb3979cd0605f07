//! Rendered-Page Adapter for the offshore registry search page.
//!
//! Alternate protocol for the same registry as [`super::offshore_api`]:
//! a parameterized GET whose results come back as a server-rendered HTML
//! table. Selected by configuration; never active alongside the API for
//! the same source identifier.

use crate::config::OffshoreConfig;
use crate::error::ScreenError;
use crate::screen::result::{Record, RegistryRow};
use crate::screen::Source;
use crate::sources::SourceAdapter;
use crate::transport::HttpClient;
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::debug;

/// Rows of the search results table. The page renders no table at all for
/// an empty result set.
const RESULTS_ROW_SELECTOR: &str = "table.search__results__table tbody tr";

/// Entity, jurisdiction, linked-to, data-from. Shorter rows are layout
/// artifacts, not hits.
const ROW_MIN_CELLS: usize = 4;

pub struct OffshorePageAdapter {
    config: OffshoreConfig,
    http: HttpClient,
}

impl OffshorePageAdapter {
    pub fn new(config: OffshoreConfig, timeout: Duration) -> Self {
        Self {
            config,
            http: HttpClient::new(timeout),
        }
    }

    /// Build the search URL. Form encoding is deliberate: the upstream
    /// expects spaces in the query as `+`.
    fn search_url(&self, name: &str) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("q", name)
            .append_pair("size", &self.config.result_cap.to_string())
            .finish();
        format!("{}?{}", self.config.page_url, query)
    }
}

#[async_trait]
impl SourceAdapter for OffshorePageAdapter {
    fn source(&self) -> Source {
        Source::Offshore
    }

    async fn search(&self, name: &str) -> Result<Vec<Record>, ScreenError> {
        let url = self.search_url(name);
        let resp = self
            .http
            .get(&url, &self.config.headers)
            .await
            .map_err(|e| ScreenError::transport(Source::Offshore, e))?;

        if resp.status != 200 {
            return Err(ScreenError::upstream(
                Source::Offshore,
                resp.status,
                &resp.body,
            ));
        }

        let records = parse_results(&resp.body, self.config.result_cap);
        debug!(hits = records.len(), "registry page search complete");
        Ok(records)
    }
}

/// Extract result rows from the rendered search page.
///
/// A missing results table is the page's empty state: zero hits, not an
/// error. Rows with fewer than four cells are dropped and the scan
/// continues; retained rows stop at the cap.
fn parse_results(html: &str, cap: usize) -> Vec<Record> {
    let document = Html::parse_document(html);
    let row_sel = Selector::parse(RESULTS_ROW_SELECTOR).unwrap();
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
        records.push(Record::Registry(RegistryRow {
            entity: cells[0].clone(),
            jurisdiction: cells[1].clone(),
            linked_to: cells[2].clone(),
            data_from: cells[3].clone(),
        }));
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OffshoreConfig;

    fn adapter() -> OffshorePageAdapter {
        OffshorePageAdapter::new(OffshoreConfig::default(), Duration::from_secs(30))
    }

    #[test]
    fn test_search_url_encodes_spaces_as_plus() {
        let url = adapter().search_url("Acme Holding Corp");
        assert!(url.contains("q=Acme+Holding+Corp"));
        assert!(url.contains("size=50"));
    }

    #[test]
    fn test_parse_results_extracts_trimmed_cells() {
        let html = r#"
        <html><body>
        <table class="search__results__table">
          <tbody>
            <tr>
              <td>  Acme Holdings Ltd </td>
              <td>Bermuda</td>
              <td> Panama Papers </td>
              <td>Mossack Fonseca</td>
            </tr>
            <tr>
              <td>Acme Overseas SA</td>
              <td>Bahamas</td>
              <td>Bahamas Leaks</td>
              <td>Registry</td>
            </tr>
          </tbody>
        </table>
        </body></html>
        "#;
        let records = parse_results(html, 50);
        assert_eq!(records.len(), 2);
        match &records[0] {
            Record::Registry(r) => {
                assert_eq!(r.entity, "Acme Holdings Ltd");
                assert_eq!(r.jurisdiction, "Bermuda");
                assert_eq!(r.linked_to, "Panama Papers");
                assert_eq!(r.data_from, "Mossack Fonseca");
            }
            other => panic!("expected Registry record, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_table_is_zero_hits() {
        let html = "<html><body><p>No results found.</p></body></html>";
        assert!(parse_results(html, 50).is_empty());
    }

    #[test]
    fn test_short_rows_dropped() {
        let html = r#"
        <table class="search__results__table"><tbody>
          <tr><td>Acme</td><td>Bermuda</td><td>Leak</td><td>Registry</td></tr>
          <tr><td colspan="4">Load more</td></tr>
          <tr><td>Beta</td><td>Panama</td><td>Leak</td><td>Registry</td></tr>
        </tbody></table>
        "#;
        let records = parse_results(html, 50);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_cap_limits_retained_rows() {
        let rows: String = (0..10)
            .map(|i| format!("<tr><td>E{i}</td><td>J</td><td>L</td><td>D</td></tr>"))
            .collect();
        let html = format!(r#"<table class="search__results__table"><tbody>{rows}</tbody></table>"#);
        assert_eq!(parse_results(&html, 3).len(), 3);
    }
}
