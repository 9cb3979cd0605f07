//! Normalized screening output.
//!
//! The envelope is shared across sources; the rows are not. Each list
//! exposes different facts, so rows are a union of per-source record types
//! rather than one flattened schema that would silently drop fields.
//! Serialized field names match what each upstream calls the data.

use crate::screen::Source;
use serde::Serialize;

/// One normalized hit.
///
/// The variant matches the source that produced it; every record in a
/// single result set is the same variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Entity(EntityCandidate),
    Registry(RegistryRow),
    Sdn(SdnRow),
    DebarredFirm(DebarredFirm),
}

/// Candidate returned by the offshore reconciliation API.
///
/// Passed through verbatim: a field the upstream omitted stays absent in
/// the serialized record instead of being defaulted to an empty string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityCandidate {
    #[serde(rename = "Entity", skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Match score as the upstream sent it — usually a number, but kept as
    /// raw JSON so a non-numeric score still passes through untouched.
    #[serde(rename = "Score", skip_serializing_if = "Option::is_none")]
    pub score: Option<serde_json::Value>,
    #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Row scraped from the offshore registry's rendered search table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistryRow {
    #[serde(rename = "Entity")]
    pub entity: String,
    #[serde(rename = "Jurisdiction")]
    pub jurisdiction: String,
    #[serde(rename = "Linked To")]
    pub linked_to: String,
    #[serde(rename = "Data From")]
    pub data_from: String,
}

/// Row scraped from the consolidated sanctions search results grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SdnRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Type")]
    pub entity_type: String,
    #[serde(rename = "Program")]
    pub program: String,
    #[serde(rename = "List")]
    pub list: String,
    #[serde(rename = "Score")]
    pub score: String,
}

/// Firm entry from the firm-sanctions feed that matched the query locally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebarredFirm {
    #[serde(rename = "Firm Name", skip_serializing_if = "Option::is_none")]
    pub firm_name: Option<String>,
    #[serde(rename = "Address", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "Country", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(rename = "From Date", skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,
    #[serde(rename = "To Date", skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,
    #[serde(rename = "Grounds", skip_serializing_if = "Option::is_none")]
    pub grounds: Option<String>,
}

/// Response envelope for one screening call. `hits` always equals
/// `results.len()`; construct through [`ScreeningResult::new`] to keep it
/// that way.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningResult {
    pub source: Source,
    pub hits: usize,
    pub results: Vec<Record>,
}

impl ScreeningResult {
    pub fn new(source: Source, results: Vec<Record>) -> Self {
        Self {
            source,
            hits: results.len(),
            results,
        }
    }
}
