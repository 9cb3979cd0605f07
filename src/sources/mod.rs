//! Per-source adapters translating each list's native protocol into rows.
//!
//! Four protocols, one contract: a structured reconciliation API
//! ([`offshore_api`]), a server-rendered search page ([`offshore_page`]),
//! a two-phase stateful web form ([`ofac_form`]) and a bulk JSON feed
//! filtered locally ([`worldbank_feed`]).

pub mod offshore_api;
pub mod offshore_page;
pub mod ofac_form;
pub mod worldbank_feed;

use crate::error::ScreenError;
use crate::screen::result::Record;
use crate::screen::Source;
use async_trait::async_trait;

/// One external list behind a uniform contract.
///
/// An adapter owns the full exchange with its source: request shaping,
/// session handling where the source demands one, and extraction of rows
/// from whatever shape comes back. It returns either a complete row set or
/// an error — never a partial success. Malformed individual rows are not
/// errors; they are dropped and extraction continues.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Which source this adapter serves.
    fn source(&self) -> Source;

    /// Run one search for `name` against the source.
    async fn search(&self, name: &str) -> Result<Vec<Record>, ScreenError>;
}
