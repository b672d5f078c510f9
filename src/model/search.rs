//! Search state machine: browse vs. search mode and stale-response suppression.
//!
//! Every query edit and every dispatched search advances `latest_seq`. A
//! response is applied only if it carries the current `latest_seq`, so the
//! most recently committed query always wins, whatever order responses
//! settle in.

use super::movie::MovieSummary;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// Empty query; the three browse feeds are shown.
    #[default]
    Browsing,
    /// Query is non-empty and the debounce timer is running.
    PendingSearch,
    /// A search request is in flight.
    Searching,
    /// The latest search has settled.
    Results,
}

/// What a query edit requires from the controller
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryChange {
    /// Query is blank: cancel any timer, show the browse feeds.
    Cleared,
    /// (Re)start the debounce timer for the trimmed query.
    Debounce(String),
}

/// A search that has been committed and should be sent to the API
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub query: String,
}

#[derive(Clone, Debug, Default)]
pub struct SearchState {
    pub query: String,
    pub committed_query: Option<String>,
    pub results: Vec<MovieSummary>,
    pub mode: SearchMode,
    pub latest_seq: u64,
    pub last_error: Option<String>,
}

impl SearchState {
    pub fn is_searching(&self) -> bool {
        self.mode != SearchMode::Browsing
    }

    pub fn is_loading(&self) -> bool {
        self.mode == SearchMode::Searching
    }

    /// Records a new raw query. Whitespace-only text counts as empty.
    pub fn set_query(&mut self, text: String) -> QueryChange {
        self.query = text;
        // Anything in flight was started for older text.
        self.latest_seq += 1;

        let trimmed = self.query.trim();
        if trimmed.is_empty() {
            self.mode = SearchMode::Browsing;
            self.results.clear();
            self.committed_query = None;
            self.last_error = None;
            QueryChange::Cleared
        } else {
            // Previous results stay visible while the timer runs.
            self.mode = SearchMode::PendingSearch;
            QueryChange::Debounce(trimmed.to_string())
        }
    }

    /// Called when the debounce timer fires. Returns `None` if the query was
    /// cleared in the meantime or no longer matches what the timer was started for.
    pub fn commit(&mut self, query: &str) -> Option<SearchTicket> {
        let current = self.query.trim();
        if current.is_empty() || current != query {
            return None;
        }

        self.latest_seq += 1;
        self.mode = SearchMode::Searching;
        self.committed_query = Some(query.to_string());
        Some(SearchTicket {
            seq: self.latest_seq,
            query: query.to_string(),
        })
    }

    /// Applies a settled search. Returns `false` (and changes nothing) for stale responses.
    pub fn apply_response(
        &mut self,
        seq: u64,
        response: Result<Vec<MovieSummary>, String>,
    ) -> bool {
        if seq != self.latest_seq || self.mode == SearchMode::Browsing {
            return false;
        }

        match response {
            Ok(results) => {
                self.results = results;
                self.last_error = None;
            }
            Err(e) => {
                self.results.clear();
                self.last_error = Some(e);
            }
        }
        self.mode = SearchMode::Results;
        true
    }
}
