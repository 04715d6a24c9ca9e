//! Legal citation types for Casebook.
//!
//! Citations are static reference data: the catalog is filtered and scored
//! at runtime but entries are never created or destroyed by the app.

use serde::{Deserialize, Serialize};

/// A legal citation with reporter string and court metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub id: String,
    pub title: String,
    /// Reporter string, e.g. "347 U.S. 483".
    pub citation: String,
    pub year: i32,
    pub court: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Optional filters over a citation list. All supplied filters are
/// AND-combined; each is a no-op when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CitationFilter {
    /// Exact court name match.
    pub court: Option<String>,
    /// Inclusive (min, max) year bounds.
    pub year_range: Option<(i32, i32)>,
    /// Case-insensitive substring over title, summary, and court.
    pub search_term: Option<String>,
}
