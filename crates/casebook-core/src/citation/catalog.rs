//! Keyword search and filtering over the citation catalog.

use std::collections::BTreeSet;

use chrono::{Datelike, Utc};

use casebook_types::citation::{Citation, CitationFilter};

use crate::topic::TopicExtractor;

use super::data::builtin_citations;

/// Number of entries returned when a search has nothing better to show.
pub const DEFAULT_RESULT_COUNT: usize = 3;

/// A searchable collection of legal citations.
pub struct CitationCatalog {
    entries: Vec<Citation>,
    extractor: TopicExtractor,
}

impl CitationCatalog {
    /// Catalog over the built-in landmark cases.
    pub fn builtin() -> Self {
        Self::new(builtin_citations())
    }

    /// Catalog over caller-supplied entries.
    pub fn new(entries: Vec<Citation>) -> Self {
        Self {
            entries,
            extractor: TopicExtractor::citation(),
        }
    }

    pub fn entries(&self) -> &[Citation] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Citations whose title, summary, or court contains at least one query
    /// keyword (case-insensitive substring, not topic overlap).
    ///
    /// A blank query, or one that matches nothing, falls back to the first
    /// three catalog entries so callers never render a dead-end result list.
    pub fn search(&self, query: &str) -> Vec<Citation> {
        let default_results = || {
            self.entries
                .iter()
                .take(DEFAULT_RESULT_COUNT)
                .cloned()
                .collect()
        };

        if query.trim().is_empty() {
            return default_results();
        }

        let keywords = self.extractor.extract(query);
        let matches: Vec<Citation> = self
            .entries
            .iter()
            .filter(|citation| {
                let text = haystack(citation);
                keywords.iter().any(|keyword| text.contains(keyword.as_str()))
            })
            .cloned()
            .collect();

        if matches.is_empty() {
            default_results()
        } else {
            matches
        }
    }
}

/// Apply the supplied filters, AND-combined. Each absent filter is a no-op.
pub fn filter<'a>(citations: &'a [Citation], criteria: &CitationFilter) -> Vec<&'a Citation> {
    let needle = criteria.search_term.as_deref().map(str::to_lowercase);

    citations
        .iter()
        .filter(|citation| {
            if let Some(court) = criteria.court.as_deref() {
                if citation.court != court {
                    return false;
                }
            }
            if let Some((min, max)) = criteria.year_range {
                if citation.year < min || citation.year > max {
                    return false;
                }
            }
            if let Some(needle) = needle.as_deref() {
                if !haystack(citation).contains(needle) {
                    return false;
                }
            }
            true
        })
        .collect()
}

/// Distinct court names, sorted.
pub fn available_courts(citations: &[Citation]) -> BTreeSet<String> {
    citations.iter().map(|c| c.court.clone()).collect()
}

/// Inclusive (min, max) year bounds across `citations`.
///
/// `max` is clamped up to the current calendar year so year-range controls
/// stay usable over stale data. An empty slice yields (current, current).
pub fn year_bounds(citations: &[Citation]) -> (i32, i32) {
    let current_year = Utc::now().year();
    let min = citations.iter().map(|c| c.year).min().unwrap_or(current_year);
    let max = citations
        .iter()
        .map(|c| c.year)
        .max()
        .unwrap_or(current_year)
        .max(current_year);
    (min, max)
}

fn haystack(citation: &Citation) -> String {
    format!(
        "{} {} {}",
        citation.title,
        citation.summary.as_deref().unwrap_or(""),
        citation.court
    )
    .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: &str, title: &str, year: i32, court: &str) -> Citation {
        Citation {
            id: id.to_string(),
            title: title.to_string(),
            citation: format!("{year} Test 1"),
            year,
            court: court.to_string(),
            url: None,
            summary: None,
        }
    }

    #[test]
    fn test_blank_search_returns_first_three() {
        let catalog = CitationCatalog::builtin();
        let results = catalog.search("");

        assert_eq!(results.len(), DEFAULT_RESULT_COUNT);
        for (result, entry) in results.iter().zip(catalog.entries()) {
            assert_eq!(result.id, entry.id);
        }
    }

    #[test]
    fn test_unmatched_search_falls_back_to_default() {
        let catalog = CitationCatalog::builtin();
        let results = catalog.search("zzzznonexistentterm");

        assert_eq!(results.len(), DEFAULT_RESULT_COUNT);
        assert_eq!(results[0].id, catalog.entries()[0].id);
    }

    #[test]
    fn test_stop_word_only_query_falls_back_to_default() {
        let catalog = CitationCatalog::builtin();
        // Every token is either a citation stop word or too short.
        assert_eq!(catalog.search("the and or of").len(), DEFAULT_RESULT_COUNT);
    }

    #[test]
    fn test_search_matches_title_case_insensitively() {
        let catalog = CitationCatalog::builtin();
        let results = catalog.search("MIRANDA");
        assert!(results.iter().any(|c| c.id == "miranda-1966"));
    }

    #[test]
    fn test_search_matches_summary_and_court() {
        let catalog = CitationCatalog::builtin();

        // "jurisdiction" appears only in a summary.
        let results = catalog.search("jurisdiction");
        assert!(results.iter().any(|c| c.id == "intlshoe-1945"));

        // "exchequer" appears only in a court name.
        let results = catalog.search("exchequer");
        assert!(results.iter().any(|c| c.id == "hadley-1854"));
    }

    #[test]
    fn test_search_any_keyword_suffices() {
        let catalog = CitationCatalog::builtin();
        // "zzzz" matches nothing, "segregation" matches Brown.
        let results = catalog.search("zzzz segregation");
        assert!(results.iter().any(|c| c.id == "brown-1954"));
    }

    #[test]
    fn test_filter_by_year_range_is_inclusive() {
        let citations = vec![
            sample("a", "Case A", 2018, "Court X"),
            sample("b", "Case B", 2019, "Court X"),
            sample("c", "Case C", 2020, "Court X"),
        ];

        let criteria = CitationFilter {
            year_range: Some((2019, 2019)),
            ..Default::default()
        };
        let results = filter(&citations, &criteria);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].year, 2019);
    }

    #[test]
    fn test_filter_by_court_is_exact() {
        let catalog = CitationCatalog::builtin();
        let criteria = CitationFilter {
            court: Some("New York Court of Appeals".to_string()),
            ..Default::default()
        };

        let results = filter(catalog.entries(), &criteria);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "palsgraf-1928");
    }

    #[test]
    fn test_filter_combines_criteria() {
        let catalog = CitationCatalog::builtin();
        let criteria = CitationFilter {
            court: Some("Supreme Court of the United States".to_string()),
            year_range: Some((1950, 1970)),
            search_term: Some("schools".to_string()),
        };

        let results = filter(catalog.entries(), &criteria);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "brown-1954");
    }

    #[test]
    fn test_filter_without_criteria_keeps_everything() {
        let catalog = CitationCatalog::builtin();
        let results = filter(catalog.entries(), &CitationFilter::default());
        assert_eq!(results.len(), catalog.len());
    }

    #[test]
    fn test_available_courts_deduplicates() {
        let catalog = CitationCatalog::builtin();
        let courts = available_courts(catalog.entries());

        assert_eq!(courts.len(), 4);
        assert!(courts.contains("Supreme Court of the United States"));
        assert!(courts.contains("House of Lords"));
    }

    #[test]
    fn test_year_bounds_clamp_to_current_year() {
        let catalog = CitationCatalog::builtin();
        let (min, max) = year_bounds(catalog.entries());

        assert_eq!(min, 1803);
        // Newest builtin entry is 2017, so the clamp always kicks in.
        assert_eq!(max, Utc::now().year());
    }

    #[test]
    fn test_year_bounds_of_empty_slice() {
        let current = Utc::now().year();
        assert_eq!(year_bounds(&[]), (current, current));
    }
}
