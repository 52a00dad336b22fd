use super::catalog::{CareerRecord, StoryCatalog};
use super::highlight::fold_case;
use serde::Serialize;

/// Upper bound on the number of stories returned for one query.
pub const MAX_RESULTS: usize = 6;

/// Shortcuts shown under the search bar while it is empty. Choosing one searches its
/// lowercased form.
pub const POPULAR_SEARCHES: [&str; 5] = [
    "Developer",
    "Chef",
    "Photography",
    "Content Creator",
    "Designer",
];

/// Hints displayed alongside a query that matched nothing.
pub const NO_RESULT_HINTS: [&str; 5] = [
    "developer",
    "chef",
    "photographer",
    "content creator",
    "designer",
];

/// Result of one search. An empty query is distinct from a query with no matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<'a> {
    NoQuery,
    Matches {
        query: String,
        /// The query as typed, trimmed but with its case kept.
        typed: String,
        records: Vec<&'a CareerRecord>,
    },
}

/// What the results panel should show for an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "count", rename_all = "snake_case")]
pub enum PanelState {
    Hidden,
    NoResults,
    Results(usize),
}

impl<'a> SearchOutcome<'a> {
    pub fn records(&self) -> &[&'a CareerRecord] {
        match self {
            SearchOutcome::NoQuery => &[],
            SearchOutcome::Matches { records, .. } => records,
        }
    }

    /// The normalized (trimmed, case-folded) query, if there was one.
    pub fn query(&self) -> Option<&str> {
        match self {
            SearchOutcome::NoQuery => None,
            SearchOutcome::Matches { query, .. } => Some(query),
        }
    }

    pub fn typed_query(&self) -> Option<&str> {
        match self {
            SearchOutcome::NoQuery => None,
            SearchOutcome::Matches { typed, .. } => Some(typed),
        }
    }

    /// Header for the results panel, quoting the query the way it was typed.
    pub fn summary(&self) -> Option<String> {
        match (self.panel(), self.typed_query()) {
            (PanelState::Results(count), Some(typed)) => Some(result_summary(count, typed)),
            _ => None,
        }
    }

    pub fn panel(&self) -> PanelState {
        match self {
            SearchOutcome::NoQuery => PanelState::Hidden,
            SearchOutcome::Matches { records, .. } if records.is_empty() => PanelState::NoResults,
            SearchOutcome::Matches { records, .. } => PanelState::Results(records.len()),
        }
    }
}

/// Case-insensitive substring search over title, category, and tags.
///
/// Matches keep catalog order and are truncated to [`MAX_RESULTS`].
pub fn search<'a>(query: &str, catalog: &'a StoryCatalog) -> SearchOutcome<'a> {
    let typed = query.trim();
    let needle = fold_case(typed);
    if needle.is_empty() {
        return SearchOutcome::NoQuery;
    }

    let records = catalog
        .records()
        .iter()
        .filter(|record| record_matches(record, &needle))
        .take(MAX_RESULTS)
        .collect();

    SearchOutcome::Matches {
        query: needle,
        typed: typed.to_string(),
        records,
    }
}

fn record_matches(record: &CareerRecord, needle: &str) -> bool {
    let field_matches = |field: &str| fold_case(field).contains(needle);

    field_matches(&record.title)
        || field_matches(&record.category)
        || record.tags.iter().any(|tag| field_matches(tag))
}

/// Header line for a non-empty results panel.
pub fn result_summary(count: usize, query: &str) -> String {
    let noun = if count == 1 { "story" } else { "stories" };
    format!("Found {count} career {noun} for \"{query}\"")
}
