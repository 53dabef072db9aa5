//! List filtering for the term view.
//!
//! A term is visible iff its understood flag matches the status filter and
//! the trimmed search query is empty or a case-insensitive substring of the
//! label. Matches keep collection order.

use crate::model::term::Term;

/// Which half of the collection is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    Understood,
    #[default]
    NotUnderstood,
}

impl StatusFilter {
    pub fn matches(self, term: &Term) -> bool {
        term.understood == (self == Self::Understood)
    }
}

/// Top panel of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Add,
    Search,
}

/// View state: active tab, status filter and search text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    tab: Tab,
    status: StatusFilter,
    query: String,
}

impl ViewState {
    pub fn new(status: StatusFilter) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn status(&self) -> StatusFilter {
        self.status
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Switches tabs. Going back to `Add` clears the search text.
    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
        if tab == Tab::Add {
            self.query.clear();
        }
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.status = status;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Terms visible under this state, in collection order.
    pub fn visible<'a>(&self, terms: &'a [Term]) -> Vec<&'a Term> {
        visible_terms(terms, self.status, &self.query)
    }

    /// Placeholder text for an empty result list.
    pub fn empty_message(&self) -> String {
        if self.query.is_empty() {
            "No terms added yet. Start by adding some terms you want to learn!".to_string()
        } else {
            format!("No terms found matching \"{}\"", self.query)
        }
    }
}

/// Filters `terms` by status and case-insensitive label substring.
pub fn visible_terms<'a>(terms: &'a [Term], status: StatusFilter, query: &str) -> Vec<&'a Term> {
    let needle = query.trim().to_lowercase();
    terms
        .iter()
        .filter(|term| status.matches(term))
        .filter(|term| needle.is_empty() || term.term.to_lowercase().contains(&needle))
        .collect()
}
