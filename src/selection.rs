use crate::models::YearGroup;
use serde::{Deserialize, Serialize};

/// User input that can change what the projects view shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    /// Search box contents changed.
    QueryChanged(String),
    /// A chart wedge or legend entry was clicked, by position in the last drawn chart.
    WedgeClicked(usize),
    /// Drop both the query and the year selection.
    Cleared,
}

/// Search text plus the selected year.
///
/// The selection is keyed by year value; chart positions are only used to
/// resolve a click against the groups that were on screen at the time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    query: String,
    selected_year: Option<i32>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected_year(&self) -> Option<i32> {
        self.selected_year
    }

    pub fn with_query(self, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..self
        }
    }

    pub fn with_selected_year(self, selected_year: Option<i32>) -> Self {
        Self { selected_year, ..self }
    }

    /// Applies a click on wedge `index` of `groups`: selects its year, or
    /// clears the selection when that year is already selected. An index
    /// outside `groups` clears the selection.
    pub fn toggle_wedge(self, index: usize, groups: &[YearGroup]) -> Self {
        let selected_year = match groups.get(index) {
            Some(group) if self.selected_year == Some(group.year) => None,
            Some(group) => Some(group.year),
            None => {
                tracing::warn!(index, groups = groups.len(), "wedge index out of range; clearing year selection");
                None
            }
        };
        Self { selected_year, ..self }
    }

    pub fn apply(self, event: FilterEvent, groups: &[YearGroup]) -> Self {
        match event {
            FilterEvent::QueryChanged(query) => self.with_query(query),
            FilterEvent::WedgeClicked(index) => self.toggle_wedge(index, groups),
            FilterEvent::Cleared => Self::new(),
        }
    }

    /// Position of the selected year within `groups`, if it is drawn there.
    pub fn selected_index(&self, groups: &[YearGroup]) -> Option<usize> {
        let year = self.selected_year?;
        groups.iter().position(|group| group.year == year)
    }
}
