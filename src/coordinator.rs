use crate::filter::{aggregate_by_year, filter_by_text};
use crate::models::{Project, YearGroup};
use crate::repository::{projects_heading, ProjectRepository};
use crate::selection::{FilterEvent, SelectionState};
use serde::Serialize;

/// Receives recomputed views. Each call replaces whatever was drawn before.
pub trait ViewSink {
    fn render(&mut self, visible: &[Project], title: &str);
    fn draw_chart(&mut self, groups: &[YearGroup], selected: Option<usize>);
}

/// Everything the projects page shows for one selection state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterView {
    pub visible: Vec<Project>,
    pub title: String,
    /// Wedges, aggregated over the text-filtered projects.
    pub year_groups: Vec<YearGroup>,
    pub selected_index: Option<usize>,
}

impl FilterView {
    pub fn emit(&self, sink: &mut dyn ViewSink) {
        sink.render(&self.visible, &self.title);
        sink.draw_chart(&self.year_groups, self.selected_index);
    }
}

/// Visible set for `state`: the text filter AND the selected year.
pub fn recompute(projects: &[Project], state: &SelectionState) -> FilterView {
    let matching = filter_by_text(projects, state.query());
    let year_groups = aggregate_by_year(matching.iter().copied());
    let visible: Vec<Project> = matching
        .into_iter()
        .filter(|project| match state.selected_year() {
            Some(year) => project.year == Some(year),
            None => true,
        })
        .cloned()
        .collect();

    FilterView {
        title: projects_heading(visible.len()),
        selected_index: state.selected_index(&year_groups),
        visible,
        year_groups,
    }
}

/// Owns the selection for the projects page and pushes every recompute to a sink.
#[derive(Debug, Clone)]
pub struct FilterCoordinator {
    repository: ProjectRepository,
    state: SelectionState,
    view: FilterView,
}

impl FilterCoordinator {
    pub fn new(repository: ProjectRepository) -> Self {
        let state = SelectionState::new();
        let view = recompute(repository.all(), &state);
        Self {
            repository,
            state,
            view,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn view(&self) -> &FilterView {
        &self.view
    }

    /// Emits the current view without changing state, as on page load.
    pub fn refresh(&self, sink: &mut dyn ViewSink) {
        self.view.emit(sink);
    }

    pub fn dispatch(&mut self, event: FilterEvent, sink: &mut dyn ViewSink) -> &FilterView {
        tracing::debug!(event = ?event, "filter event");
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(event, &self.view.year_groups);
        self.view = recompute(self.repository.all(), &self.state);
        tracing::debug!(
            query = self.state.query(),
            selected_year = ?self.state.selected_year(),
            visible = self.view.visible.len(),
            "projects view recomputed"
        );
        self.view.emit(sink);
        &self.view
    }
}
