use crate::models::Project;

/// Lower-cased `title description year`, the text a search query is matched against.
pub fn searchable_text(project: &Project) -> String {
    format!("{} {} {}", project.title, project.description, project.year_text()).to_lowercase()
}

/// Projects whose searchable text contains `query`, ignoring case.
///
/// A blank query matches everything. Source order is preserved.
pub fn filter_by_text<'a>(projects: &'a [Project], query: &str) -> Vec<&'a Project> {
    if query.trim().is_empty() {
        return projects.iter().collect();
    }

    let needle = query.to_lowercase();
    projects
        .iter()
        .filter(|project| searchable_text(project).contains(&needle))
        .collect()
}
