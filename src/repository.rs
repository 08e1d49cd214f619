use crate::errors::{AppError, AppResult};
use crate::models::Project;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;

/// Reads the resource at `path` and parses it as JSON.
pub async fn fetch_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|error| AppError::Fetch(format!("{}: {}", path.display(), error)))?;
    serde_json::from_str(&raw).map_err(|error| AppError::Parse(format!("{}: {}", path.display(), error)))
}

/// The project list for the session. Loaded once and never modified.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    projects: Arc<[Project]>,
}

impl ProjectRepository {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects: projects.into(),
        }
    }

    pub fn from_json(raw: &str) -> AppResult<Self> {
        let projects: Vec<Project> = serde_json::from_str(raw)?;
        Ok(Self::new(projects))
    }

    pub async fn fetch(path: &Path) -> AppResult<Self> {
        let projects: Vec<Project> = fetch_json(path).await?;
        tracing::info!(path = %path.display(), count = projects.len(), "loaded projects");
        Ok(Self::new(projects))
    }

    /// Like [`ProjectRepository::fetch`], but a failed load is logged and
    /// yields an empty repository.
    pub async fn fetch_or_empty(path: &Path) -> Self {
        match Self::fetch(path).await {
            Ok(repository) => repository,
            Err(error) => {
                tracing::error!(error = %error, path = %path.display(), "error fetching or parsing project data");
                Self::default()
            }
        }
    }

    pub fn all(&self) -> &[Project] {
        &self.projects
    }

    /// First `count` projects in source order, as shown on the home page.
    pub fn latest(&self, count: usize) -> &[Project] {
        &self.projects[..count.min(self.projects.len())]
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl Default for ProjectRepository {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

pub fn projects_heading(count: usize) -> String {
    format!("Projects ({})", count)
}

#[cfg(test)]
mod tests {
    use super::{projects_heading, ProjectRepository};
    use crate::errors::AppError;

    const SAMPLE: &str = r#"[
        {"title":"One","description":"first","year":2019,"image":"images/one.png"},
        {"title":"Two","description":"second","year":2020,"image":"images/two.png"},
        {"title":"Three","description":"third","year":2020,"image":"images/three.png"},
        {"title":"Four","description":"fourth","year":2021,"image":"images/four.png"}
    ]"#;

    #[test]
    fn latest_takes_leading_projects_in_order() {
        let repository = ProjectRepository::from_json(SAMPLE).expect("parse");
        let titles: Vec<&str> = repository.latest(3).iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Two", "Three"]);
        assert_eq!(repository.latest(10).len(), 4);
        assert!(repository.latest(0).is_empty());
    }

    #[test]
    fn heading_counts_projects() {
        assert_eq!(projects_heading(4), "Projects (4)");
        assert_eq!(projects_heading(0), "Projects (0)");
    }

    #[tokio::test]
    async fn fetch_reads_file_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("projects.json");
        std::fs::write(&path, SAMPLE).expect("write");

        let repository = ProjectRepository::fetch(&path).await.expect("fetch");
        assert_eq!(repository.len(), 4);
        assert_eq!(repository.all()[3].image, "images/four.png");
    }

    #[tokio::test]
    async fn missing_file_is_a_fetch_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let error = ProjectRepository::fetch(&dir.path().join("absent.json"))
            .await
            .expect_err("should fail");
        assert!(matches!(error, AppError::Fetch(_)));
    }

    #[tokio::test]
    async fn malformed_json_degrades_to_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("projects.json");
        std::fs::write(&path, "{ not json").expect("write");

        let repository = ProjectRepository::fetch_or_empty(&path).await;
        assert!(repository.is_empty());
    }
}
