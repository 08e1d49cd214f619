use crate::errors::{AppError, AppResult};
use crate::models::NavPage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "PORTFOLIO_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "portfolio.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BasePathConfig {
    pub local_hosts: Vec<String>,
    pub local: String,
    pub deployed: String,
}

impl Default for BasePathConfig {
    fn default() -> Self {
        Self {
            local_hosts: vec!["localhost".to_string(), "127.0.0.1".to_string()],
            local: "/".to_string(),
            deployed: "/portfolio/".to_string(),
        }
    }
}

impl BasePathConfig {
    pub fn for_hostname(&self, hostname: &str) -> &str {
        if self.local_hosts.iter().any(|host| host == hostname) {
            &self.local
        } else {
            &self.deployed
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub projects_path: PathBuf,
    pub profile_path: Option<PathBuf>,
    pub data_dir: PathBuf,
    pub latest_count: usize,
    pub github_username: Option<String>,
    pub contact_action: String,
    pub log_filter: String,
    /// Stands in for the system `prefers-color-scheme: dark` query.
    pub prefers_dark: bool,
    pub base_path: BasePathConfig,
    pub pages: Vec<NavPage>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            projects_path: PathBuf::from("lib/projects.json"),
            profile_path: None,
            data_dir: PathBuf::from(".portfolio"),
            latest_count: 3,
            github_username: None,
            contact_action: "mailto:hello@example.com".to_string(),
            log_filter: "info".to_string(),
            prefers_dark: false,
            base_path: BasePathConfig::default(),
            pages: vec![
                NavPage::new("", "Home"),
                NavPage::new("projects/", "Projects"),
                NavPage::new("contact/", "Contact"),
                NavPage::new("profile/", "Profile"),
            ],
        }
    }
}

impl SiteConfig {
    pub fn from_yaml(raw: &str) -> AppResult<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> AppResult<Self> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_yaml(&raw),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => Err(AppError::from(error)),
        }
    }

    pub fn load_from_env() -> AppResult<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load(&path)
    }

    /// Navigation entries, with the GitHub profile link appended when a username is set.
    pub fn nav_pages(&self) -> Vec<NavPage> {
        let mut pages = self.pages.clone();
        if let Some(username) = self.github_username.as_deref().filter(|name| !name.trim().is_empty()) {
            pages.push(NavPage::new(&format!("https://github.com/{}", username.trim()), "GitHub"));
        }
        pages
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.data_dir.join("preferences.db")
    }

    fn validate(&self) -> AppResult<()> {
        if !self.contact_action.starts_with("mailto:") {
            return Err(AppError::Config(format!(
                "contactAction must be a mailto: address, got {:?}",
                self.contact_action
            )));
        }
        if self.base_path.local.is_empty() || self.base_path.deployed.is_empty() {
            return Err(AppError::Config("base paths must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SiteConfig;
    use crate::errors::AppError;
    use std::path::PathBuf;

    #[test]
    fn empty_document_uses_defaults() {
        let config = SiteConfig::from_yaml("").expect("defaults");
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.latest_count, 3);
        assert_eq!(config.base_path.for_hostname("localhost"), "/");
        assert_eq!(config.base_path.for_hostname("someone.github.io"), "/portfolio/");
    }

    #[test]
    fn partial_document_overrides_fields() {
        let config = SiteConfig::from_yaml(
            "projectsPath: data/projects.json\nlatestCount: 5\ngithubUsername: octocat\nbasePath:\n  deployed: /site/\n",
        )
        .expect("parse");
        assert_eq!(config.projects_path, PathBuf::from("data/projects.json"));
        assert_eq!(config.latest_count, 5);
        assert_eq!(config.base_path.deployed, "/site/");
        assert_eq!(config.base_path.local, "/");

        let pages = config.nav_pages();
        assert_eq!(pages.len(), 5);
        assert_eq!(pages[4].url, "https://github.com/octocat");
    }

    #[test]
    fn rejects_non_mailto_contact_action() {
        let error = SiteConfig::from_yaml("contactAction: https://example.com/form\n").expect_err("invalid");
        assert!(matches!(error, AppError::Config(_)));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = SiteConfig::load(&dir.path().join("nope.yaml")).expect("defaults");
        assert_eq!(config, SiteConfig::default());
    }
}
