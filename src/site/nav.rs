use crate::config::BasePathConfig;
use crate::models::{NavLink, NavPage};
use once_cell::sync::Lazy;
use regex::Regex;

static ABSOLUTE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://([^/?#]+)([^?#]*)").expect("valid regex"));

/// Where the page currently being viewed lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Host including any port, e.g. `localhost:8080`.
    pub host: String,
    pub pathname: String,
}

impl Location {
    pub fn new(host: &str, pathname: &str) -> Self {
        Self {
            host: host.to_string(),
            pathname: if pathname.is_empty() { "/".to_string() } else { pathname.to_string() },
        }
    }

    pub fn hostname(&self) -> &str {
        self.host.split(':').next().unwrap_or_default()
    }
}

/// Splits `href` into host and pathname, resolving root-relative links against `location`.
fn resolve(href: &str, location: &Location) -> (String, String) {
    if let Some(captures) = ABSOLUTE_URL.captures(href) {
        let host = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        let path = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
        let path = if path.is_empty() { "/" } else { path };
        return (host.to_ascii_lowercase(), path.to_string());
    }

    let path = href.split(['?', '#']).next().unwrap_or_default();
    (location.host.to_ascii_lowercase(), path.to_string())
}

/// Builds the navigation bar for `location`.
///
/// Internal pages are prefixed with the base path for the current host.
/// Links to other hosts open in a new tab.
pub fn build_nav(pages: &[NavPage], location: &Location, base_path: &BasePathConfig) -> Vec<NavLink> {
    let base = base_path.for_hostname(location.hostname());
    let current_host = location.host.to_ascii_lowercase();

    pages
        .iter()
        .map(|page| {
            let href = if page.url.starts_with("http") {
                page.url.clone()
            } else {
                format!("{}{}", base, page.url)
            };
            let (host, pathname) = resolve(&href, location);
            NavLink {
                current: host == current_host && pathname == location.pathname,
                target: (host != current_host).then(|| "_blank".to_string()),
                title: page.title.clone(),
                href,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{build_nav, Location};
    use crate::config::{BasePathConfig, SiteConfig};

    fn pages() -> Vec<crate::models::NavPage> {
        SiteConfig {
            github_username: Some("octocat".to_string()),
            ..SiteConfig::default()
        }
        .nav_pages()
    }

    #[test]
    fn local_host_uses_root_base_path() {
        let links = build_nav(&pages(), &Location::new("localhost:8000", "/projects/"), &BasePathConfig::default());
        let hrefs: Vec<&str> = links.iter().map(|l| l.href.as_str()).collect();
        assert_eq!(
            hrefs,
            vec!["/", "/projects/", "/contact/", "/profile/", "https://github.com/octocat"]
        );
        let current: Vec<&str> = links.iter().filter(|l| l.current).map(|l| l.title.as_str()).collect();
        assert_eq!(current, vec!["Projects"]);
    }

    #[test]
    fn deployed_host_uses_repository_base_path() {
        let links = build_nav(&pages(), &Location::new("someone.github.io", "/portfolio/"), &BasePathConfig::default());
        assert_eq!(links[0].href, "/portfolio/");
        assert!(links[0].current);
        assert!(!links[1].current);
    }

    #[test]
    fn only_external_links_open_new_tab() {
        let links = build_nav(&pages(), &Location::new("127.0.0.1", "/"), &BasePathConfig::default());
        let targets: Vec<Option<&str>> = links.iter().map(|l| l.target.as_deref()).collect();
        assert_eq!(targets, vec![None, None, None, None, Some("_blank")]);
    }

    #[test]
    fn hostname_drops_port() {
        assert_eq!(Location::new("localhost:5500", "").hostname(), "localhost");
        assert_eq!(Location::new("localhost:5500", "").pathname, "/");
    }
}
