use crate::errors::AppResult;
use crate::models::GitHubProfile;
use crate::repository::fetch_json;
use std::path::Path;

const GITHUB_API: &str = "https://api.github.com";

pub fn profile_url(username: &str) -> String {
    format!("{}/users/{}", GITHUB_API, username.trim())
}

pub async fn fetch_profile(path: &Path) -> AppResult<GitHubProfile> {
    let profile: GitHubProfile = fetch_json(path).await?;
    tracing::info!(login = %profile.login, "loaded profile");
    Ok(profile)
}
