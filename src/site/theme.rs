use crate::db::PreferenceStore;
use crate::errors::AppResult;
use crate::models::ColorScheme;
use serde::Serialize;

pub const COLOR_SCHEME_KEY: &str = "colorScheme";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeOption {
    pub value: &'static str,
    pub label: String,
}

/// Entries for the theme picker. The automatic entry names the system preference.
pub fn theme_options(prefers_dark: bool) -> Vec<ThemeOption> {
    ColorScheme::ALL
        .iter()
        .map(|scheme| ThemeOption {
            value: scheme.as_str(),
            label: match scheme {
                ColorScheme::Automatic => {
                    format!("Automatic ({})", if prefers_dark { "Dark" } else { "Light" })
                }
                ColorScheme::Light => "Light".to_string(),
                ColorScheme::Dark => "Dark".to_string(),
            },
        })
        .collect()
}

/// Stored scheme, or automatic when nothing usable was saved.
pub fn restore_color_scheme(store: &PreferenceStore) -> AppResult<ColorScheme> {
    let Some(raw) = store.get(COLOR_SCHEME_KEY)? else {
        return Ok(ColorScheme::Automatic);
    };
    match ColorScheme::parse(&raw) {
        Some(scheme) => Ok(scheme),
        None => {
            tracing::warn!(value = %raw, "ignoring unknown stored color scheme");
            Ok(ColorScheme::Automatic)
        }
    }
}

pub fn save_color_scheme(store: &PreferenceStore, scheme: ColorScheme) -> AppResult<()> {
    tracing::info!(scheme = scheme.as_str(), "color scheme changed");
    store.set(COLOR_SCHEME_KEY, scheme.as_str())
}
