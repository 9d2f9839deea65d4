/// Local-storage key for the visitor's explicit choice.
pub const STORAGE_KEY: &str = "darkMode";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Value persisted under [`STORAGE_KEY`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "false",
            Theme::Dark => "true",
        }
    }

    pub fn from_stored(value: &str) -> Option<Theme> {
        match value.trim() {
            "true" => Some(Theme::Dark),
            "false" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }
}

/// A stored choice wins; otherwise follow the system preference.
pub fn resolve_theme(stored: Option<&str>, prefers_dark: bool) -> Theme {
    stored
        .and_then(Theme::from_stored)
        .unwrap_or(if prefers_dark { Theme::Dark } else { Theme::Light })
}
