use crate::error::StoreError;
use serde::{Deserialize, Serialize};

/// Placement group of a navigation link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationSection {
    /// Primary navigation.
    #[default]
    Default,
    /// Footer navigation.
    Other,
}

impl NavigationSection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Result<Self, StoreError> {
        match s {
            "default" => Ok(Self::Default),
            "other" => Ok(Self::Other),
            other => Err(StoreError::validation(format!("unknown navigation section '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayTo {
    #[default]
    All,
    LoggedIn,
    LoggedOut,
}

impl DisplayTo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::LoggedIn => "logged_in",
            Self::LoggedOut => "logged_out",
        }
    }

    pub fn parse(s: &str) -> Result<Self, StoreError> {
        match s {
            "all" => Ok(Self::All),
            "logged_in" => Ok(Self::LoggedIn),
            "logged_out" => Ok(Self::LoggedOut),
            other => Err(StoreError::validation(format!("unknown display_to '{other}'"))),
        }
    }

    /// Whether a visitor with the given sign-in state sees the link.
    pub fn visible_to(&self, signed_in: bool) -> bool {
        match self {
            Self::All => true,
            Self::LoggedIn => signed_in,
            Self::LoggedOut => !signed_in,
        }
    }
}

/// A navigation entry, identified by `(url, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationLink {
    #[serde(default, skip_serializing)]
    pub id: Option<i64>,
    pub url: String,
    pub name: String,
    /// Inline SVG markup.
    pub icon: String,
    #[serde(default)]
    pub section: NavigationSection,
    #[serde(default)]
    pub position: Option<i64>,
    #[serde(default)]
    pub display_to: DisplayTo,
}

impl NavigationLink {
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.url.trim().is_empty() || self.name.trim().is_empty() {
            return Err(StoreError::validation("navigation link needs a url and a name"));
        }
        if !self.icon.trim_start().starts_with("<svg") {
            return Err(StoreError::validation(format!(
                "icon for navigation link '{}' must be inline svg",
                self.name
            )));
        }
        Ok(())
    }
}
