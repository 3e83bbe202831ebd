//! Core types for the playback session

use crate::error::{Result, SessionError};
use serde::{Deserialize, Serialize};

/// Songs added to the display window per "load more"
pub const DEFAULT_PAGE_SIZE: usize = 15;

/// Image proxy endpoint the opaque image reference is appended to
pub const DEFAULT_IMAGE_ENDPOINT: &str = "/api/image-proxy?fileid=";

/// Session state as seen by the player chrome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No current song
    Idle,

    /// Current song set, not playing
    Paused,

    /// Current song set and playing
    Playing,
}

/// Bottom navigation tab
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Home,
    Search,
    Settings,
}

impl Tab {
    /// Parse a tab name; anything unrecognized is the home tab
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "search" => Tab::Search,
            "settings" => Tab::Settings,
            _ => Tab::Home,
        }
    }
}

/// Sub-page stacked over the tabs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubPage {
    #[default]
    Main,
    Playlists,
    Liked,
}

impl SubPage {
    /// Parse a sub-page name
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "main" => Some(SubPage::Main),
            "playlists" => Some(SubPage::Playlists),
            "liked" => Some(SubPage::Liked),
            _ => None,
        }
    }
}

/// Configuration for a playback session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Songs added per "load more" (default: 15)
    pub page_size: usize,

    /// Songs visible before any "load more" (default: 15)
    pub initial_visible: usize,

    /// Endpoint prefix for resolved image URLs
    pub image_endpoint: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            initial_visible: DEFAULT_PAGE_SIZE,
            image_endpoint: DEFAULT_IMAGE_ENDPOINT.to_string(),
        }
    }
}

impl SessionConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(SessionError::InvalidConfig(
                "page_size must be greater than zero".to_string(),
            ));
        }

        if self.image_endpoint.trim().is_empty() {
            return Err(SessionError::InvalidConfig(
                "image_endpoint cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.page_size, 15);
        assert_eq!(config.initial_visible, 15);
        assert_eq!(config.image_endpoint, "/api/image-proxy?fileid=");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let config = SessionConfig {
            page_size: 0,
            ..SessionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SessionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn unknown_tab_falls_back_to_home() {
        assert_eq!(Tab::parse("search"), Tab::Search);
        assert_eq!(Tab::parse(" Settings "), Tab::Settings);
        assert_eq!(Tab::parse("library"), Tab::Home);
        assert_eq!(Tab::parse(""), Tab::Home);
    }

    #[test]
    fn sub_page_parsing() {
        assert_eq!(SubPage::parse("liked"), Some(SubPage::Liked));
        assert_eq!(SubPage::parse("PLAYLISTS"), Some(SubPage::Playlists));
        assert_eq!(SubPage::parse("albums"), None);
    }
}
