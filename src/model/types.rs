//! Core type definitions for the application

use std::time::Instant;

/// Which part of the screen receives key input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSection {
    Search,
    MainContent,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::MainContent,
            ActiveSection::MainContent => ActiveSection::Search,
        }
    }
}

/// Top-level screens reachable from the tab bar
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Home,
    Saved,
}

impl Tab {
    pub fn title(self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Saved => "Saved",
        }
    }
}

/// UI state for the application
#[derive(Clone)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub active_tab: Tab,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub show_help_popup: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::Search,
            active_tab: Tab::Home,
            error_message: None,
            error_timestamp: None,
            show_help_popup: false,
        }
    }
}
