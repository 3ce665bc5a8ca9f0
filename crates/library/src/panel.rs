//! Game detail panels.
//!
//! Rendering is the shell's business; the library only keeps the registry
//! and answers which panels apply to a game.

use crate::game::Game;

/// A UI surface shown on a game's detail page.
pub trait Panel: Send + Sync {
    /// Human-readable panel title.
    fn title(&self) -> &str;

    /// Whether the panel should be offered for `game`.
    fn applies_to(&self, _game: &Game) -> bool {
        true
    }
}

/// A panel the library ships with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinPanel {
    title: &'static str,
}

impl BuiltinPanel {
    pub const fn new(title: &'static str) -> Self {
        Self { title }
    }
}

impl Panel for BuiltinPanel {
    fn title(&self) -> &str {
        self.title
    }
}

/// Panels registered on every new manager, in display order.
pub const DEFAULT_PANELS: [(&str, BuiltinPanel); 6] = [
    ("settings", BuiltinPanel::new("Settings")),
    ("storage", BuiltinPanel::new("Storage")),
    ("achievements", BuiltinPanel::new("Achievements")),
    ("timeplayed", BuiltinPanel::new("Time Played")),
    ("ratings", BuiltinPanel::new("Ratings")),
    ("info", BuiltinPanel::new("Info")),
];
