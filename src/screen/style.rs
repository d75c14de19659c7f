//! Styles for list screens.

use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Every style a list screen renders with.
#[derive(Debug, Clone)]
pub struct ScreenStyles {
    /// Screen title.
    pub title: Style,
    /// Search and month labels.
    pub label: Style,
    /// Active search text.
    pub search_input: Style,
    /// Month filter value.
    pub month: Style,
    /// Paginator and counts.
    pub pagination: Style,
    /// Status line.
    pub status: Style,
    /// Blocking error text.
    pub error: Style,
    /// Alert box.
    pub alert: Style,
    /// Confirmation box.
    pub prompt: Style,
    /// Help line.
    pub help: Style,
}

impl Default for ScreenStyles {
    fn default() -> Self {
        let subdued = AdaptiveColor {
            Light: "#9B9B9B",
            Dark: "#5C5C5C",
        };
        let danger = AdaptiveColor {
            Light: "#D7263D",
            Dark: "#FF5F87",
        };

        Self {
            title: Style::new()
                .background(Color::from("62"))
                .foreground(Color::from("230"))
                .padding(0, 1, 0, 1),
            label: Style::new().foreground(subdued.clone()),
            search_input: Style::new().foreground(AdaptiveColor {
                Light: "#04B575",
                Dark: "#ECFD65",
            }),
            month: Style::new().bold(true),
            pagination: Style::new().foreground(subdued.clone()),
            status: Style::new().foreground(AdaptiveColor {
                Light: "#A49FA5",
                Dark: "#777777",
            }),
            error: Style::new().foreground(danger).bold(true),
            alert: Style::new()
                .border_style(lipgloss::normal_border())
                .border_foreground(Color::from("#FF5F87"))
                .padding(0, 1, 0, 1),
            prompt: Style::new()
                .border_style(lipgloss::normal_border())
                .border_foreground(Color::from("#874BFD"))
                .padding(0, 1, 0, 1),
            help: Style::new().foreground(subdued),
        }
    }
}
