//! Declarative chrome visibility
//!
//! Chrome regions are rendered by the host. Instead of the shell toggling
//! them one by one, the host asks [`ChromeLayout::is_visible`] with the
//! current [`UiMode`] whenever it renders.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    #[default]
    Editing,
    Previewing,
}

impl UiMode {
    pub fn toggled(self) -> Self {
        match self {
            UiMode::Editing => UiMode::Previewing,
            UiMode::Previewing => UiMode::Editing,
        }
    }
}

/// Editor chrome rendered around the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChromeRegion {
    NavigationPanel,
    Toolbar,
    RightSidebar,
}

impl ChromeRegion {
    pub const ALL: [ChromeRegion; 3] = [
        ChromeRegion::NavigationPanel,
        ChromeRegion::Toolbar,
        ChromeRegion::RightSidebar,
    ];

    /// Host selector of the region
    pub fn selector(&self) -> &'static str {
        match self {
            ChromeRegion::NavigationPanel => ".gjs-pn-views-container",
            ChromeRegion::Toolbar => ".gjs-top",
            ChromeRegion::RightSidebar => ".right-sidebar",
        }
    }
}

/// Visibility of chrome regions. Preview hides every region; outside
/// preview a region shows unless the user hid it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChromeLayout {
    hidden_by_user: BTreeSet<ChromeRegion>,
}

impl ChromeLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_user_visible(&mut self, region: ChromeRegion, visible: bool) {
        if visible {
            self.hidden_by_user.remove(&region);
        } else {
            self.hidden_by_user.insert(region);
        }
    }

    pub fn is_visible(&self, region: ChromeRegion, mode: UiMode) -> bool {
        match mode {
            UiMode::Previewing => false,
            UiMode::Editing => !self.hidden_by_user.contains(&region),
        }
    }
}
