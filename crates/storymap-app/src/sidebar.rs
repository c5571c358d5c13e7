//! Navigation sidebar state.

use storymap_core::ThemeRoomId;

use crate::Route;

/// Sidebar entry: label and destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarItem {
    /// Text shown.
    pub label: &'static str,
    /// Page opened on selection.
    pub route: Route,
}

/// Collapsible navigation menu.
#[derive(Debug, Clone)]
pub struct Sidebar {
    items: Vec<SidebarItem>,
    open: bool,
    selected: usize,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self::new()
    }
}

impl Sidebar {
    /// Closed sidebar with the standard destinations.
    pub fn new() -> Self {
        let items = vec![
            SidebarItem { label: "Home", route: Route::Home },
            SidebarItem { label: "Favorites", route: Route::Favorites },
            SidebarItem { label: "Settings", route: Route::Settings },
            SidebarItem { label: "Help", route: Route::Help },
            SidebarItem { label: "Story Map", route: Route::StoryMap(ThemeRoomId::new("1")) },
            SidebarItem { label: "Display Story", route: Route::Story },
            SidebarItem { label: "Create Story", route: Route::CreateStory },
        ];
        Self { items, open: false, selected: 0 }
    }

    /// Destinations in display order.
    pub fn items(&self) -> &[SidebarItem] {
        &self.items
    }

    /// True while shown.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show or hide.
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Hide.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Index of the highlighted entry.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Move the highlight down, wrapping.
    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    /// Move the highlight up, wrapping.
    pub fn select_prev(&mut self) {
        self.selected = (self.selected + self.items.len() - 1) % self.items.len();
    }

    /// Pick the highlighted entry and close.
    pub fn choose(&mut self) -> Option<Route> {
        self.open = false;
        self.items.get(self.selected).map(|item| item.route.clone())
    }

    /// True if `item` leads to the page `current` shows.
    pub fn is_active(item: &SidebarItem, current: &Route) -> bool {
        item.route.same_page(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choose_closes_and_returns_route() {
        let mut sidebar = Sidebar::new();
        sidebar.toggle();
        sidebar.select_prev();

        assert_eq!(sidebar.choose(), Some(Route::CreateStory));
        assert!(!sidebar.is_open());
    }

    #[test]
    fn story_map_active_for_any_room() {
        let sidebar = Sidebar::new();
        let item = &sidebar.items()[4];
        assert!(Sidebar::is_active(item, &Route::StoryMap("42".into())));
        assert!(!Sidebar::is_active(item, &Route::Story));
    }
}
