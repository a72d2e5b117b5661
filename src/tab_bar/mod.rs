//! Tab strip interaction state
//!
//! Translates clicks and drag gestures on the tab strip into
//! [`TabBarAction`]s for the workspace session.
//!
//! ## Module layout
//!
//! - [`drag_drop`]: drag state, drop-target detection and the committed reorder.

mod drag_drop;

pub use drag_drop::{DragReorder, ReorderPlan, TabRect, effective_target, insertion_index};

use crate::tab::{Tab, TabId};

/// Actions that can be triggered from the tab strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabBarAction {
    /// No action
    None,
    /// Switch to a specific tab
    SwitchTo(TabId),
    /// Close a specific tab
    Close(TabId),
    /// Move a tab from one index to another
    Reorder(ReorderPlan),
}

/// Direction of a keyboard tab move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Left,
    Right,
}

impl MoveDirection {
    pub fn delta(self) -> i32 {
        match self {
            MoveDirection::Left => -1,
            MoveDirection::Right => 1,
        }
    }
}

/// Click on a tab body
pub fn click_tab(tab: &Tab) -> TabBarAction {
    TabBarAction::SwitchTo(tab.id.clone())
}

/// Click on a tab's close button. Pinned tabs ignore it.
pub fn click_close(tab: &Tab) -> TabBarAction {
    if tab.closable {
        TabBarAction::Close(tab.id.clone())
    } else {
        TabBarAction::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pane::Section;

    #[test]
    fn close_click_on_pinned_tab_is_ignored() {
        assert_eq!(click_close(&Tab::home()), TabBarAction::None);
        let orders = Tab::for_section(Section::Orders, "orders-1a2b3");
        assert_eq!(
            click_close(&orders),
            TabBarAction::Close("orders-1a2b3".to_string())
        );
        assert_eq!(
            click_tab(&orders),
            TabBarAction::SwitchTo("orders-1a2b3".to_string())
        );
    }
}
