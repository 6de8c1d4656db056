//! The actions menu of the focused panel.

use anyhow::Result;

use super::{Action, Gui, actions::panel_actions, view_helpers::synchronous_render_string};
use crate::{
    keybindings::primary_key,
    layout::confirmation_panel_dimensions,
    selection::Selection,
    utils::{ListItem, render_list},
    view::ViewName,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub key: String,
    pub description: String,
    pub action: Action,
}

impl ListItem for MenuItem {
    fn display_strings(&self) -> Vec<String> {
        vec![self.key.clone(), self.description.clone()]
    }
}

impl Gui {
    /// Open the menu for the focused panel.
    pub fn create_menu(&mut self) -> Result<()> {
        let from = self.current_view_name();
        let items: Vec<MenuItem> = panel_actions(&self.keys, from)
            .into_iter()
            .map(|(keys, action)| MenuItem {
                key: primary_key(keys).to_string(),
                description: action.description().to_string(),
                action,
            })
            .collect();
        let content = render_list(&items)?;

        let (width, height) = self.views.size();
        let (x0, y0, x1, y1) = confirmation_panel_dimensions(width, height, &content);
        self.views.set_view(ViewName::Menu, x0, y0, x1, y1);
        self.views.view_mut(ViewName::Menu)?.title = "Menu".to_string();
        synchronous_render_string(&mut self.views, ViewName::Menu, &content)?;

        self.state.menu_selection = Selection::none().refreshed(items.len());
        self.state.menu_items = items;
        self.switch_to(from, ViewName::Menu)
    }

    /// Focus handler: put the cursor on the selected item.
    pub fn handle_menu_select(&mut self) -> Result<()> {
        self.focus_list_line(ViewName::Menu, self.state.menu_selection.line());
        Ok(())
    }

    /// Move one item up or down, stopping at either end.
    pub(super) fn move_menu_selection(&mut self, up: bool) -> Result<()> {
        self.state.menu_selection = self.state.menu_selection.moved(up);
        self.handle_menu_select()
    }

    /// Close the menu and run the selected item against the panel it was
    /// opened from. Returns `true` to quit.
    pub(super) fn execute_menu_item(&mut self) -> Result<bool> {
        let action = self
            .state
            .menu_selection
            .index()
            .and_then(|i| self.state.menu_items.get(i))
            .map(|item| item.action);
        self.close_menu()?;
        match action {
            Some(action) => self.run_action(action),
            None => Ok(false),
        }
    }

    /// Delete the menu and hand focus back to the panel it was opened from.
    pub fn close_menu(&mut self) -> Result<()> {
        self.discard_menu()?;
        self.return_to_previous(Some(ViewName::Menu))
    }

    /// Delete the menu and its items without moving focus. Popups that open
    /// while the menu has focus call this first.
    pub(super) fn discard_menu(&mut self) -> Result<()> {
        self.state.menu_items.clear();
        self.state.menu_selection = Selection::none();
        if self.views.view(ViewName::Menu).is_ok() {
            self.views.delete_view(ViewName::Menu)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::test_support::{FakeRepo, loaded_gui, test_gui_with};

    #[test]
    fn menu_lists_actions_of_the_panel() {
        let mut gui = loaded_gui();
        gui.switch_to(None, ViewName::Stash).unwrap();
        gui.create_menu().unwrap();
        let menu = gui.views.view(ViewName::Menu).unwrap().buffer();
        assert_eq!(menu.lines().next(), Some("d       drop stash entry"));
        assert_eq!(gui.state.menu_selection.index(), Some(0));
        assert_eq!(gui.focus.previous, Some(ViewName::Stash));
    }

    #[test]
    fn moving_in_the_menu_moves_the_cursor() {
        let mut gui = loaded_gui();
        gui.switch_to(None, ViewName::Branches).unwrap();
        gui.create_menu().unwrap();
        gui.move_menu_selection(false).unwrap();
        gui.move_menu_selection(false).unwrap();
        gui.move_menu_selection(true).unwrap();
        gui.views.flush_updates().unwrap();
        assert_eq!(gui.state.menu_selection.index(), Some(1));
        assert_eq!(gui.views.view(ViewName::Menu).unwrap().cursor(), (0, 1));
    }

    #[test]
    fn executing_closes_then_runs_against_the_origin_panel() {
        let repo = FakeRepo::default();
        let calls = repo.calls.clone();
        let mut gui = test_gui_with(repo);
        gui.refresh_side_panels().unwrap();
        gui.switch_to(None, ViewName::Files).unwrap();
        gui.create_menu().unwrap();
        assert!(!gui.execute_menu_item().unwrap());
        assert!(gui.views.view(ViewName::Menu).is_err());
        assert_eq!(gui.current_view_name(), Some(ViewName::Files));
        assert!(calls.borrow().contains(&"stage src/lib.rs".to_string()));
    }

    #[test]
    fn quit_from_the_menu() {
        let mut gui = loaded_gui();
        gui.switch_to(None, ViewName::Commits).unwrap();
        gui.create_menu().unwrap();
        gui.state.menu_selection = gui.state.menu_selection.with_index(4);
        assert!(gui.execute_menu_item().unwrap());
    }
}
