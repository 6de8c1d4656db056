//! Stash panel: stash entries and dropping them.

use anyhow::Result;

use super::{ConfirmAction, Gui};
use crate::{git::StashEntry, view::ViewName};

impl Gui {
    /// Entry under the cursor, if any.
    fn selected_stash_entry(&self) -> Option<StashEntry> {
        self.state
            .stash_selection
            .index()
            .and_then(|i| self.state.stash_entries.get(i))
            .cloned()
    }

    /// Reload the stash list, newest entry first.
    pub fn refresh_stash(&mut self) -> Result<()> {
        let entries = self.repo.stash_entries()?;
        self.state.stash_selection = self.state.stash_selection.refreshed(entries.len());
        self.render_list_panel(ViewName::Stash, &entries)?;
        self.state.stash_entries = entries;
        self.focus_list_line(ViewName::Stash, self.state.stash_selection.line());
        Ok(())
    }

    /// Show the patch of the selected stash entry in main.
    pub fn handle_stash_select(&mut self) -> Result<()> {
        let Some(entry) = self.selected_stash_entry() else {
            self.render_string(ViewName::Main, "No stash entries");
            return Ok(());
        };
        self.focus_list_line(ViewName::Stash, self.state.stash_selection.line());
        let patch = self.repo.show_stash(&entry)?;
        self.render_string(ViewName::Main, patch);
        Ok(())
    }

    /// Ask before dropping the selected entry.
    pub(super) fn start_stash_drop(&mut self) -> Result<()> {
        let Some(entry) = self.selected_stash_entry() else {
            return Ok(());
        };
        self.create_confirmation_panel(
            "Stash drop",
            "Are you sure you want to drop this stash entry?",
            ConfirmAction::DropStash(entry),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::test_support::{FakeRepo, loaded_gui, test_gui_with};

    #[test]
    fn selecting_an_entry_shows_its_patch() {
        let mut gui = loaded_gui();
        gui.switch_to(None, ViewName::Stash).unwrap();
        gui.views.flush_updates().unwrap();
        assert_eq!(
            gui.main_view().unwrap().buffer(),
            "stash WIP on master: 2222222 initial commit"
        );
    }

    #[test]
    fn drop_asks_then_drops() {
        let repo = FakeRepo::default();
        let calls = repo.calls.clone();
        let mut gui = test_gui_with(repo);
        gui.refresh_side_panels().unwrap();
        gui.switch_to(None, ViewName::Stash).unwrap();

        gui.start_stash_drop().unwrap();
        assert_eq!(gui.current_view_name(), Some(ViewName::Confirmation));
        assert!(!calls.borrow().iter().any(|c| c.starts_with("stash drop")));

        gui.handle_confirm().unwrap();
        assert!(calls.borrow().contains(&"stash drop stash@{0}".to_string()));
        assert_eq!(gui.current_view_name(), Some(ViewName::Stash));
        assert!(gui.views.view(ViewName::Confirmation).is_err());
    }

    #[test]
    fn drop_with_empty_stash_does_nothing() {
        let mut gui = test_gui_with(FakeRepo {
            stash: vec![],
            ..FakeRepo::default()
        });
        gui.refresh_stash().unwrap();
        gui.switch_to(None, ViewName::Stash).unwrap();
        gui.start_stash_drop().unwrap();
        assert_eq!(gui.current_view_name(), Some(ViewName::Stash));
    }
}
