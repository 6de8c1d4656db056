//! Named actions, the keys bound to them per panel, and running them.

use anyhow::Result;

use super::Gui;
use crate::{keybindings::Keybindings, view::ViewName};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    NextPanel,
    PrevPanel,
    Refresh,
    Fetch,
    ToggleStaged,
    Commit,
    OpenStaging,
    ResolveConflicts,
    DropStash,
    Quit,
}

impl Action {
    /// Text shown next to the key in the menu.
    pub fn description(self) -> &'static str {
        match self {
            Action::NextPanel => "next panel",
            Action::PrevPanel => "previous panel",
            Action::Refresh => "refresh",
            Action::Fetch => "fetch",
            Action::ToggleStaged => "toggle staged",
            Action::Commit => "commit changes",
            Action::OpenStaging => "stage lines",
            Action::ResolveConflicts => "resolve merge conflicts",
            Action::DropStash => "drop stash entry",
            Action::Quit => "quit",
        }
    }
}

/// Actions available in `view` with their bindings, panel-specific first.
pub fn panel_actions(keys: &Keybindings, view: Option<ViewName>) -> Vec<(&[String], Action)> {
    let mut actions: Vec<(&[String], Action)> = match view {
        Some(ViewName::Files) => vec![
            (keys.files.toggle_staged.as_slice(), Action::ToggleStaged),
            (keys.files.commit.as_slice(), Action::Commit),
            (keys.files.open_staging.as_slice(), Action::OpenStaging),
            (keys.files.resolve_conflicts.as_slice(), Action::ResolveConflicts),
        ],
        Some(ViewName::Stash) => vec![(keys.stash.drop.as_slice(), Action::DropStash)],
        _ => vec![],
    };
    let u = &keys.universal;
    actions.extend([
        (u.next_panel.as_slice(), Action::NextPanel),
        (u.prev_panel.as_slice(), Action::PrevPanel),
        (u.refresh.as_slice(), Action::Refresh),
        (u.fetch.as_slice(), Action::Fetch),
        (u.quit.as_slice(), Action::Quit),
    ]);
    actions
}

impl Gui {
    /// Run `action` against the focused panel. Returns `true` to quit.
    pub fn run_action(&mut self, action: Action) -> Result<bool> {
        let current = self.current_view_name();
        match action {
            Action::NextPanel => self.next_primary(current)?,
            Action::PrevPanel => self.previous_primary(current)?,
            Action::Refresh => self.refresh_side_panels()?,
            Action::Fetch => self.request_fetch(None),
            Action::ToggleStaged => self.toggle_staged()?,
            Action::Commit => self.start_commit()?,
            Action::OpenStaging => self.start_staging()?,
            Action::ResolveConflicts => self.resolve_conflicts()?,
            Action::DropStash => self.start_stash_drop()?,
            Action::Quit => return Ok(true),
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::test_support::loaded_gui;

    #[test]
    fn files_actions_come_before_universal_ones() {
        let keys = Keybindings::default();
        let actions: Vec<_> = panel_actions(&keys, Some(ViewName::Files))
            .into_iter()
            .map(|(_, a)| a)
            .collect();
        assert_eq!(actions[0], Action::ToggleStaged);
        assert_eq!(actions.last(), Some(&Action::Quit));
        assert!(!actions.contains(&Action::DropStash));
    }

    #[test]
    fn branches_only_get_universal_actions() {
        let keys = Keybindings::default();
        assert_eq!(panel_actions(&keys, Some(ViewName::Branches)).len(), 5);
    }

    #[test]
    fn quit_is_reported_to_the_caller() {
        let mut gui = loaded_gui();
        gui.switch_to(None, ViewName::Files).unwrap();
        assert!(gui.run_action(Action::Quit).unwrap());
        assert!(!gui.run_action(Action::NextPanel).unwrap());
        assert_eq!(gui.current_view_name(), Some(ViewName::Branches));
    }
}
