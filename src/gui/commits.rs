//! Commits panel: the log of the checked-out branch.

use anyhow::Result;

use super::Gui;
use crate::view::ViewName;

impl Gui {
    /// Reload the log of the checked-out branch; unpushed commits carry an
    /// arrow.
    pub fn refresh_commits(&mut self) -> Result<()> {
        let commits = self.repo.commits()?;
        self.state.commit_selection = self.state.commit_selection.refreshed(commits.len());
        self.render_list_panel(ViewName::Commits, &commits)?;
        self.state.commits = commits;
        self.focus_list_line(ViewName::Commits, self.state.commit_selection.line());
        Ok(())
    }

    /// Show the selected commit in main.
    pub fn handle_commit_select(&mut self) -> Result<()> {
        let selected = self
            .state
            .commit_selection
            .index()
            .and_then(|i| self.state.commits.get(i))
            .map(|c| c.sha.clone());
        let Some(sha) = selected else {
            self.render_string(ViewName::Main, "No commits for this branch");
            return Ok(());
        };
        self.focus_list_line(ViewName::Commits, self.state.commit_selection.line());
        let shown = self.repo.show_commit(&sha)?;
        self.render_string(ViewName::Main, shown);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::test_support::{FakeRepo, loaded_gui, test_gui_with};

    #[test]
    fn unpushed_commits_are_marked() {
        let gui = loaded_gui();
        let list = gui.commits_view().unwrap().buffer();
        assert_eq!(list, "↑11111111 add panels\n 22222222 initial commit");
    }

    #[test]
    fn selecting_a_commit_shows_it() {
        let mut gui = loaded_gui();
        gui.switch_to(None, ViewName::Commits).unwrap();
        gui.views.flush_updates().unwrap();
        assert_eq!(gui.main_view().unwrap().buffer(), "commit 1111111111aaaa");
    }

    #[test]
    fn no_commits_message() {
        let mut gui = test_gui_with(FakeRepo {
            commits: vec![],
            ..FakeRepo::default()
        });
        gui.refresh_commits().unwrap();
        gui.switch_to(None, ViewName::Commits).unwrap();
        gui.views.flush_updates().unwrap();
        assert_eq!(gui.main_view().unwrap().buffer(), "No commits for this branch");
        assert_eq!(gui.state.commit_selection.line(), -1);
    }
}
