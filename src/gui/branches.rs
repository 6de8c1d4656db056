//! Branches panel: local branches and their log graph.

use anyhow::Result;

use super::Gui;
use crate::view::ViewName;

impl Gui {
    /// Reload local branches, checked-out branch first, keeping the
    /// selection in range.
    pub fn refresh_branches(&mut self) -> Result<()> {
        let branches = self.repo.branches()?;
        // Clamp before rendering so the cursor lands on an existing row.
        self.state.branch_selection = self.state.branch_selection.refreshed(branches.len());
        self.render_list_panel(ViewName::Branches, &branches)?;
        self.state.branches = branches;
        self.focus_list_line(ViewName::Branches, self.state.branch_selection.line());
        Ok(())
    }

    /// Show the log graph of the selected branch in main.
    pub fn handle_branch_select(&mut self) -> Result<()> {
        let selected = self
            .state
            .branch_selection
            .index()
            .and_then(|i| self.state.branches.get(i))
            .map(|b| b.name.clone());
        let Some(name) = selected else {
            self.render_string(ViewName::Main, "No branches for this repo");
            return Ok(());
        };
        self.focus_list_line(ViewName::Branches, self.state.branch_selection.line());
        let graph = self.repo.branch_graph(&name)?;
        self.render_string(ViewName::Main, graph);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::test_support::loaded_gui;

    #[test]
    fn checked_out_branch_is_listed_first() {
        let gui = loaded_gui();
        let list = gui.branches_view().unwrap().buffer();
        assert_eq!(list, "*  master\n2d feature");
    }

    #[test]
    fn selecting_a_branch_shows_its_graph() {
        let mut gui = loaded_gui();
        gui.switch_to(None, ViewName::Branches).unwrap();
        gui.state.branch_selection = gui.state.branch_selection.moved(false);
        gui.handle_branch_select().unwrap();
        gui.views.flush_updates().unwrap();
        assert_eq!(gui.main_view().unwrap().buffer(), "graph of feature");
        assert_eq!(gui.branches_view().unwrap().cursor(), (0, 1));
    }
}
