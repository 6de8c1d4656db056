//! Status panel: repository name, checked-out branch and upstream state.

use anyhow::Result;

use super::Gui;
use crate::{keybindings::primary_key, view::ViewName};

impl Gui {
    /// Render `↑ahead ↓behind repo → branch` into the status panel. The
    /// counts are left out without an upstream.
    pub fn refresh_status(&mut self) -> Result<()> {
        let branch = self.repo.current_branch()?;
        let upstream = match self.repo.upstream_counts()? {
            Some((ahead, behind)) => format!("↑{ahead} ↓{behind} "),
            None => String::new(),
        };
        let line = format!("{upstream}{} → {branch}", self.repo.repo_name());
        self.render_string(ViewName::Status, line);
        Ok(())
    }

    /// Summary of the repository and the main key bindings.
    pub fn handle_status_select(&mut self) -> Result<()> {
        let branch = self.repo.current_branch()?;
        let upstream = match self.repo.upstream_counts()? {
            Some((0, 0)) => "up to date with upstream".to_string(),
            Some((ahead, behind)) => format!("{ahead} ahead, {behind} behind upstream"),
            None => "no upstream configured".to_string(),
        };
        let u = &self.keys.universal;
        let f = &self.keys.files;
        let summary = [
            format!("Repository: {}", self.repo.repo_name()),
            format!("Branch:     {branch} ({upstream})"),
            String::new(),
            format!("{:<10} switch panel", primary_key(&u.next_panel)),
            format!("{:<10} open the menu of actions", primary_key(&u.menu)),
            format!("{:<10} stage or unstage a file", primary_key(&f.toggle_staged)),
            format!("{:<10} commit staged changes", primary_key(&f.commit)),
            format!("{:<10} fetch from the remote", primary_key(&u.fetch)),
            format!("{:<10} quit", primary_key(&u.quit)),
        ]
        .join("\n");
        self.render_string(ViewName::Main, summary);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::test_support::test_gui;

    #[test]
    fn status_focus_shows_summary_in_main() {
        let mut gui = test_gui();
        gui.switch_to(None, ViewName::Status).unwrap();
        gui.views.flush_updates().unwrap();
        let main = gui.main_view().unwrap().buffer();
        assert!(main.starts_with("Repository: project\n"), "{main}");
        assert!(main.contains("1 ahead, 0 behind upstream"));
        assert!(main.contains("x          open the menu"));
    }
}
