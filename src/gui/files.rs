//! Files panel: working tree changes, staging and committing.

use anyhow::Result;

use super::Gui;
use crate::{
    git::File,
    utils::{normalize_linefeeds, strip_bom},
    view::ViewName,
};

impl Gui {
    /// File under the cursor, if any.
    pub fn selected_file(&self) -> Option<File> {
        self.state
            .file_selection
            .index()
            .and_then(|i| self.state.files.get(i))
            .cloned()
    }

    /// Reload changed files, the status line, and the diff when files is
    /// focused.
    pub fn refresh_files(&mut self) -> Result<()> {
        // Main's buffer only reflects what is shown when nothing is queued.
        let main_settled = !self.views.has_pending_updates();
        let files = self.repo.files()?;
        self.state.file_selection = self.state.file_selection.refreshed(files.len());
        self.render_list_panel(ViewName::Files, &files)?;
        self.state.files = files;
        self.focus_list_line(ViewName::Files, self.state.file_selection.line());

        self.refresh_status()?;
        if self.current_view_name() == Some(ViewName::Files) {
            self.show_selected_file(!main_settled)?;
        }
        Ok(())
    }

    /// Show the selected file in main.
    pub fn handle_file_select(&mut self) -> Result<()> {
        self.show_selected_file(true)
    }

    /// Render the selected file's diff into main. Unless `force` is set, a
    /// diff identical to what main already shows is left alone so its scroll
    /// position survives.
    fn show_selected_file(&mut self, force: bool) -> Result<()> {
        let Some(file) = self.selected_file() else {
            self.render_string(ViewName::Main, "No changed files");
            return Ok(());
        };
        self.focus_list_line(ViewName::Files, self.state.file_selection.line());
        if file.has_merge_conflicts {
            return self.refresh_merge_panel();
        }
        let cached = file.has_staged_changes && !file.has_unstaged_changes;
        let diff = self.repo.file_diff(&file, cached)?;
        let unchanged = self
            .main_view()
            .is_some_and(|v| v.buffer() == normalize_linefeeds(strip_bom(&diff)));
        if force || !unchanged {
            self.render_string(ViewName::Main, diff);
        }
        Ok(())
    }

    /// Stage the selected file, or unstage it when it has staged changes.
    pub(super) fn toggle_staged(&mut self) -> Result<()> {
        let Some(file) = self.selected_file() else {
            return Ok(());
        };
        if file.has_merge_conflicts {
            return self.create_error_panel("Resolve the merge conflicts before staging this file");
        }
        if file.has_staged_changes {
            self.repo.unstage_file(&file)?;
        } else {
            self.repo.stage_file(&file.name)?;
        }
        self.refresh_files()
    }

    /// Open the commit popup when something is staged.
    pub(super) fn start_commit(&mut self) -> Result<()> {
        if !self.state.files.iter().any(|f| f.has_staged_changes) {
            return self.create_error_panel("There are no staged files to commit");
        }
        self.open_commit_message_panel()
    }

    /// Enter on a file: conflicts go to the merge view, tracked changes to
    /// the staging view.
    pub(super) fn start_staging(&mut self) -> Result<()> {
        match self.selected_file() {
            Some(file) if file.has_merge_conflicts => self.resolve_conflicts(),
            Some(file) if file.tracked && file.has_unstaged_changes => {
                self.open_staging_panel(&file)
            }
            Some(_) => self.create_error_panel("This file has no unstaged changes"),
            None => Ok(()),
        }
    }

    /// Focus main to step through the conflicts of the selected file.
    pub(super) fn resolve_conflicts(&mut self) -> Result<()> {
        match self.selected_file() {
            Some(file) if file.has_merge_conflicts => {
                self.switch_to(self.current_view_name(), ViewName::Main)
            }
            Some(_) => self.create_error_panel("This file has no merge conflicts"),
            None => Ok(()),
        }
    }
}
