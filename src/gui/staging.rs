//! Staging panel: the unstaged diff of one file, over the main panel.

use anyhow::Result;

use super::Gui;
use crate::{git::File, view::ViewName};

impl Gui {
    /// Show the unstaged diff of `file` in a view laid over main.
    pub fn open_staging_panel(&mut self, file: &File) -> Result<()> {
        let from = self.current_view_name();
        let diff = self.repo.file_diff(file, false)?;
        // Created once with main's frame; layout keeps the two in step.
        if self.views.view(ViewName::Staging).is_err() {
            let (x0, y0, x1, y1) = self.views.view(ViewName::Main)?.dimensions();
            self.views.set_view(ViewName::Staging, x0, y0, x1, y1);
        }
        self.views.view_mut(ViewName::Staging)?.title = format!("Staging: {}", file.name);
        self.render_string(ViewName::Staging, diff);
        self.switch_to(from, ViewName::Staging)
    }

    /// Hide the staging view and go back to the files panel.
    pub(super) fn close_staging_panel(&mut self) -> Result<()> {
        self.views.hide_view(ViewName::Staging)?;
        self.return_to_previous(Some(ViewName::Staging))
    }
}
