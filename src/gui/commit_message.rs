//! Commit message popup.

use anyhow::Result;

use super::{Gui, trimmed_content};
use crate::{layout::confirmation_panel_dimensions, view::ViewName};

impl Gui {
    /// Show the commit message popup, keeping a draft from last time.
    pub fn open_commit_message_panel(&mut self) -> Result<()> {
        let from = self.current_view_name();
        if from == Some(ViewName::Menu) {
            self.discard_menu()?;
        }
        self.state.commit_message_return = self.popup_origin(from);
        if self.views.view(ViewName::CommitMessage).is_err() {
            let (width, height) = self.views.size();
            let (x0, y0, x1, y1) = confirmation_panel_dimensions(width, height, "");
            self.views.set_view(ViewName::CommitMessage, x0, y0, x1, y1);
            let v = self.views.view_mut(ViewName::CommitMessage)?;
            v.title = "Commit message".to_string();
            v.editable = true;
        }
        self.switch_to(from, ViewName::CommitMessage)?;
        self.place_cursor_at_end(ViewName::CommitMessage)
    }

    /// Focus handler: show the confirm/close hints.
    pub fn handle_commit_focused(&mut self) -> Result<()> {
        self.render_prompt_options()
    }

    /// Commit staged changes with the typed message.
    pub(super) fn submit_commit_message(&mut self) -> Result<()> {
        let message = self
            .commit_message_view()
            .map(|v| trimmed_content(v).to_string())
            .unwrap_or_default();
        if message.is_empty() {
            return self.create_error_panel("You cannot commit without a commit message");
        }
        self.repo.commit(&message)?;
        self.views.view_mut(ViewName::CommitMessage)?.clear();
        self.close_commit_message_panel()?;
        self.refresh_side_panels()
    }

    /// Hide the popup, keeping any typed text for the next time.
    pub(super) fn close_commit_message_panel(&mut self) -> Result<()> {
        self.views.hide_view(ViewName::CommitMessage)?;
        let back = self.state.commit_message_return.take();
        self.return_from_popup(ViewName::CommitMessage, back)
    }
}
