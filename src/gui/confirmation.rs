//! Yes/no popups and the error panel.

use anyhow::Result;

use super::{Gui, view_helpers::synchronous_render_string};
use crate::{git::StashEntry, layout::confirmation_panel_dimensions, view::ViewName};

/// What confirming the open popup does.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Only close the popup.
    #[default]
    Dismiss,
    DropStash(StashEntry),
}

impl Gui {
    /// Open a centred popup asking `prompt`; focus comes back to the current
    /// view once it closes.
    pub fn create_confirmation_panel(
        &mut self,
        title: &str,
        prompt: &str,
        action: ConfirmAction,
    ) -> Result<()> {
        let from = self.current_view_name();
        // The popup replaces an open menu instead of stacking on it.
        if from == Some(ViewName::Menu) {
            self.discard_menu()?;
        }
        let (width, height) = self.views.size();
        let (x0, y0, x1, y1) = confirmation_panel_dimensions(width, height, prompt);
        self.views.set_view(ViewName::Confirmation, x0, y0, x1, y1);
        self.views.view_mut(ViewName::Confirmation)?.title = title.to_string();
        synchronous_render_string(&mut self.views, ViewName::Confirmation, prompt)?;
        self.state.confirm_action = action;
        self.switch_to(from, ViewName::Confirmation)
    }

    /// Show `message` in a popup titled "Error" that only dismisses.
    pub fn create_error_panel(&mut self, message: &str) -> Result<()> {
        tracing::error!("{message}");
        self.create_confirmation_panel("Error", message, ConfirmAction::Dismiss)
    }

    /// Close the popup, then run its pending action.
    pub fn handle_confirm(&mut self) -> Result<()> {
        let action = std::mem::take(&mut self.state.confirm_action);
        self.close_confirmation()?;
        match action {
            ConfirmAction::Dismiss => Ok(()),
            ConfirmAction::DropStash(entry) => {
                self.repo.stash_drop(&entry)?;
                self.refresh_stash()?;
                self.handle_stash_select()
            }
        }
    }

    /// Delete the popup without running its action.
    pub fn close_confirmation(&mut self) -> Result<()> {
        self.state.confirm_action = ConfirmAction::Dismiss;
        self.views.delete_view(ViewName::Confirmation)?;
        self.return_to_previous(Some(ViewName::Confirmation))
    }
}
