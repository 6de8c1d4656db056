//! Focus transitions between views.

use anyhow::Result;

use super::Gui;
use crate::view::ViewName;

/// Side panels, in the order `next`/`previous` cycle through them.
pub const PRIMARY_PANELS: [ViewName; 5] = [
    ViewName::Status,
    ViewName::Files,
    ViewName::Branches,
    ViewName::Commits,
    ViewName::Stash,
];

/// Popups that are gone once they lose focus, so focus never returns to them.
pub const SECOND_CLASS_PANELS: [ViewName; 2] = [ViewName::Confirmation, ViewName::Menu];

/// Which view holds focus and where `return_to_previous` goes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FocusState {
    pub current: Option<ViewName>,
    /// Never a second-class panel.
    pub previous: Option<ViewName>,
}

impl Gui {
    /// Focus the side panel after `from`, wrapping from stash to status.
    pub fn next_primary(&mut self, from: Option<ViewName>) -> Result<()> {
        let last = PRIMARY_PANELS.len() - 1;
        let target = match from {
            None => PRIMARY_PANELS[0],
            Some(name) if name == PRIMARY_PANELS[last] => PRIMARY_PANELS[0],
            Some(name) => match PRIMARY_PANELS.iter().position(|p| *p == name) {
                Some(i) => PRIMARY_PANELS[i + 1],
                None => {
                    tracing::info!(view = %name, "not in list of views");
                    return Ok(());
                }
            },
        };
        self.switch_to(from, target)
    }

    /// Focus the side panel before `from`, wrapping from status to stash.
    pub fn previous_primary(&mut self, from: Option<ViewName>) -> Result<()> {
        let last = PRIMARY_PANELS.len() - 1;
        let target = match from {
            None => PRIMARY_PANELS[last],
            Some(name) if name == PRIMARY_PANELS[0] => PRIMARY_PANELS[last],
            Some(name) => match PRIMARY_PANELS.iter().position(|p| *p == name) {
                Some(i) => PRIMARY_PANELS[i - 1],
                None => {
                    tracing::info!(view = %name, "not in list of views");
                    return Ok(());
                }
            },
        };
        self.switch_to(from, target)
    }

    /// Move focus from `old` to `new`. Pass `old = None` when focus should
    /// not be able to come back to the old view.
    ///
    /// A failure after the old view was unhighlighted leaves the transition
    /// half done; the caller decides how to recover.
    pub fn switch_to(&mut self, old: Option<ViewName>, new: ViewName) -> Result<()> {
        // Confirmation panels never stack, so focus is never returned to one.
        if let Some(old) = old
            && old != ViewName::Confirmation
        {
            // A hidden popup is being left for good and cannot be returned to.
            let mut returnable = !SECOND_CLASS_PANELS.contains(&old);
            if let Ok(v) = self.views.view_mut(old) {
                v.highlight = false;
                returnable &= v.visible;
            }
            if returnable {
                tracing::info!(view = %old, "setting previous view");
                self.focus.previous = Some(old);
            }
        }

        self.views.view_mut(new)?.highlight = true;
        tracing::info!(view = %new, "new focused view");
        let editable = self.views.set_current_view(new)?.editable;
        self.focus.current = Some(new);
        self.views.set_view_on_top(new)?;
        self.views.cursor_visible = editable;

        self.render_panel_options()?;
        self.on_focus_enter(new)
    }

    /// Focus the previously focused view, or files when there is none or it
    /// is no longer on screen.
    pub fn return_to_previous(&mut self, old: Option<ViewName>) -> Result<()> {
        let target = match self.focus.previous {
            Some(prev) if self.views.view(prev).is_ok_and(|v| v.visible) => prev,
            _ => {
                if let Err(e) = self.views.view(ViewName::Files) {
                    tracing::error!("{e}");
                }
                ViewName::Files
            }
        };
        self.switch_to(old, target)
    }

    /// Where a reusable popup opened from `from` goes back to. The menu is
    /// torn down by the popup replacing it, so its own origin is used.
    pub(super) fn popup_origin(&self, from: Option<ViewName>) -> Option<ViewName> {
        match from {
            Some(ViewName::Menu) => self.focus.previous,
            other => other,
        }
    }

    /// Leave the just hidden popup `old` for `back`, the view it was opened
    /// from. Falls back to [`Gui::return_to_previous`] when `back` is gone.
    pub(super) fn return_from_popup(
        &mut self,
        old: ViewName,
        back: Option<ViewName>,
    ) -> Result<()> {
        match back {
            Some(back) if back != old && self.views.view(back).is_ok_and(|v| v.visible) => {
                self.switch_to(Some(old), back)
            }
            _ => self.return_to_previous(Some(old)),
        }
    }
}
