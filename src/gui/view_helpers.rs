//! Rendering into views, view accessors and popup sizing.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::Gui;
use crate::{
    geometry::focus_point,
    layout::confirmation_panel_dimensions,
    utils::{ListItem, normalize_linefeeds, render_list, strip_bom},
    view::{View, ViewName},
    view_service::ViewService,
};

/// Popups sized from their own content.
const CONTENT_SIZED_POPUPS: [ViewName; 3] = [
    ViewName::CommitMessage,
    ViewName::Credentials,
    ViewName::Confirmation,
];

/// Replace the content of `name` right away. A missing view is not an error.
pub fn synchronous_render_string(views: &mut ViewService, name: ViewName, s: &str) -> Result<()> {
    let Ok(v) = views.view_mut(name) else {
        return Ok(());
    };
    v.clear();
    v.set_origin(0, 0)?;
    v.write_str(&normalize_linefeeds(strip_bom(s)));
    Ok(())
}

/// Buffer content without surrounding ASCII whitespace.
pub fn trimmed_content(v: &View) -> &str {
    v.buffer().trim_matches(|c: char| c.is_ascii_whitespace())
}

impl Gui {
    /// Name of the view that has focus.
    pub fn current_view_name(&self) -> Option<ViewName> {
        self.views.current_view_name()
    }

    /// Replace the content of `name` on the next flush of the update queue.
    pub fn render_string(&self, name: ViewName, s: impl Into<String>) {
        let s = s.into();
        self.views
            .update(move |views| synchronous_render_string(views, name, &s));
    }

    /// Render `items` as columns into `name`. A malformed list opens the
    /// error panel instead.
    pub fn render_list_panel<T: ListItem>(&mut self, name: ViewName, items: &[T]) -> Result<()> {
        match render_list(items) {
            Ok(list) => {
                self.render_string(name, list);
                Ok(())
            }
            Err(e) => self.create_error_panel(&e.to_string()),
        }
    }

    /// Put the cursor of a list view on `line` once pending renders ran.
    pub(super) fn focus_list_line(&self, name: ViewName, line: i32) {
        self.views.update(move |views| {
            if let Ok(v) = views.view_mut(name) {
                focus_point(0, line, v)?;
            }
            Ok(())
        });
    }

    /// Reload every side panel. Stops at the first failing panel.
    pub fn refresh_side_panels(&mut self) -> Result<()> {
        self.refresh_branches()?;
        self.refresh_files()?;
        self.refresh_commits()?;
        self.refresh_stash()
    }

    /// Fit the focused popup to its content.
    pub fn resize_current_popup_panel(&mut self) -> Result<()> {
        match self.current_view_name() {
            Some(name) if CONTENT_SIZED_POPUPS.contains(&name) => {
                self.resize_popup_panel(name)?;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Fit `name` to its content. Returns `false` when it already fits and
    /// nothing was touched.
    pub fn resize_popup_panel(&mut self, name: ViewName) -> Result<bool> {
        let v = self.views.view(name)?;
        let (width, height) = self.views.size();
        let (x0, y0, x1, y1) = confirmation_panel_dimensions(width, height, v.buffer());
        if v.dimensions() == (x0, y0, x1, y1) {
            return Ok(false);
        }
        self.views.set_view(name, x0, y0, x1, y1);
        Ok(true)
    }

    /// Scroll `name` by `delta` lines, keeping at least one line on screen.
    pub(super) fn scroll_view(&mut self, name: ViewName, delta: i32) -> Result<()> {
        let v = self.views.view_mut(name)?;
        let (ox, oy) = v.origin();
        let last = v.lines_height().saturating_sub(1) as i32;
        let oy = (oy as i32 + delta).clamp(0, last.max(0));
        v.set_origin(ox as i32, oy)?;
        Ok(())
    }

    /// Apply a text-editing key to an editable view and refit it.
    pub(super) fn edit_view(&mut self, name: ViewName, key: KeyEvent) -> Result<()> {
        let v = self.views.view_mut(name)?;
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                v.write_str(c.encode_utf8(&mut [0; 4]))
            }
            KeyCode::Backspace => {
                v.pop_char();
            }
            _ => return Ok(()),
        }
        self.resize_current_popup_panel()?;
        self.place_cursor_at_end(name)
    }

    /// Move the cursor of an editable view past its last character.
    pub(super) fn place_cursor_at_end(&mut self, name: ViewName) -> Result<()> {
        let v = self.views.view_mut(name)?;
        let width = v.size().0.max(1);
        let len = v.buffer().chars().count();
        v.set_cursor((len % width) as i32, (len / width) as i32)?;
        Ok(())
    }

    // Accessors; `None` when the view was never created or was deleted.

    pub fn files_view(&self) -> Option<&View> {
        self.views.view(ViewName::Files).ok()
    }

    pub fn commits_view(&self) -> Option<&View> {
        self.views.view(ViewName::Commits).ok()
    }

    pub fn commit_message_view(&self) -> Option<&View> {
        self.views.view(ViewName::CommitMessage).ok()
    }

    pub fn branches_view(&self) -> Option<&View> {
        self.views.view(ViewName::Branches).ok()
    }

    pub fn staging_view(&self) -> Option<&View> {
        self.views.view(ViewName::Staging).ok()
    }

    pub fn main_view(&self) -> Option<&View> {
        self.views.view(ViewName::Main).ok()
    }

    pub fn stash_view(&self) -> Option<&View> {
        self.views.view(ViewName::Stash).ok()
    }
}
