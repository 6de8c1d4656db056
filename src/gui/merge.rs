//! Conflict view of the main panel.

use anyhow::Result;

use super::Gui;
use crate::{
    geometry::{focus_point, general_focus_line},
    view::ViewName,
};

/// Line numbers of one conflict's markers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Conflict {
    pub start: usize,
    pub middle: usize,
    pub end: usize,
}

/// Conflicts in `content`, in file order. Incomplete marker runs are skipped.
pub fn find_conflicts(content: &str) -> Vec<Conflict> {
    let mut conflicts = vec![];
    let (mut start, mut middle) = (None, None);
    for (i, line) in content.lines().enumerate() {
        if line.starts_with("<<<<<<< ") || line == "<<<<<<<" {
            start = Some(i);
            middle = None;
        } else if line == "=======" && start.is_some() {
            middle = Some(i);
        } else if (line.starts_with(">>>>>>> ") || line == ">>>>>>>")
            && let (Some(s), Some(m)) = (start, middle)
        {
            conflicts.push(Conflict {
                start: s,
                middle: m,
                end: i,
            });
            start = None;
            middle = None;
        }
    }
    conflicts
}

impl Gui {
    /// Show the selected file in main: its content with the current conflict
    /// in view, or its diff when it has no conflicts.
    pub fn refresh_merge_panel(&mut self) -> Result<()> {
        let Some(file) = self.selected_file() else {
            self.state.conflicts.clear();
            return Ok(());
        };
        let content = self.repo.file_content(&file.name)?;
        let conflicts = find_conflicts(&content);
        if conflicts.is_empty() {
            self.state.conflicts.clear();
            self.state.conflict_index = 0;
            let diff = self.repo.file_diff(&file, false)?;
            self.render_string(ViewName::Main, diff);
            return Ok(());
        }

        self.state.conflict_index = self.state.conflict_index.min(conflicts.len() - 1);
        let conflict = conflicts[self.state.conflict_index];
        self.state.conflicts = conflicts;
        self.render_string(ViewName::Main, content);
        self.views.update(move |views| {
            let v = views.view_mut(ViewName::Main)?;
            // Conflicts taller than the view cannot show both ends.
            if general_focus_line(conflict.start as i32, conflict.end as i32, v).is_err() {
                focus_point(0, conflict.start as i32, v)?;
            }
            Ok(())
        });
        Ok(())
    }

    /// Step to the previous or next conflict of the file.
    pub(super) fn select_conflict(&mut self, up: bool) -> Result<()> {
        if self.state.conflicts.is_empty() {
            return Ok(());
        }
        let last = self.state.conflicts.len() - 1;
        self.state.conflict_index = if up {
            self.state.conflict_index.saturating_sub(1)
        } else {
            (self.state.conflict_index + 1).min(last)
        };
        self.refresh_merge_panel()
    }
}
