//! Named views and the per-view surface the GUI draws into.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Every view the GUI knows about.
///
/// `Options` is the one-line hint bar at the bottom of the screen; it is a
/// render target only and never receives focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewName {
    Status,
    Files,
    Branches,
    Commits,
    Stash,
    Menu,
    Confirmation,
    CommitMessage,
    Credentials,
    Main,
    Staging,
    Options,
}

impl ViewName {
    pub const ALL: [ViewName; 12] = [
        ViewName::Status,
        ViewName::Files,
        ViewName::Branches,
        ViewName::Commits,
        ViewName::Stash,
        ViewName::Menu,
        ViewName::Confirmation,
        ViewName::CommitMessage,
        ViewName::Credentials,
        ViewName::Main,
        ViewName::Staging,
        ViewName::Options,
    ];

    /// Name used in config files and log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            ViewName::Status => "status",
            ViewName::Files => "files",
            ViewName::Branches => "branches",
            ViewName::Commits => "commits",
            ViewName::Stash => "stash",
            ViewName::Menu => "menu",
            ViewName::Confirmation => "confirmation",
            ViewName::CommitMessage => "commitMessage",
            ViewName::Credentials => "credentials",
            ViewName::Main => "main",
            ViewName::Staging => "staging",
            ViewName::Options => "options",
        }
    }
}

impl fmt::Display for ViewName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewName {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewName::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| ViewError::UnknownName(s.to_string()))
    }
}

/// Failures reported by the view service.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("unknown view: {0}")]
    UnknownView(ViewName),
    #[error("no view is named {0:?}")]
    UnknownName(String),
    #[error("invalid point ({x}, {y})")]
    InvalidPoint { x: i32, y: i32 },
}

/// A single view: a text buffer plus its viewport geometry.
#[derive(Clone, Debug)]
pub struct View {
    name: ViewName,
    pub title: String,
    buffer: String,
    cursor: (usize, usize),
    origin: (usize, usize),
    /// Frame corners `(x0, y0, x1, y1)` in screen cells, inclusive.
    dimensions: (i32, i32, i32, i32),
    /// Highlight the cursor line when drawing.
    pub highlight: bool,
    /// Keystrokes are text input rather than commands.
    pub editable: bool,
    /// Draw every buffer character as `*`.
    pub mask: bool,
    pub visible: bool,
}

impl View {
    /// Empty, visible view with zero size.
    pub fn new(name: ViewName) -> Self {
        Self {
            name,
            title: String::new(),
            buffer: String::new(),
            cursor: (0, 0),
            origin: (0, 0),
            dimensions: (0, 0, 0, 0),
            highlight: false,
            editable: false,
            mask: false,
            visible: true,
        }
    }

    pub fn name(&self) -> ViewName {
        self.name
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Append to the buffer.
    pub fn write_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    /// Drop the last character, used by editable views.
    pub fn pop_char(&mut self) -> Option<char> {
        self.buffer.pop()
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    /// Cursor relative to the origin. Negative points are rejected.
    pub fn set_cursor(&mut self, x: i32, y: i32) -> Result<(), ViewError> {
        self.cursor = to_point(x, y)?;
        Ok(())
    }

    pub fn origin(&self) -> (usize, usize) {
        self.origin
    }

    /// First visible column and row of the buffer.
    pub fn set_origin(&mut self, x: i32, y: i32) -> Result<(), ViewError> {
        self.origin = to_point(x, y)?;
        Ok(())
    }

    /// Outer frame corners `(x0, y0, x1, y1)`, inclusive.
    pub fn dimensions(&self) -> (i32, i32, i32, i32) {
        self.dimensions
    }

    pub(crate) fn set_dimensions(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        self.dimensions = (x0, y0, x1, y1);
    }

    /// Inner size of the view, excluding its frame.
    pub fn size(&self) -> (usize, usize) {
        let (x0, y0, x1, y1) = self.dimensions;
        (
            (x1 - x0 - 1).max(0) as usize,
            (y1 - y0 - 1).max(0) as usize,
        )
    }

    /// Number of logical lines in the buffer.
    pub fn lines_height(&self) -> usize {
        self.buffer.lines().count()
    }

    /// Buffer line the cursor sits on.
    pub fn cursor_line(&self) -> usize {
        self.origin.1 + self.cursor.1
    }
}

fn to_point(x: i32, y: i32) -> Result<(usize, usize), ViewError> {
    if x < 0 || y < 0 {
        return Err(ViewError::InvalidPoint { x, y });
    }
    Ok((x as usize, y as usize))
}
