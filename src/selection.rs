//! Selected-line bookkeeping for list panels.

/// The selected row of a list panel together with the number of rows shown.
///
/// `index == None` means nothing is selected. Every constructor and
/// transition keeps `index < total` whenever an index is present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    index: Option<usize>,
    total: usize,
}

impl Selection {
    /// Nothing selected over an empty list.
    pub const fn none() -> Self {
        Self {
            index: None,
            total: 0,
        }
    }

    /// Selected row, `None` for an empty list.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Number of rows the selection was last clamped to.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Selected line as a signed row number, `-1` when nothing is selected.
    pub fn line(&self) -> i32 {
        self.index.map_or(-1, |i| i as i32)
    }

    /// One row up or down. Stops at either end and never moves out of the
    /// no-selection state.
    #[must_use]
    pub fn moved(self, up: bool) -> Self {
        let Some(i) = self.index else {
            return self;
        };
        let index = if up {
            i.saturating_sub(1)
        } else if i + 1 >= self.total {
            i
        } else {
            i + 1
        };
        Self {
            index: Some(index),
            ..self
        }
    }

    /// Re-fit the selection after the list was reloaded with `total` rows:
    /// an empty selection picks the first row, an out-of-range one is clamped
    /// to the last row, and an empty list clears the selection.
    #[must_use]
    pub fn refreshed(self, total: usize) -> Self {
        let index = match self.index {
            None if total > 0 => Some(0),
            Some(i) if i >= total => total.checked_sub(1),
            other => other,
        };
        Self { index, total }
    }

    /// Select a specific row, clamped to the current total.
    #[must_use]
    pub fn with_index(self, index: usize) -> Self {
        Self {
            index: self.total.checked_sub(1).map(|last| index.min(last)),
            ..self
        }
    }
}
