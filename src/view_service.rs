//! In-memory view registry: lookup by name, z-order, current view and the
//! deferred update queue that serialises buffer mutations onto the UI thread.

use std::collections::HashMap;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::view::{View, ViewError, ViewName};

/// A mutation deferred until the next flush of the update queue.
pub type Update = Box<dyn FnOnce(&mut ViewService) -> Result<()> + Send>;

/// Owns every view plus the state shared between them.
pub struct ViewService {
    views: HashMap<ViewName, View>,
    /// Draw order, bottom first.
    stack: Vec<ViewName>,
    current: Option<ViewName>,
    /// Show the terminal cursor at the current view's cursor.
    pub cursor_visible: bool,
    /// Terminal size in cells.
    size: (i32, i32),
    updates_tx: mpsc::UnboundedSender<Update>,
    updates_rx: mpsc::UnboundedReceiver<Update>,
}

impl ViewService {
    /// Empty service for a terminal of `width` x `height` cells.
    pub fn new(width: i32, height: i32) -> Self {
        let (updates_tx, updates_rx) = mpsc::unbounded_channel();
        Self {
            views: HashMap::new(),
            stack: vec![],
            current: None,
            cursor_visible: false,
            size: (width, height),
            updates_tx,
            updates_rx,
        }
    }

    /// Terminal size in cells, as of the last layout pass.
    pub fn size(&self) -> (i32, i32) {
        self.size
    }

    /// Record a new terminal size; views are moved by the layout pass.
    pub fn set_size(&mut self, width: i32, height: i32) {
        self.size = (width, height);
    }

    /// Look up a view by name.
    pub fn view(&self, name: ViewName) -> Result<&View, ViewError> {
        self.views.get(&name).ok_or(ViewError::UnknownView(name))
    }

    pub fn view_mut(&mut self, name: ViewName) -> Result<&mut View, ViewError> {
        self.views.get_mut(&name).ok_or(ViewError::UnknownView(name))
    }

    /// Create or move a view. Returns `true` when the view was created by
    /// this call, so callers can initialise it once.
    pub fn set_view(&mut self, name: ViewName, x0: i32, y0: i32, x1: i32, y1: i32) -> bool {
        let created = !self.views.contains_key(&name);
        let view = self.views.entry(name).or_insert_with(|| View::new(name));
        view.set_dimensions(x0, y0, x1, y1);
        if created {
            self.stack.push(name);
        }
        created
    }

    /// Remove a view. Focus is dropped when it was the current view.
    pub fn delete_view(&mut self, name: ViewName) -> Result<(), ViewError> {
        self.views
            .remove(&name)
            .ok_or(ViewError::UnknownView(name))?;
        self.stack.retain(|n| *n != name);
        if self.current == Some(name) {
            self.current = None;
        }
        Ok(())
    }

    /// Give `name` focus and hand it back for further setup.
    pub fn set_current_view(&mut self, name: ViewName) -> Result<&mut View, ViewError> {
        let view = self.views.get_mut(&name).ok_or(ViewError::UnknownView(name))?;
        self.current = Some(name);
        Ok(view)
    }

    pub fn current_view(&self) -> Option<&View> {
        self.current.and_then(|n| self.views.get(&n))
    }

    pub fn current_view_name(&self) -> Option<ViewName> {
        self.current
    }

    /// Move a view to the top of the draw order and make it visible.
    pub fn set_view_on_top(&mut self, name: ViewName) -> Result<(), ViewError> {
        let view = self.views.get_mut(&name).ok_or(ViewError::UnknownView(name))?;
        view.visible = true;
        self.stack.retain(|n| *n != name);
        self.stack.push(name);
        Ok(())
    }

    /// Keep the view but stop drawing it.
    pub fn hide_view(&mut self, name: ViewName) -> Result<(), ViewError> {
        self.view_mut(name)?.visible = false;
        Ok(())
    }

    /// Visible views in draw order.
    pub fn visible_views(&self) -> impl Iterator<Item = &View> {
        self.stack
            .iter()
            .filter_map(|n| self.views.get(n))
            .filter(|v| v.visible)
    }

    /// Queue a mutation to run on the next flush.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut ViewService) -> Result<()> + Send + 'static,
    {
        // The receiver lives in `self`, so the send cannot fail.
        let _ = self.updates_tx.send(Box::new(f));
    }

    /// Run queued mutations in submission order. Stops at the first error.
    pub fn flush_updates(&mut self) -> Result<()> {
        while let Ok(update) = self.updates_rx.try_recv() {
            update(self)?;
        }
        Ok(())
    }

    /// True while queued mutations have not been flushed yet.
    pub fn has_pending_updates(&self) -> bool {
        !self.updates_rx.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_view_reports_creation_once() {
        let mut views = ViewService::new(80, 24);
        assert!(views.set_view(ViewName::Files, 0, 0, 10, 10));
        assert!(!views.set_view(ViewName::Files, 0, 0, 20, 10));
        assert_eq!(views.view(ViewName::Files).unwrap().dimensions(), (0, 0, 20, 10));
    }

    #[test]
    fn lookup_of_missing_view_fails() {
        let views = ViewService::new(80, 24);
        assert_eq!(
            views.view(ViewName::Menu).err(),
            Some(ViewError::UnknownView(ViewName::Menu))
        );
    }

    #[test]
    fn set_view_on_top_reorders_stack() {
        let mut views = ViewService::new(80, 24);
        views.set_view(ViewName::Files, 0, 0, 10, 10);
        views.set_view(ViewName::Branches, 0, 0, 10, 10);
        views.set_view_on_top(ViewName::Files).unwrap();
        let order: Vec<_> = views.visible_views().map(|v| v.name()).collect();
        assert_eq!(order, vec![ViewName::Branches, ViewName::Files]);
    }

    #[test]
    fn deleting_current_view_clears_current() {
        let mut views = ViewService::new(80, 24);
        views.set_view(ViewName::Menu, 0, 0, 10, 10);
        views.set_current_view(ViewName::Menu).unwrap();
        views.delete_view(ViewName::Menu).unwrap();
        assert!(views.current_view().is_none());
        assert_eq!(views.visible_views().count(), 0);
    }

    #[test]
    fn updates_run_in_submission_order_on_flush() {
        let mut views = ViewService::new(80, 24);
        views.set_view(ViewName::Main, 0, 0, 10, 10);
        views.update(|g| {
            g.view_mut(ViewName::Main)?.write_str("a");
            Ok(())
        });
        views.update(|g| {
            g.view_mut(ViewName::Main)?.write_str("b");
            Ok(())
        });
        assert_eq!(views.view(ViewName::Main).unwrap().buffer(), "");
        assert!(views.has_pending_updates());
        views.flush_updates().unwrap();
        assert_eq!(views.view(ViewName::Main).unwrap().buffer(), "ab");
        assert!(!views.has_pending_updates());
    }

    #[test]
    fn flush_stops_at_first_error() {
        let mut views = ViewService::new(80, 24);
        views.update(|g| {
            g.view_mut(ViewName::Main)?;
            Ok(())
        });
        views.update(|g| {
            g.set_view(ViewName::Main, 0, 0, 1, 1);
            Ok(())
        });
        assert!(views.flush_updates().is_err());
        assert!(views.view(ViewName::Main).is_err());
        // The remaining update is still queued.
        views.flush_updates().unwrap();
        assert!(views.view(ViewName::Main).is_ok());
    }
}
