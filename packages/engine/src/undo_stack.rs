//! # Undo/Redo Stack
//!
//! Tracks user edits of page content for the in-memory engine.
//!
//! ## Design
//!
//! - Each edit records the content before and after it was applied
//! - Undo restores `before` and moves the edit to the redo stack
//! - Redo restores `after`
//! - New edits clear the redo stack
//! - Generated content (page links) is written around the stack, never
//!   through it

use crate::PageId;

/// One page content change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEdit {
    pub page: PageId,
    pub before: String,
    pub after: String,
}

/// Undo/redo stack of content edits
#[derive(Debug)]
pub struct UndoStack {
    undo_stack: Vec<ContentEdit>,
    redo_stack: Vec<ContentEdit>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
        }
    }

    /// Record an applied edit
    pub fn record(&mut self, edit: ContentEdit) {
        if edit.before == edit.after {
            return;
        }

        self.undo_stack.push(edit);
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New action invalidates the future
        self.redo_stack.clear();
    }

    /// Pop the most recent edit. Returns the page and the content to
    /// restore.
    pub fn undo(&mut self) -> Option<(PageId, String)> {
        let edit = self.undo_stack.pop()?;
        let restore = (edit.page.clone(), edit.before.clone());
        self.redo_stack.push(edit);
        Some(restore)
    }

    /// Pop the most recently undone edit
    pub fn redo(&mut self) -> Option<(PageId, String)> {
        let edit = self.redo_stack.pop()?;
        let restore = (edit.page.clone(), edit.after.clone());
        self.undo_stack.push(edit);
        Some(restore)
    }

    /// Drop history touching a removed page
    pub fn forget_page(&mut self, page: &PageId) {
        self.undo_stack.retain(|edit| &edit.page != page);
        self.redo_stack.retain(|edit| &edit.page != page);
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(page: &str, before: &str, after: &str) -> ContentEdit {
        ContentEdit {
            page: PageId::new(page),
            before: before.to_string(),
            after: after.to_string(),
        }
    }

    #[test]
    fn test_undo_stack_creation() {
        let stack = UndoStack::new();
        assert_eq!(stack.undo_levels(), 0);
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_record_undo_redo() {
        let mut stack = UndoStack::new();
        stack.record(edit("p1", "a", "b"));

        let restore = stack.undo().unwrap();
        assert_eq!(restore, (PageId::new("p1"), "a".to_string()));
        assert!(stack.can_redo());

        let restore = stack.redo().unwrap();
        assert_eq!(restore, (PageId::new("p1"), "b".to_string()));
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_undo_in_reverse_order() {
        let mut stack = UndoStack::new();
        stack.record(edit("p1", "a", "b"));
        stack.record(edit("p2", "c", "d"));

        assert_eq!(stack.undo().unwrap().0, PageId::new("p2"));
        assert_eq!(stack.undo().unwrap().0, PageId::new("p1"));
        assert!(stack.undo().is_none());
        assert_eq!(stack.redo_levels(), 2);
    }

    #[test]
    fn test_noop_edit_not_recorded() {
        let mut stack = UndoStack::new();
        stack.record(edit("p1", "same", "same"));
        assert!(!stack.can_undo());
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut stack = UndoStack::new();
        stack.record(edit("p1", "a", "b"));
        stack.undo();
        assert_eq!(stack.redo_levels(), 1);

        stack.record(edit("p1", "a", "c"));
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut stack = UndoStack::with_max_levels(2);
        for i in 0..3 {
            stack.record(edit("p1", &i.to_string(), &(i + 1).to_string()));
        }
        assert_eq!(stack.undo_levels(), 2);
    }

    #[test]
    fn test_forget_page() {
        let mut stack = UndoStack::new();
        stack.record(edit("p1", "a", "b"));
        stack.record(edit("p2", "c", "d"));
        stack.forget_page(&PageId::new("p2"));
        assert_eq!(stack.undo_levels(), 1);
    }
}
