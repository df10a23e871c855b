//! Undo/redo history of full item snapshots.

use crate::item::CanvasItem;

/// A full copy of a board's item sequence at one point in time.
pub type ItemSnapshot = Vec<CanvasItem>;

/// Linear undo/redo history.
///
/// Once initialized the undo stack always holds at least one snapshot: the
/// state the editor was opened with. Its top always equals the board's items
/// right after a successful commit.
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Undo history stack. Index 0 is the baseline.
    undo_stack: Vec<ItemSnapshot>,
    /// Redo history stack.
    redo_stack: Vec<ItemSnapshot>,
    /// Maximum number of undo states to keep (None = unbounded).
    limit: Option<usize>,
}

impl History {
    /// Create an empty, uninitialized history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history keeping at most `limit` undo states.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit: limit.map(|l| l.max(1)),
            ..Self::default()
        }
    }

    /// Seed the baseline snapshot. Does nothing if already initialized.
    /// Returns true if the baseline was set.
    pub fn initialize(&mut self, items: &[CanvasItem]) -> bool {
        if !self.undo_stack.is_empty() {
            return false;
        }
        self.undo_stack.push(items.to_vec());
        true
    }

    /// Record `items` as a new history state.
    ///
    /// Identical consecutive states are collapsed, so gestures that end where
    /// they started leave no trace. Returns true if a snapshot was pushed.
    pub fn commit(&mut self, items: &[CanvasItem]) -> bool {
        if self.undo_stack.last().is_some_and(|top| top.as_slice() == items) {
            return false;
        }

        self.undo_stack.push(items.to_vec());

        // Clear redo stack when new changes are made
        self.redo_stack.clear();

        // Limit undo history size
        if let Some(limit) = self.limit {
            while self.undo_stack.len() > limit {
                self.undo_stack.remove(0);
            }
        }
        true
    }

    /// Step back one state. Returns the items to restore, or None if already
    /// at the baseline.
    pub fn undo(&mut self) -> Option<ItemSnapshot> {
        if self.undo_stack.len() <= 1 {
            return None;
        }
        let current = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        self.undo_stack.last().cloned()
    }

    /// Re-apply the last undone state. Returns the items to restore, or None
    /// if there is nothing to redo.
    pub fn redo(&mut self) -> Option<ItemSnapshot> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(next.clone());
        Some(next)
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn is_initialized(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// The most recent snapshot.
    pub fn current(&self) -> Option<&[CanvasItem]> {
        self.undo_stack.last().map(Vec::as_slice)
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemKind;
    use kurbo::{Point, Size, Vec2};

    fn rect() -> CanvasItem {
        CanvasItem::new(ItemKind::Rectangle, Point::new(200.0, 200.0), Size::new(100.0, 100.0))
    }

    #[test]
    fn test_initialize_once() {
        let mut history = History::new();
        assert!(!history.is_initialized());
        assert!(history.initialize(&[]));
        assert!(!history.initialize(&[rect()]));
        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.current(), Some(&[][..]));
    }

    #[test]
    fn test_undo_empty_stack() {
        let mut history = History::new();
        history.initialize(&[]);

        assert!(!history.can_undo());
        assert!(history.undo().is_none());
        assert_eq!(history.undo_len(), 1);

        assert!(!history.can_redo());
        assert!(history.redo().is_none());
        assert_eq!(history.redo_len(), 0);
    }

    #[test]
    fn test_commit_dedup() {
        let mut history = History::new();
        history.initialize(&[]);
        let items = vec![rect()];

        assert!(history.commit(&items));
        assert!(!history.commit(&items));
        assert_eq!(history.undo_len(), 2);
    }

    #[test]
    fn test_commit_same_as_baseline_is_noop() {
        let items = vec![rect()];
        let mut history = History::new();
        history.initialize(&items);
        assert!(!history.commit(&items));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_undo_redo() {
        let mut history = History::new();
        history.initialize(&[]);
        let added = vec![rect()];
        history.commit(&added);

        assert_eq!(history.undo(), Some(vec![]));
        assert_eq!(history.redo_len(), 1);
        assert!(history.can_redo());

        assert_eq!(history.redo(), Some(added.clone()));
        assert_eq!(history.redo_len(), 0);
        assert_eq!(history.current(), Some(added.as_slice()));
    }

    #[test]
    fn test_commit_clears_redo() {
        let mut history = History::new();
        history.initialize(&[]);
        let first = vec![rect()];
        history.commit(&first);
        history.undo();
        assert!(history.can_redo());

        let mut moved = first.clone();
        moved[0].translate(Vec2::new(10.0, 0.0));
        history.commit(&moved);

        assert!(!history.can_redo());
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_history_limit() {
        let mut history = History::with_limit(Some(3));
        history.initialize(&[]);
        let mut items = vec![rect()];
        for _ in 0..5 {
            items[0].translate(Vec2::new(1.0, 0.0));
            history.commit(&items);
        }
        assert_eq!(history.undo_len(), 3);

        // The stack never drops below the baseline.
        assert!(history.undo().is_some());
        assert!(history.undo().is_some());
        assert!(history.undo().is_none());
    }
}
