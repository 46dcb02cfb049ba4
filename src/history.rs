//! Linear undo/redo history over whole-state snapshots.
//!
//! Each editing tool keeps one [`History`] whose present value is the tool's
//! `{shapes, draft}` state. Callers take a snapshot immediately before a
//! mutation; undo and redo swap whole snapshots in and out.

/// Past/present/future snapshot store. Unbounded unless built with
/// [`History::with_max_history`].
///
/// ```
/// use microlabel::history::History;
///
/// let mut history = History::new(vec![1]);
/// history.checkpoint();
/// history.present_mut().push(2);
///
/// history.undo();
/// assert_eq!(history.present(), &vec![1]);
/// history.redo();
/// assert_eq!(history.present(), &vec![1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct History<T: Clone> {
    present: T,
    /// Stack of states that can be undone
    undo_stack: Vec<T>,
    /// Stack of states that can be redone
    redo_stack: Vec<T>,
    /// Maximum undo depth; `None` keeps everything
    max_history: Option<usize>,
}

impl<T: Clone + Default> Default for History<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone> History<T> {
    pub fn new(present: T) -> Self {
        Self::with_max_history(present, None)
    }

    /// With `Some(n)`, the oldest snapshots are dropped past `n` undo steps.
    pub fn with_max_history(present: T, max_history: Option<usize>) -> Self {
        Self {
            present,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_history: max_history.map(|max| max.max(1)),
        }
    }

    pub fn present(&self) -> &T {
        &self.present
    }

    /// Mutable access to the present state. Take a snapshot first if the
    /// change should be undoable.
    pub fn present_mut(&mut self) -> &mut T {
        &mut self.present
    }

    /// Push a copy of `state` onto the past (call this BEFORE making a change).
    ///
    /// This clears the redo stack since a new change invalidates the redo history.
    pub fn push_snapshot(&mut self, state: &T) {
        self.undo_stack.push(state.clone());
        self.redo_stack.clear();

        // Limit history size
        let excess = self
            .max_history
            .and_then(|max| self.undo_stack.len().checked_sub(max));
        if let Some(excess) = excess {
            self.undo_stack.drain(..excess);
        }
    }

    /// Snapshot the present state.
    pub fn checkpoint(&mut self) {
        let snapshot = self.present.clone();
        self.push_snapshot(&snapshot);
    }

    /// Step back one snapshot. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo_stack.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.redo_stack.push(current);
        true
    }

    /// Step forward one snapshot. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.undo_stack.push(current);
        true
    }

    /// Replace the present state and forget all history.
    pub fn reset(&mut self, present: T) {
        self.present = present;
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get number of undo steps available
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get number of redo steps available
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}
