//! Snapshot undo/redo.
//!
//! Each entry is the whole line list as it was before a committed mutation.
//! Undo swaps the current list onto the redo stack and restores the snapshot;
//! redo is symmetric. Any new commit clears the redo stack.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;

use crate::doc::Line;

/// Undo and redo stacks of line-list snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    undo_stack: VecDeque<Vec<Line>>,
    redo_stack: Vec<Vec<Line>>,
    limit: Option<usize>,
}

impl History {
    /// History keeping every undo snapshot, or at most `limit` of them when
    /// one is given (a limit of zero keeps one).
    #[must_use]
    pub fn new(limit: Option<usize>) -> Self {
        Self { undo_stack: VecDeque::new(), redo_stack: Vec::new(), limit: limit.map(|n| n.max(1)) }
    }

    /// Record `previous` as the state to return to on undo and clear redo.
    pub fn record(&mut self, previous: Vec<Line>) {
        self.undo_stack.push_back(previous);
        if let Some(limit) = self.limit {
            while self.undo_stack.len() > limit {
                self.undo_stack.pop_front();
            }
        }
        self.redo_stack.clear();
    }

    /// Replace `lines` with `next`, recording the current list for undo.
    pub fn commit(&mut self, lines: &mut Vec<Line>, next: Vec<Line>) {
        let previous = std::mem::replace(lines, next);
        self.record(previous);
    }

    /// Restore the most recent snapshot. Returns `false` when there is nothing
    /// to undo.
    pub fn undo(&mut self, lines: &mut Vec<Line>) -> bool {
        let Some(snapshot) = self.undo_stack.pop_back() else {
            return false;
        };
        self.redo_stack.push(std::mem::replace(lines, snapshot));
        true
    }

    /// Re-apply the most recently undone state. Returns `false` when there is
    /// nothing to redo.
    pub fn redo(&mut self, lines: &mut Vec<Line>) -> bool {
        let Some(snapshot) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push_back(std::mem::replace(lines, snapshot));
        true
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
