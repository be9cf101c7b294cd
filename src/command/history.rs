use crate::surface::Snapshot;

/// Undo/redo history built on whole-canvas snapshots.
///
/// `entries[cursor]` is the state currently on screen. A cursor of `None`
/// means nothing has been committed yet (or everything has been undone), in
/// which case the `base` snapshot is what the canvas shows.
pub struct HistoryStack {
    /// State shown when the cursor is before the first entry
    base: Snapshot,
    entries: Vec<Snapshot>,
    cursor: Option<usize>,
    /// Undone snapshots, most recent last
    redo_stack: Vec<Snapshot>,
    /// Maximum number of entries kept, if bounded
    limit: Option<usize>,
}

impl HistoryStack {
    /// Creates an unbounded history whose blank state is `base`
    pub fn new(base: Snapshot) -> Self {
        Self {
            base,
            entries: Vec::new(),
            cursor: None,
            redo_stack: Vec::new(),
            limit: None,
        }
    }

    /// Creates a history that keeps at most `limit` committed entries.
    ///
    /// When a commit overflows the limit, the oldest entry becomes the new base.
    pub fn with_limit(base: Snapshot, limit: usize) -> Self {
        Self {
            limit: Some(limit.max(1)),
            ..Self::new(base)
        }
    }

    /// Record a new state. Anything after the cursor, and every redo entry, is discarded.
    pub fn commit(&mut self, snapshot: Snapshot) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.entries.truncate(keep);
        self.entries.push(snapshot);
        self.redo_stack.clear();

        if let Some(limit) = self.limit {
            while self.entries.len() > limit {
                self.base = self.entries.remove(0);
                log::debug!("History limit {} reached, dropped oldest entry", limit);
            }
        }
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Step back one state and return the snapshot to show, or `None` if
    /// there is nothing to undo.
    pub fn undo(&mut self) -> Option<Snapshot> {
        let cursor = self.cursor?;
        self.redo_stack.push(self.entries[cursor].clone());
        self.cursor = cursor.checked_sub(1);
        Some(self.current())
    }

    /// Step forward one undone state and return it, or `None` if there is
    /// nothing to redo.
    pub fn redo(&mut self) -> Option<Snapshot> {
        let snapshot = self.redo_stack.pop()?;
        let next = self.cursor.map_or(0, |c| c + 1);
        if next < self.entries.len() {
            self.entries[next] = snapshot.clone();
        } else {
            self.entries.push(snapshot.clone());
        }
        self.cursor = Some(next);
        Some(snapshot)
    }

    /// The snapshot the canvas should be showing right now
    pub fn current(&self) -> Snapshot {
        match self.cursor {
            Some(cursor) => self.entries[cursor].clone(),
            None => self.base.clone(),
        }
    }

    /// Index of the current entry, `None` for the blank state
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Number of committed entries, including undone ones not yet overwritten
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Returns true if there are states that can be undone
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    /// Returns true if there are states that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

impl std::fmt::Debug for HistoryStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStack")
            .field("entries", &self.entries.len())
            .field("cursor", &self.cursor)
            .field("redo", &self.redo_stack.len())
            .field("limit", &self.limit)
            .finish()
    }
}
