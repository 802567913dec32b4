use std::collections::BTreeSet;

/// Working copy of an entity during one editing interaction.
///
/// The draft mirrors the pristine baseline until mutated; nothing here is
/// ever persisted. Dirtiness is a structural comparison against the
/// baseline, OR-ed with any pending deletions. Discarding and
/// re-baselining are always local and never perform I/O.
#[derive(Debug, Clone)]
pub struct EditSession<T: Clone + PartialEq> {
    baseline: T,
    draft: T,
    pending_deletions: BTreeSet<i64>,
    editing: bool,
}

impl<T: Clone + PartialEq> EditSession<T> {
    pub fn new(baseline: T) -> Self {
        Self {
            draft: baseline.clone(),
            baseline,
            pending_deletions: BTreeSet::new(),
            editing: false,
        }
    }

    pub fn baseline(&self) -> &T {
        &self.baseline
    }

    pub fn draft(&self) -> &T {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut T {
        &mut self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Entering edit mode copies nothing; the draft already mirrors the
    /// baseline at rest. This only gates form interactivity.
    pub fn enter_edit(&mut self) {
        self.editing = true;
    }

    pub fn exit_edit(&mut self) {
        self.editing = false;
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.baseline || !self.pending_deletions.is_empty()
    }

    /// Records a child id for deletion on save. Idempotent; returns
    /// whether the id was newly marked.
    pub fn mark_delete(&mut self, id: i64) -> bool {
        self.pending_deletions.insert(id)
    }

    pub fn unmark_delete(&mut self, id: i64) -> bool {
        self.pending_deletions.remove(&id)
    }

    pub fn pending_deletions(&self) -> &BTreeSet<i64> {
        &self.pending_deletions
    }

    /// Reverts the draft to the baseline, clears pending deletions and
    /// exits edit mode.
    pub fn discard(&mut self) {
        self.draft = self.baseline.clone();
        self.pending_deletions.clear();
        self.editing = false;
    }

    /// Atomically replaces baseline, draft and deletions. Any in-progress
    /// edit on the previous entity is abandoned without confirmation;
    /// callers that want to prompt must check [`is_dirty`] first.
    ///
    /// [`is_dirty`]: EditSession::is_dirty
    pub fn rebaseline(&mut self, baseline: T) {
        self.draft = baseline.clone();
        self.baseline = baseline;
        self.pending_deletions.clear();
        self.editing = false;
    }
}
