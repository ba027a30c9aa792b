use serde::{Deserialize, Serialize};

use crate::workflows::directory::listings::ListingId;

/// Actions the comparison surfaces dispatch against the selection store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompareAction {
    Toggle(ListingId),
    Clear,
}

/// Bounded, insertion-ordered set of listings chosen for side-by-side
/// comparison. Never persisted; each browsing session starts empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSet {
    max_items: usize,
    items: Vec<ListingId>,
}

impl ComparisonSet {
    pub fn new(max_items: usize) -> Self {
        Self {
            max_items,
            items: Vec::new(),
        }
    }

    /// Remove the id when present; append it when absent and under the
    /// bound. An attempted add beyond the bound is silently dropped, so
    /// callers should disable the control once `can_add_more` is false.
    pub fn toggle(&mut self, id: ListingId) {
        if let Some(position) = self.items.iter().position(|item| item == &id) {
            self.items.remove(position);
        } else if self.items.len() < self.max_items {
            self.items.push(id);
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Reducer form for surfaces that hold state by value.
    pub fn apply(mut state: ComparisonSet, action: CompareAction) -> ComparisonSet {
        match action {
            CompareAction::Toggle(id) => state.toggle(id),
            CompareAction::Clear => state.clear(),
        }
        state
    }

    pub fn contains(&self, id: &ListingId) -> bool {
        self.items.contains(id)
    }

    pub fn can_add_more(&self) -> bool {
        self.items.len() < self.max_items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Selected ids in insertion order, for rendering.
    pub fn items(&self) -> &[ListingId] {
        &self.items
    }
}
