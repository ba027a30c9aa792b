use serde::{Deserialize, Serialize};

use crate::workflows::directory::listings::{BrokerType, Listing, ListingKind};

/// Per-axis predicate with an explicit "all" wildcard, mirroring the
/// sentinel value the filter bars use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisFilter<T> {
    All,
    Only(T),
}

impl<T> Default for AxisFilter<T> {
    fn default() -> Self {
        AxisFilter::All
    }
}

impl<T> AxisFilter<T> {
    fn matches(&self, predicate: impl FnOnce(&T) -> bool) -> bool {
        match self {
            AxisFilter::All => true,
            AxisFilter::Only(value) => predicate(value),
        }
    }
}

/// Composed listing filter. Axes combine with logical AND; each axis
/// defaults to matching everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingFilter {
    #[serde(default)]
    pub kind: AxisFilter<ListingKind>,
    #[serde(default)]
    pub category: AxisFilter<String>,
    #[serde(default)]
    pub broker_type: AxisFilter<BrokerType>,
}

impl ListingFilter {
    pub fn matches(&self, listing: &Listing) -> bool {
        self.kind.matches(|kind| listing.kind == *kind)
            && self
                .category
                .matches(|category| listing.category.eq_ignore_ascii_case(category))
            && self
                .broker_type
                .matches(|broker| listing.broker_types.contains(broker))
    }

    /// Reduce a fetched result list, preserving source order. Idempotent:
    /// re-applying the same filter to its own output is a no-op.
    pub fn apply<'a>(&self, listings: &'a [Listing]) -> Vec<&'a Listing> {
        listings
            .iter()
            .filter(|listing| self.matches(listing))
            .collect()
    }
}

/// "Load more" pagination over an already-filtered result list. Filter
/// changes must call `reset` so the revealed window starts over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pager {
    page_size: usize,
    revealed: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            revealed: page_size,
        }
    }

    pub fn load_more(&mut self) {
        self.revealed += self.page_size;
    }

    pub fn reset(&mut self) {
        self.revealed = self.page_size;
    }

    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.revealed.min(items.len())]
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.revealed < total
    }
}
