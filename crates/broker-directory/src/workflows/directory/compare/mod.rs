//! Ephemeral, per-session comparison selection plus the predicate filter
//! and load-more pager applied to already-fetched listing sets. Pure state,
//! no storage or framework dependencies.

mod filter;
mod selection;

pub use filter::{AxisFilter, ListingFilter, Pager};
pub use selection::{CompareAction, ComparisonSet};

/// Bound on the selection when embedded in home/search surfaces.
pub const EMBEDDED_COMPARE_LIMIT: usize = 3;

/// Bound on the dedicated side-by-side compare tool.
pub const COMPARE_TOOL_LIMIT: usize = 4;

/// Items revealed per "load more" activation on search result grids.
pub const DEFAULT_PAGE_SIZE: usize = 9;
