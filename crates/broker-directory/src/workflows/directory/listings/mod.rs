//! Directory listing domain types and the storage abstraction the
//! moderation and intake workflows write through.

pub mod domain;
pub mod repository;
pub mod router;
mod slug;

pub use domain::{
    BrokerType, Listing, ListingDraft, ListingId, ListingKind, ListingStatus, ListingTier,
    Pricing, RatingAggregate,
};
pub use repository::{ListingQuery, ListingRepository, RepositoryError};
pub use router::listing_router;
pub use slug::slugify;
