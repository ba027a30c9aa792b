//! Review submission and admin moderation, including the aggregate rating
//! recompute written back onto the owning listing.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    aggregate_ratings, RatingStep, Review, ReviewId, ReviewStatus, ReviewSubmission,
    ValidationError,
};
pub use repository::ReviewRepository;
pub use router::review_router;
pub use service::{ModerationError, ModerationQueueView, ReviewModerationService};
