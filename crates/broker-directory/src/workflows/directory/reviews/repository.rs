use super::domain::{Review, ReviewId, ReviewStatus};
use crate::workflows::directory::listings::{ListingId, RepositoryError};

/// Storage abstraction for reviews so the moderation service can be
/// exercised against in-memory doubles.
pub trait ReviewRepository: Send + Sync {
    fn create(&self, review: Review) -> Result<Review, RepositoryError>;
    fn update(&self, review: Review) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ReviewId) -> Result<Option<Review>, RepositoryError>;
    fn list_for_listing(
        &self,
        listing_id: &ListingId,
        status: Option<ReviewStatus>,
    ) -> Result<Vec<Review>, RepositoryError>;
    fn list_by_status(&self, status: ReviewStatus) -> Result<Vec<Review>, RepositoryError>;
}
