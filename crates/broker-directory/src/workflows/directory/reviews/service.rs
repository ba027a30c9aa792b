use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::warn;

use super::domain::{
    aggregate_ratings, RatingStep, Review, ReviewId, ReviewStatus, ReviewSubmission,
    ValidationError,
};
use super::repository::ReviewRepository;
use crate::workflows::directory::listings::{ListingId, ListingRepository, RepositoryError};
use crate::workflows::directory::notify::{Notification, NotificationSender};

static REVIEW_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_review_id() -> ReviewId {
    let id = REVIEW_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ReviewId(format!("rev-{id:06}"))
}

/// Service composing the review store, the listing store the aggregates are
/// written to, and the outbound notifier.
pub struct ReviewModerationService<L, R, N> {
    listings: Arc<L>,
    reviews: Arc<R>,
    notifier: Arc<N>,
    rating_step: RatingStep,
}

impl<L, R, N> ReviewModerationService<L, R, N>
where
    L: ListingRepository + 'static,
    R: ReviewRepository + 'static,
    N: NotificationSender + 'static,
{
    pub fn new(listings: Arc<L>, reviews: Arc<R>, notifier: Arc<N>, rating_step: RatingStep) -> Self {
        Self {
            listings,
            reviews,
            notifier,
            rating_step,
        }
    }

    /// Accept a public submission into the pending queue. No listing
    /// aggregate changes until the review is approved.
    pub fn submit(
        &self,
        listing_id: ListingId,
        submission: ReviewSubmission,
    ) -> Result<Review, ModerationError> {
        submission.validate(self.rating_step)?;

        let review = Review {
            id: next_review_id(),
            listing_id,
            rating: submission.rating,
            title: submission.title,
            body: submission.body,
            pros: submission.pros,
            cons: submission.cons,
            reviewer_name: submission.reviewer_name,
            reviewer_email: submission.reviewer_email,
            anonymous: submission.anonymous,
            verified: false,
            verification_method: None,
            status: ReviewStatus::Pending,
            submitted_at: Utc::now(),
        };

        let stored = self.reviews.create(review)?;
        Ok(stored)
    }

    /// Approve a review (including re-approval of a previously rejected
    /// one) and recompute the owning listing's aggregate.
    pub fn approve(&self, review_id: &ReviewId) -> Result<Review, ModerationError> {
        self.transition(review_id, ReviewStatus::Approved, None)
    }

    /// Reject a review. A non-empty reason is forwarded verbatim to the
    /// reviewer when an address is on file; send failures never block the
    /// moderation action.
    pub fn reject(&self, review_id: &ReviewId, reason: &str) -> Result<Review, ModerationError> {
        self.transition(review_id, ReviewStatus::Rejected, Some(reason))
    }

    fn transition(
        &self,
        review_id: &ReviewId,
        status: ReviewStatus,
        reject_reason: Option<&str>,
    ) -> Result<Review, ModerationError> {
        let mut review = self
            .reviews
            .fetch(review_id)?
            .ok_or(RepositoryError::NotFound)?;

        review.status = status;
        self.reviews.update(review.clone())?;

        if let Some(reason) = reject_reason {
            if !reason.trim().is_empty() {
                self.notify_reviewer(&review, reason);
            }
        }

        if let Err(err) = self.recompute_aggregate(&review.listing_id) {
            warn!(
                review_id = %review.id.0,
                error = %err,
                "listing aggregate not refreshed after moderation"
            );
        }
        Ok(review)
    }

    /// Re-derive the aggregate from the full approved set as currently
    /// stored, then write it onto the listing. Orphaned listing references
    /// are logged and skipped so moderation is never blocked by them. The
    /// aggregate is derived data: when the refresh fails after the status
    /// change has committed, the caller logs it and the next transition
    /// recomputes from the same approved set.
    fn recompute_aggregate(&self, listing_id: &ListingId) -> Result<(), ModerationError> {
        let approved = self
            .reviews
            .list_for_listing(listing_id, Some(ReviewStatus::Approved))?;
        let ratings: Vec<f64> = approved.iter().map(|review| review.rating).collect();
        let aggregate = aggregate_ratings(&ratings);

        match self.listings.get(listing_id)? {
            Some(mut listing) => {
                listing.apply_aggregate(aggregate);
                self.listings.update(listing)?;
            }
            None => {
                warn!(
                    listing_id = %listing_id.0,
                    "skipping aggregate recompute for missing listing"
                );
            }
        }
        Ok(())
    }

    fn notify_reviewer(&self, review: &Review, reason: &str) {
        let Some(email) = review.reviewer_email.as_deref() else {
            return;
        };
        let notification = Notification {
            to: email.to_string(),
            subject: "Update on Your Review".to_string(),
            body: format!(
                "Dear {},\n\nThank you for taking the time to submit a review. \
                 After reviewing your submission, we are unable to approve it at this time.\n\n\
                 Reason: {}\n\nIf you have any questions, please don't hesitate to reach out.\n\n\
                 Best regards,\nThe Directory Team",
                review.reviewer_name, reason
            ),
        };
        if let Err(err) = self.notifier.send(notification) {
            warn!(review_id = %review.id.0, error = %err, "review rejection notice not delivered");
        }
    }

    pub fn pending(&self) -> Result<Vec<Review>, ModerationError> {
        Ok(self.reviews.list_by_status(ReviewStatus::Pending)?)
    }

    pub fn for_listing(
        &self,
        listing_id: &ListingId,
        status: Option<ReviewStatus>,
    ) -> Result<Vec<Review>, ModerationError> {
        Ok(self.reviews.list_for_listing(listing_id, status)?)
    }

    /// Queue depths for the admin dashboard header.
    pub fn queue(&self) -> Result<ModerationQueueView, ModerationError> {
        Ok(ModerationQueueView {
            pending: self.reviews.list_by_status(ReviewStatus::Pending)?.len(),
            approved: self.reviews.list_by_status(ReviewStatus::Approved)?.len(),
            rejected: self.reviews.list_by_status(ReviewStatus::Rejected)?.len(),
        })
    }
}

/// Per-status counts shown above the moderation queues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModerationQueueView {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

/// Error raised by the moderation service.
#[derive(Debug, thiserror::Error)]
pub enum ModerationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
