use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::directory::listings::{ListingId, RatingAggregate};

/// Identifier wrapper for submitted reviews.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewId(pub String);

/// Moderation status of a review. Transitions are re-enterable: an approved
/// review can later be rejected and a rejected one re-approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }
}

/// Rating granularity accepted by a submission surface. The original
/// product mixed whole-star and half-step entry, so the step is
/// configuration rather than a hard-coded rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingStep {
    Whole,
    Half,
}

impl RatingStep {
    pub fn accepts(self, rating: f64) -> bool {
        match self {
            RatingStep::Whole => rating.fract() == 0.0,
            RatingStep::Half => (rating * 2.0).fract() == 0.0,
        }
    }
}

/// Payload accepted from the public review form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSubmission {
    pub rating: f64,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub pros: Option<String>,
    #[serde(default)]
    pub cons: Option<String>,
    #[serde(default)]
    pub reviewer_name: String,
    #[serde(default)]
    pub reviewer_email: Option<String>,
    #[serde(default)]
    pub anonymous: bool,
}

impl ReviewSubmission {
    /// Required-field check applied before any state mutation.
    pub fn validate(&self, step: RatingStep) -> Result<(), ValidationError> {
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(ValidationError::RatingOutOfRange(self.rating));
        }
        if !step.accepts(self.rating) {
            return Err(ValidationError::RatingStep(self.rating));
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        if self.body.trim().is_empty() {
            return Err(ValidationError::MissingField("body"));
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("rating {0} is outside the 0-5 range")]
    RatingOutOfRange(f64),
    #[error("rating {0} does not match the configured rating step")]
    RatingStep(f64),
}

/// A stored review belonging to exactly one listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub listing_id: ListingId,
    pub rating: f64,
    pub title: String,
    pub body: String,
    pub pros: Option<String>,
    pub cons: Option<String>,
    pub reviewer_name: String,
    pub reviewer_email: Option<String>,
    pub anonymous: bool,
    pub verified: bool,
    pub verification_method: Option<String>,
    pub status: ReviewStatus,
    pub submitted_at: DateTime<Utc>,
}

/// Mean of the given ratings rounded half-up to one decimal, with the
/// count. Zero average when the set is empty. The reduction is a plain
/// sum/count, so input order never affects the result.
pub fn aggregate_ratings(ratings: &[f64]) -> RatingAggregate {
    let count = ratings.len() as u32;
    if count == 0 {
        return RatingAggregate::ZERO;
    }
    let mean = ratings.iter().sum::<f64>() / f64::from(count);
    RatingAggregate {
        average: (mean * 10.0).round() / 10.0,
        count,
    }
}
