//! Vendor application intake: pending applications reviewed by an admin,
//! with approval synthesizing a live directory listing.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{ApplicationId, ApplicationStatus, VendorApplication};
pub use repository::ApplicationRepository;
pub use router::application_router;
pub use service::{ApplicationIntakeService, ApprovalOutcome, IntakeError};
