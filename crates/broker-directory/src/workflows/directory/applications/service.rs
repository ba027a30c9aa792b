use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use super::domain::{ApplicationId, ApplicationStatus, VendorApplication};
use super::repository::ApplicationRepository;
use crate::workflows::directory::listings::{
    slugify, Listing, ListingRepository, RepositoryError,
};
use crate::workflows::directory::notify::{Notification, NotificationSender};

/// Service driving the pending → approved/rejected application state
/// machine, including the listing synthesized on approval.
pub struct ApplicationIntakeService<L, A, N> {
    listings: Arc<L>,
    applications: Arc<A>,
    notifier: Arc<N>,
}

/// Result of a successful approval: the terminal application record and
/// the listing it now links to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApprovalOutcome {
    pub application: VendorApplication,
    pub listing: Listing,
}

impl<L, A, N> ApplicationIntakeService<L, A, N>
where
    L: ListingRepository + 'static,
    A: ApplicationRepository + 'static,
    N: NotificationSender + 'static,
{
    pub fn new(listings: Arc<L>, applications: Arc<A>, notifier: Arc<N>) -> Self {
        Self {
            listings,
            applications,
            notifier,
        }
    }

    /// Approve a pending application: create the listing first, then mark
    /// the application approved and link it. If the listing create fails
    /// the application is left untouched in pending. The applicant
    /// notification is best-effort.
    pub fn approve(
        &self,
        application_id: &ApplicationId,
        admin_notes: &str,
    ) -> Result<ApprovalOutcome, IntakeError> {
        let mut application = self.fetch_pending(application_id)?;

        let slug = self.unique_slug(&application.company_name)?;
        let listing = self.listings.create(application.listing_draft(slug))?;

        application.status = ApplicationStatus::Approved;
        application.vendor_id = Some(listing.id.clone());
        application.admin_notes = admin_notes.to_string();
        self.applications.update(application.clone())?;

        self.notify(
            &application,
            "Your Directory Application Has Been Approved!",
            format!(
                "Congratulations {}!\n\nYour application for {} has been approved. \
                 Your directory listing is now live.\n\nBest regards,\nThe Directory Team",
                application.contact_name, application.company_name
            ),
        );

        Ok(ApprovalOutcome {
            application,
            listing,
        })
    }

    /// Reject a pending application, appending the reason to the retained
    /// admin notes. A non-empty reason is forwarded to the applicant;
    /// delivery failure never rolls the rejection back.
    pub fn reject(
        &self,
        application_id: &ApplicationId,
        admin_notes: &str,
        reject_reason: &str,
    ) -> Result<VendorApplication, IntakeError> {
        let mut application = self.fetch_pending(application_id)?;

        application.status = ApplicationStatus::Rejected;
        application.admin_notes = format!("{admin_notes}\n\nRejection Reason: {reject_reason}");
        self.applications.update(application.clone())?;

        if !reject_reason.trim().is_empty() {
            self.notify(
                &application,
                "Update on Your Directory Application",
                format!(
                    "Dear {},\n\nThank you for your interest. After reviewing your application \
                     for {}, we are unable to approve it at this time.\n\n{}\n\n\
                     If you have any questions, please don't hesitate to reach out.\n\n\
                     Best regards,\nThe Directory Team",
                    application.contact_name, application.company_name, reject_reason
                ),
            );
        }

        Ok(application)
    }

    /// Update the retained notes without touching the status. Safe to
    /// re-invoke with the same payload.
    pub fn save_notes(
        &self,
        application_id: &ApplicationId,
        notes: &str,
    ) -> Result<VendorApplication, IntakeError> {
        let mut application = self
            .applications
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        application.admin_notes = notes.to_string();
        self.applications.update(application.clone())?;
        Ok(application)
    }

    pub fn pending(&self) -> Result<Vec<VendorApplication>, IntakeError> {
        Ok(self.applications.list_by_status(ApplicationStatus::Pending)?)
    }

    pub fn get(&self, application_id: &ApplicationId) -> Result<VendorApplication, IntakeError> {
        let application = self
            .applications
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(application)
    }

    fn fetch_pending(
        &self,
        application_id: &ApplicationId,
    ) -> Result<VendorApplication, IntakeError> {
        let application = self
            .applications
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        if application.status != ApplicationStatus::Pending {
            return Err(IntakeError::AlreadyDecided {
                status: application.status,
            });
        }
        Ok(application)
    }

    /// Slug collisions are resolved at creation time by probing numeric
    /// suffixes against the listing store.
    fn unique_slug(&self, company_name: &str) -> Result<String, IntakeError> {
        let base = slugify(company_name);
        if self.listings.get_by_slug(&base)?.is_none() {
            return Ok(base);
        }
        let mut suffix = 2u32;
        loop {
            let candidate = format!("{base}-{suffix}");
            if self.listings.get_by_slug(&candidate)?.is_none() {
                return Ok(candidate);
            }
            suffix += 1;
        }
    }

    fn notify(&self, application: &VendorApplication, subject: &str, body: String) {
        let notification = Notification {
            to: application.email.clone(),
            subject: subject.to_string(),
            body,
        };
        if let Err(err) = self.notifier.send(notification) {
            warn!(
                application_id = %application.id.0,
                error = %err,
                "applicant notification not delivered"
            );
        }
    }
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("application already {}", status.label())]
    AlreadyDecided { status: ApplicationStatus },
}
