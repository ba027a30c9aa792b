use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;

use broker_directory::workflows::directory::applications::{
    ApplicationId, ApplicationRepository, ApplicationStatus, VendorApplication,
};
use broker_directory::workflows::directory::listings::{
    BrokerType, Listing, ListingDraft, ListingId, ListingKind, ListingQuery, ListingRepository,
    ListingStatus, ListingTier, Pricing, RepositoryError,
};
use broker_directory::workflows::directory::notify::{
    Notification, NotificationError, NotificationSender,
};
use broker_directory::workflows::directory::reviews::{
    Review, ReviewId, ReviewRepository, ReviewStatus,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryListingRepository {
    records: Arc<Mutex<HashMap<String, Listing>>>,
    sequence: Arc<AtomicU64>,
}

impl ListingRepository for InMemoryListingRepository {
    fn create(&self, draft: ListingDraft) -> Result<Listing, RepositoryError> {
        let mut guard = self.records.lock().expect("listing mutex poisoned");
        if guard.values().any(|listing| listing.slug == draft.slug) {
            return Err(RepositoryError::Conflict);
        }
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let listing = draft.into_listing(ListingId(format!("lst-{id:06}")), Utc::now());
        guard.insert(listing.id.0.clone(), listing.clone());
        Ok(listing)
    }

    fn get(&self, id: &ListingId) -> Result<Option<Listing>, RepositoryError> {
        let guard = self.records.lock().expect("listing mutex poisoned");
        Ok(guard.get(&id.0).cloned())
    }

    fn get_by_slug(&self, slug: &str) -> Result<Option<Listing>, RepositoryError> {
        let guard = self.records.lock().expect("listing mutex poisoned");
        Ok(guard.values().find(|listing| listing.slug == slug).cloned())
    }

    fn list(&self, query: &ListingQuery) -> Result<Vec<Listing>, RepositoryError> {
        let guard = self.records.lock().expect("listing mutex poisoned");
        let mut listings: Vec<Listing> = guard
            .values()
            .filter(|listing| query.matches(listing))
            .cloned()
            .collect();
        listings.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(listings)
    }

    fn update(&self, listing: Listing) -> Result<Listing, RepositoryError> {
        let mut guard = self.records.lock().expect("listing mutex poisoned");
        if !guard.contains_key(&listing.id.0) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(listing.id.0.clone(), listing.clone());
        Ok(listing)
    }

    fn delete(&self, id: &ListingId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("listing mutex poisoned");
        guard.remove(&id.0).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryReviewRepository {
    records: Arc<Mutex<Vec<Review>>>,
}

impl ReviewRepository for InMemoryReviewRepository {
    fn create(&self, review: Review) -> Result<Review, RepositoryError> {
        let mut guard = self.records.lock().expect("review mutex poisoned");
        if guard.iter().any(|existing| existing.id == review.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(review.clone());
        Ok(review)
    }

    fn update(&self, review: Review) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("review mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == review.id) {
            Some(slot) => {
                *slot = review;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &ReviewId) -> Result<Option<Review>, RepositoryError> {
        let guard = self.records.lock().expect("review mutex poisoned");
        Ok(guard.iter().find(|review| &review.id == id).cloned())
    }

    fn list_for_listing(
        &self,
        listing_id: &ListingId,
        status: Option<ReviewStatus>,
    ) -> Result<Vec<Review>, RepositoryError> {
        let guard = self.records.lock().expect("review mutex poisoned");
        Ok(guard
            .iter()
            .filter(|review| &review.listing_id == listing_id)
            .filter(|review| status.map_or(true, |wanted| review.status == wanted))
            .cloned()
            .collect())
    }

    fn list_by_status(&self, status: ReviewStatus) -> Result<Vec<Review>, RepositoryError> {
        let guard = self.records.lock().expect("review mutex poisoned");
        Ok(guard
            .iter()
            .filter(|review| review.status == status)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<HashMap<String, VendorApplication>>>,
}

impl InMemoryApplicationRepository {
    pub(crate) fn seed(&self, application: VendorApplication) {
        let mut guard = self.records.lock().expect("application mutex poisoned");
        guard.insert(application.id.0.clone(), application);
    }
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn fetch(&self, id: &ApplicationId) -> Result<Option<VendorApplication>, RepositoryError> {
        let guard = self.records.lock().expect("application mutex poisoned");
        Ok(guard.get(&id.0).cloned())
    }

    fn update(&self, application: VendorApplication) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("application mutex poisoned");
        if !guard.contains_key(&application.id.0) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(application.id.0.clone(), application);
        Ok(())
    }

    fn list_by_status(
        &self,
        status: ApplicationStatus,
    ) -> Result<Vec<VendorApplication>, RepositoryError> {
        let guard = self.records.lock().expect("application mutex poisoned");
        let mut applications: Vec<VendorApplication> = guard
            .values()
            .filter(|application| application.status == status)
            .cloned()
            .collect();
        applications.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(applications)
    }
}

/// Notification adapter that records instead of delivering, so the serve
/// and demo paths stay side-effect free until a real transport is wired in.
#[derive(Default, Clone)]
pub(crate) struct RecordingNotificationSender {
    events: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationSender for RecordingNotificationSender {
    fn send(&self, notification: Notification) -> Result<(), NotificationError> {
        tracing::info!(to = %notification.to, subject = %notification.subject, "notification recorded");
        let mut guard = self.events.lock().expect("notifier mutex poisoned");
        guard.push(notification);
        Ok(())
    }
}

impl RecordingNotificationSender {
    pub(crate) fn events(&self) -> Vec<Notification> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

pub(crate) fn seed_listing(slug: &str, name: &str, kind: ListingKind, category: &str) -> ListingDraft {
    ListingDraft {
        slug: slug.to_string(),
        name: name.to_string(),
        tagline: format!("{name} for broker teams"),
        description: format!("{name} is a {category} offering for brokerages."),
        kind,
        category: category.to_string(),
        website: format!("https://{slug}.example.com"),
        email: format!("hello@{slug}.example.com"),
        phone: String::new(),
        logo_url: String::new(),
        broker_types: vec![BrokerType::Mortgage],
        features: vec!["Pipeline automation".to_string()],
        integrations: Vec::new(),
        special_offer: None,
        tier: ListingTier::Free,
        pricing: Pricing::default(),
        status: ListingStatus::Approved,
    }
}

pub(crate) fn seed_application(id: &str, company_name: &str) -> VendorApplication {
    VendorApplication {
        id: ApplicationId(id.to_string()),
        company_name: company_name.to_string(),
        website: "https://applicant.example.com".to_string(),
        company_description: "Quoting and proposal tooling for brokers.".to_string(),
        logo_url: None,
        contact_name: "Dana Wu".to_string(),
        email: "dana@applicant.example.com".to_string(),
        phone: None,
        kind: ListingKind::Software,
        categories: vec!["quoting".to_string()],
        broker_types: vec![BrokerType::CommercialFinance],
        product_service_features: Some("One-click proposals".to_string()),
        pricing_details: Some("From $19/mo".to_string()),
        integrations: Some("Salesforce, HubSpot".to_string()),
        special_offer: None,
        referral_source: Some("search".to_string()),
        status: ApplicationStatus::Pending,
        vendor_id: None,
        admin_notes: String::new(),
        submitted_at: Utc::now(),
    }
}
