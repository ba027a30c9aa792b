use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::workflows::directory::applications::domain::{
    ApplicationId, ApplicationStatus, VendorApplication,
};
use crate::workflows::directory::applications::repository::ApplicationRepository;
use crate::workflows::directory::applications::router::application_router;
use crate::workflows::directory::applications::service::ApplicationIntakeService;
use crate::workflows::directory::listings::{
    BrokerType, Listing, ListingDraft, ListingId, ListingKind, ListingQuery, ListingRepository,
    RepositoryError,
};
use crate::workflows::directory::notify::{Notification, NotificationError, NotificationSender};

#[derive(Default, Clone)]
pub(super) struct MemoryListings {
    records: Arc<Mutex<HashMap<String, Listing>>>,
    sequence: Arc<AtomicU64>,
}

impl ListingRepository for MemoryListings {
    fn create(&self, draft: ListingDraft) -> Result<Listing, RepositoryError> {
        let mut guard = self.records.lock().expect("listing mutex poisoned");
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let listing = draft.into_listing(ListingId(format!("lst-{id:03}")), Utc::now());
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
        Ok(guard
            .values()
            .filter(|listing| query.matches(listing))
            .cloned()
            .collect())
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

/// Listing store whose create always fails, for the approval atomicity
/// contract.
#[derive(Default, Clone)]
pub(super) struct UnavailableListings;

impl ListingRepository for UnavailableListings {
    fn create(&self, _draft: ListingDraft) -> Result<Listing, RepositoryError> {
        Err(RepositoryError::Unavailable("storage offline".to_string()))
    }

    fn get(&self, _id: &ListingId) -> Result<Option<Listing>, RepositoryError> {
        Ok(None)
    }

    fn get_by_slug(&self, _slug: &str) -> Result<Option<Listing>, RepositoryError> {
        Ok(None)
    }

    fn list(&self, _query: &ListingQuery) -> Result<Vec<Listing>, RepositoryError> {
        Ok(Vec::new())
    }

    fn update(&self, _listing: Listing) -> Result<Listing, RepositoryError> {
        Err(RepositoryError::Unavailable("storage offline".to_string()))
    }

    fn delete(&self, _id: &ListingId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("storage offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryApplications {
    records: Arc<Mutex<HashMap<String, VendorApplication>>>,
}

impl MemoryApplications {
    pub(super) fn seed(&self, application: VendorApplication) {
        let mut guard = self.records.lock().expect("application mutex poisoned");
        guard.insert(application.id.0.clone(), application);
    }
}

impl ApplicationRepository for MemoryApplications {
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

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    events: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationSender for MemoryNotifier {
    fn send(&self, notification: Notification) -> Result<(), NotificationError> {
        let mut guard = self.events.lock().expect("notifier mutex poisoned");
        guard.push(notification);
        Ok(())
    }
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<Notification> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

pub(super) type Service =
    ApplicationIntakeService<MemoryListings, MemoryApplications, MemoryNotifier>;

pub(super) fn build_service() -> (
    Service,
    Arc<MemoryListings>,
    Arc<MemoryApplications>,
    Arc<MemoryNotifier>,
) {
    let listings = Arc::new(MemoryListings::default());
    let applications = Arc::new(MemoryApplications::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service =
        ApplicationIntakeService::new(listings.clone(), applications.clone(), notifier.clone());
    (service, listings, applications, notifier)
}

pub(super) fn application(id: &str, company_name: &str) -> VendorApplication {
    VendorApplication {
        id: ApplicationId(id.to_string()),
        company_name: company_name.to_string(),
        website: "https://acme.example.com".to_string(),
        company_description: "Pipeline tooling for busy brokerages.".to_string(),
        logo_url: None,
        contact_name: "Sam Reyes".to_string(),
        email: "sam@acme.example.com".to_string(),
        phone: Some("555-0100".to_string()),
        kind: ListingKind::Software,
        categories: vec!["crm".to_string(), "marketing".to_string()],
        broker_types: vec![BrokerType::Mortgage, BrokerType::CommercialFinance],
        product_service_features: Some("Automated follow-ups".to_string()),
        pricing_details: Some("From $29/mo".to_string()),
        integrations: Some("Xero, QuickBooks".to_string()),
        special_offer: None,
        referral_source: Some("industry newsletter".to_string()),
        status: ApplicationStatus::Pending,
        vendor_id: None,
        admin_notes: String::new(),
        submitted_at: Utc::now(),
    }
}

pub(super) fn router_with_service(service: Service) -> axum::Router {
    application_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
