use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::workflows::directory::listings::{
    BrokerType, Listing, ListingDraft, ListingId, ListingKind, ListingQuery, ListingRepository,
    ListingStatus, ListingTier, Pricing, RepositoryError,
};
use crate::workflows::directory::notify::{Notification, NotificationError, NotificationSender};
use crate::workflows::directory::reviews::domain::{
    RatingStep, Review, ReviewId, ReviewStatus, ReviewSubmission,
};
use crate::workflows::directory::reviews::repository::ReviewRepository;
use crate::workflows::directory::reviews::router::review_router;
use crate::workflows::directory::reviews::service::ReviewModerationService;

#[derive(Default, Clone)]
pub(super) struct MemoryListings {
    records: Arc<Mutex<HashMap<String, Listing>>>,
    sequence: Arc<AtomicU64>,
}

impl MemoryListings {
    pub(super) fn seed_approved(&self, slug: &str) -> Listing {
        let draft = ListingDraft {
            slug: slug.to_string(),
            name: slug.to_uppercase(),
            tagline: String::new(),
            description: "Seeded listing".to_string(),
            kind: ListingKind::Software,
            category: "crm".to_string(),
            website: "https://example.com".to_string(),
            email: "hello@example.com".to_string(),
            phone: String::new(),
            logo_url: String::new(),
            broker_types: vec![BrokerType::Mortgage],
            features: Vec::new(),
            integrations: Vec::new(),
            special_offer: None,
            tier: ListingTier::Free,
            pricing: Pricing::default(),
            status: ListingStatus::Approved,
        };
        self.create(draft).expect("seed listing")
    }
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
pub(super) struct MemoryReviews {
    records: Arc<Mutex<Vec<Review>>>,
}

impl ReviewRepository for MemoryReviews {
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

/// Listing store that reads fine but refuses writes, for the contract that
/// a failed aggregate refresh never rolls back a committed moderation
/// action.
#[derive(Default, Clone)]
pub(super) struct ReadOnlyListings {
    inner: MemoryListings,
}

impl ReadOnlyListings {
    pub(super) fn new(inner: MemoryListings) -> Self {
        Self { inner }
    }
}

impl ListingRepository for ReadOnlyListings {
    fn create(&self, _draft: ListingDraft) -> Result<Listing, RepositoryError> {
        Err(RepositoryError::Unavailable("writes disabled".to_string()))
    }

    fn get(&self, id: &ListingId) -> Result<Option<Listing>, RepositoryError> {
        self.inner.get(id)
    }

    fn get_by_slug(&self, slug: &str) -> Result<Option<Listing>, RepositoryError> {
        self.inner.get_by_slug(slug)
    }

    fn list(&self, query: &ListingQuery) -> Result<Vec<Listing>, RepositoryError> {
        self.inner.list(query)
    }

    fn update(&self, _listing: Listing) -> Result<Listing, RepositoryError> {
        Err(RepositoryError::Unavailable("writes disabled".to_string()))
    }

    fn delete(&self, _id: &ListingId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("writes disabled".to_string()))
    }
}

/// Notifier double whose transport always fails, for the swallow-and-log
/// contract.
#[derive(Default, Clone)]
pub(super) struct FailingNotifier;

impl NotificationSender for FailingNotifier {
    fn send(&self, _notification: Notification) -> Result<(), NotificationError> {
        Err(NotificationError::Transport("smtp down".to_string()))
    }
}

pub(super) type Service = ReviewModerationService<MemoryListings, MemoryReviews, MemoryNotifier>;

pub(super) fn build_service() -> (
    Service,
    Arc<MemoryListings>,
    Arc<MemoryReviews>,
    Arc<MemoryNotifier>,
) {
    let listings = Arc::new(MemoryListings::default());
    let reviews = Arc::new(MemoryReviews::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = ReviewModerationService::new(
        listings.clone(),
        reviews.clone(),
        notifier.clone(),
        RatingStep::Half,
    );
    (service, listings, reviews, notifier)
}

pub(super) fn submission(rating: f64) -> ReviewSubmission {
    ReviewSubmission {
        rating,
        title: "Solid CRM".to_string(),
        body: "Cut our admin time in half.".to_string(),
        pros: Some("Great pipeline view".to_string()),
        cons: None,
        reviewer_name: "Jordan Hale".to_string(),
        reviewer_email: Some("jordan@example.com".to_string()),
        anonymous: false,
    }
}

pub(super) fn router_with_service(service: Service) -> axum::Router {
    review_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
