use super::domain::{BrokerType, Listing, ListingDraft, ListingId, ListingKind, ListingStatus};

/// Error enumeration shared by the directory repositories.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Predicate set for listing queries. `None` on an axis matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingQuery {
    pub status: Option<ListingStatus>,
    pub kind: Option<ListingKind>,
    pub category: Option<String>,
    pub broker_type: Option<BrokerType>,
}

impl ListingQuery {
    pub fn approved() -> Self {
        ListingQuery {
            status: Some(ListingStatus::Approved),
            ..ListingQuery::default()
        }
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(status) = self.status {
            if listing.status != status {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if listing.kind != kind {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if !listing.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(broker_type) = self.broker_type {
            if !listing.broker_types.contains(&broker_type) {
                return false;
            }
        }
        true
    }
}

/// Storage abstraction so the moderation and intake services can be
/// exercised in isolation.
pub trait ListingRepository: Send + Sync {
    fn create(&self, draft: ListingDraft) -> Result<Listing, RepositoryError>;
    fn get(&self, id: &ListingId) -> Result<Option<Listing>, RepositoryError>;
    fn get_by_slug(&self, slug: &str) -> Result<Option<Listing>, RepositoryError>;
    fn list(&self, query: &ListingQuery) -> Result<Vec<Listing>, RepositoryError>;
    fn update(&self, listing: Listing) -> Result<Listing, RepositoryError>;
    fn delete(&self, id: &ListingId) -> Result<(), RepositoryError>;
}
