use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for directory listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingId(pub String);

/// Broad shape of what a listing offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingKind {
    Software,
    Service,
}

impl ListingKind {
    pub const fn label(self) -> &'static str {
        match self {
            ListingKind::Software => "software",
            ListingKind::Service => "service",
        }
    }
}

/// Broker audiences a vendor targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrokerType {
    Mortgage,
    CommercialFinance,
    Insurance,
    Property,
}

impl BrokerType {
    pub const fn label(self) -> &'static str {
        match self {
            BrokerType::Mortgage => "mortgage",
            BrokerType::CommercialFinance => "commercial_finance",
            BrokerType::Insurance => "insurance",
            BrokerType::Property => "property",
        }
    }
}

/// Paid placement tier for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingTier {
    Free,
    Premium,
    Featured,
}

impl ListingTier {
    pub const fn label(self) -> &'static str {
        match self {
            ListingTier::Free => "free",
            ListingTier::Premium => "premium",
            ListingTier::Featured => "featured",
        }
    }
}

/// Moderation status governing public visibility. Only approved listings
/// appear in public search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Pending,
    Approved,
    Rejected,
    Inactive,
}

impl ListingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ListingStatus::Pending => "pending",
            ListingStatus::Approved => "approved",
            ListingStatus::Rejected => "rejected",
            ListingStatus::Inactive => "inactive",
        }
    }
}

/// Commercial terms surfaced on the listing page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    pub model: Option<String>,
    pub min: Option<u32>,
    pub max: Option<u32>,
    pub notes: Option<String>,
}

/// Derived rating fields written back onto a listing whenever the approved
/// review set changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingAggregate {
    pub average: f64,
    pub count: u32,
}

impl RatingAggregate {
    pub const ZERO: RatingAggregate = RatingAggregate {
        average: 0.0,
        count: 0,
    };
}

/// A vendor, product, or service entry in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub slug: String,
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub kind: ListingKind,
    pub category: String,
    pub website: String,
    pub email: String,
    pub phone: String,
    pub logo_url: String,
    pub broker_types: Vec<BrokerType>,
    pub features: Vec<String>,
    pub integrations: Vec<String>,
    pub special_offer: Option<String>,
    pub tier: ListingTier,
    pub pricing: Pricing,
    pub status: ListingStatus,
    pub rating: f64,
    pub review_count: u32,
    pub works_well_with: Vec<ListingId>,
    pub suggested_alternatives: Vec<ListingId>,
    pub created_at: DateTime<Utc>,
}

impl Listing {
    pub fn apply_aggregate(&mut self, aggregate: RatingAggregate) {
        self.rating = aggregate.average;
        self.review_count = aggregate.count;
    }

    /// Related ids resolved against a fetched set, keeping only approved
    /// listings and skipping dangling references.
    pub fn related<'a>(&self, pool: &'a [Listing]) -> Vec<&'a Listing> {
        self.works_well_with
            .iter()
            .filter_map(|id| {
                pool.iter()
                    .find(|candidate| &candidate.id == id)
                    .filter(|candidate| candidate.status == ListingStatus::Approved)
            })
            .collect()
    }
}

/// Fields supplied when creating a listing; the repository assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingDraft {
    pub slug: String,
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub kind: ListingKind,
    pub category: String,
    pub website: String,
    pub email: String,
    pub phone: String,
    pub logo_url: String,
    pub broker_types: Vec<BrokerType>,
    pub features: Vec<String>,
    pub integrations: Vec<String>,
    pub special_offer: Option<String>,
    pub tier: ListingTier,
    pub pricing: Pricing,
    pub status: ListingStatus,
}

impl ListingDraft {
    pub fn into_listing(self, id: ListingId, created_at: DateTime<Utc>) -> Listing {
        Listing {
            id,
            slug: self.slug,
            name: self.name,
            tagline: self.tagline,
            description: self.description,
            kind: self.kind,
            category: self.category,
            website: self.website,
            email: self.email,
            phone: self.phone,
            logo_url: self.logo_url,
            broker_types: self.broker_types,
            features: self.features,
            integrations: self.integrations,
            special_offer: self.special_offer,
            tier: self.tier,
            pricing: self.pricing,
            status: self.status,
            rating: 0.0,
            review_count: 0,
            works_well_with: Vec::new(),
            suggested_alternatives: Vec::new(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: &str, status: ListingStatus) -> Listing {
        ListingDraft {
            slug: id.to_string(),
            name: id.to_uppercase(),
            tagline: String::new(),
            description: "A tool".to_string(),
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
            status,
        }
        .into_listing(ListingId(id.to_string()), Utc::now())
    }

    #[test]
    fn related_skips_dangling_and_unapproved_references() {
        let pool = vec![
            listing("alpha", ListingStatus::Approved),
            listing("beta", ListingStatus::Pending),
        ];
        let mut subject = listing("subject", ListingStatus::Approved);
        subject.works_well_with = vec![
            ListingId("alpha".to_string()),
            ListingId("beta".to_string()),
            ListingId("gone".to_string()),
        ];

        let related = subject.related(&pool);
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].id, ListingId("alpha".to_string()));
    }

    #[test]
    fn draft_starts_with_zero_aggregates() {
        let fresh = listing("fresh", ListingStatus::Approved);
        assert_eq!(fresh.rating, 0.0);
        assert_eq!(fresh.review_count, 0);
    }
}
