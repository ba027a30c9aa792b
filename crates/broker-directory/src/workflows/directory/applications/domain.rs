use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::directory::listings::{
    BrokerType, ListingDraft, ListingId, ListingKind, ListingStatus, ListingTier, Pricing,
};

/// Identifier wrapper for vendor applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Application workflow status. Terminal once approved or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

/// A prospective vendor's request for a directory listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorApplication {
    pub id: ApplicationId,
    pub company_name: String,
    pub website: String,
    pub company_description: String,
    pub logo_url: Option<String>,
    pub contact_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub kind: ListingKind,
    pub categories: Vec<String>,
    pub broker_types: Vec<BrokerType>,
    pub product_service_features: Option<String>,
    pub pricing_details: Option<String>,
    pub integrations: Option<String>,
    pub special_offer: Option<String>,
    pub referral_source: Option<String>,
    pub status: ApplicationStatus,
    pub vendor_id: Option<ListingId>,
    pub admin_notes: String,
    pub submitted_at: DateTime<Utc>,
}

impl VendorApplication {
    /// Direct field mapping from the application onto a new listing. The
    /// caller supplies the (already disambiguated) slug. Approved free-tier
    /// listings go live immediately.
    pub fn listing_draft(&self, slug: String) -> ListingDraft {
        ListingDraft {
            slug,
            name: self.company_name.clone(),
            tagline: String::new(),
            description: self.company_description.clone(),
            kind: self.kind,
            category: self.categories.first().cloned().unwrap_or_default(),
            website: self.website.clone(),
            email: self.email.clone(),
            phone: self.phone.clone().unwrap_or_default(),
            logo_url: self.logo_url.clone().unwrap_or_default(),
            broker_types: self.broker_types.clone(),
            features: self
                .product_service_features
                .as_ref()
                .map(|features| vec![features.clone()])
                .unwrap_or_default(),
            integrations: self
                .integrations
                .as_deref()
                .map(split_integrations)
                .unwrap_or_default(),
            special_offer: self.special_offer.clone(),
            tier: ListingTier::Free,
            pricing: Pricing {
                notes: self.pricing_details.clone(),
                ..Pricing::default()
            },
            status: ListingStatus::Approved,
        }
    }
}

fn split_integrations(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
