//! Directory marketplace workflows: listings, review moderation, vendor
//! application intake, and the client-side comparison/filter engine.

pub mod applications;
pub mod compare;
pub mod listings;
pub mod notify;
pub mod reviews;
