use super::domain::{ApplicationId, ApplicationStatus, VendorApplication};
use crate::workflows::directory::listings::RepositoryError;

/// Storage abstraction for vendor applications. Creation happens on the
/// public submission surface, outside this workflow's scope.
pub trait ApplicationRepository: Send + Sync {
    fn fetch(&self, id: &ApplicationId) -> Result<Option<VendorApplication>, RepositoryError>;
    fn update(&self, application: VendorApplication) -> Result<(), RepositoryError>;
    fn list_by_status(
        &self,
        status: ApplicationStatus,
    ) -> Result<Vec<VendorApplication>, RepositoryError>;
}
