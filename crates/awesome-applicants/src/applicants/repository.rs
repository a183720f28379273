use async_trait::async_trait;

use super::domain::{Applicant, ApplicantFields, ApplicantId};

/// Storage abstraction so the router can be exercised without a database.
///
/// Not-found is never an error here: `update` yields `None` and `delete`
/// yields zero when no row matched the key.
#[async_trait]
pub trait ApplicantRepository: Send + Sync {
    async fn create(&self, fields: ApplicantFields) -> Result<Applicant, RepositoryError>;
    /// All rows, ascending by id.
    async fn list(&self) -> Result<Vec<Applicant>, RepositoryError>;
    async fn update(
        &self,
        id: ApplicantId,
        fields: ApplicantFields,
    ) -> Result<Option<Applicant>, RepositoryError>;
    /// Number of rows removed.
    async fn delete(&self, id: ApplicantId) -> Result<u64, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    Unavailable(String),
}
