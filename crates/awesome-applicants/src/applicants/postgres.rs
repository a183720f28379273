use async_trait::async_trait;
use sqlx::PgPool;

use super::domain::{Applicant, ApplicantFields, ApplicantId};
use super::repository::{ApplicantRepository, RepositoryError};

const INSERT_APPLICANT: &str = r#"
    INSERT INTO applicants (name, bio, experience)
    VALUES ($1, $2, $3)
    RETURNING id, name, bio, experience
"#;

const SELECT_APPLICANTS: &str = r#"
    SELECT id, name, bio, experience
    FROM applicants
    ORDER BY id
"#;

const UPDATE_APPLICANT: &str = r#"
    UPDATE applicants
    SET name = $1, bio = $2, experience = $3
    WHERE id = $4
    RETURNING id, name, bio, experience
"#;

const DELETE_APPLICANT: &str = "DELETE FROM applicants WHERE id = $1";

const COUNT_APPLICANTS: &str = "SELECT COUNT(*) FROM applicants";

/// `applicants` table access over a shared connection pool.
#[derive(Debug, Clone)]
pub struct PgApplicantRepository {
    pool: PgPool,
}

impl PgApplicantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Row count, used as a connectivity and schema probe.
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(COUNT_APPLICANTS)
            .fetch_one(&self.pool)
            .await
    }
}

#[async_trait]
impl ApplicantRepository for PgApplicantRepository {
    async fn create(&self, fields: ApplicantFields) -> Result<Applicant, RepositoryError> {
        let applicant = sqlx::query_as::<_, Applicant>(INSERT_APPLICANT)
            .bind(fields.name)
            .bind(fields.bio)
            .bind(fields.experience)
            .fetch_one(&self.pool)
            .await?;
        Ok(applicant)
    }

    async fn list(&self) -> Result<Vec<Applicant>, RepositoryError> {
        let applicants = sqlx::query_as::<_, Applicant>(SELECT_APPLICANTS)
            .fetch_all(&self.pool)
            .await?;
        Ok(applicants)
    }

    async fn update(
        &self,
        id: ApplicantId,
        fields: ApplicantFields,
    ) -> Result<Option<Applicant>, RepositoryError> {
        let applicant = sqlx::query_as::<_, Applicant>(UPDATE_APPLICANT)
            .bind(fields.name)
            .bind(fields.bio)
            .bind(fields.experience)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(applicant)
    }

    async fn delete(&self, id: ApplicantId) -> Result<u64, RepositoryError> {
        let result = sqlx::query(DELETE_APPLICANT)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
