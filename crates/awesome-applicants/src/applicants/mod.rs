//! Applicant records: domain types, the storage seam, its PostgreSQL
//! implementation, and the HTTP routes mapping requests onto it.

pub mod domain;
pub mod postgres;
pub mod repository;
pub mod router;

#[cfg(test)]
mod tests;

pub use domain::{Applicant, ApplicantFields, ApplicantId, InvalidApplicantId};
pub use postgres::PgApplicantRepository;
pub use repository::{ApplicantRepository, RepositoryError};
pub use router::{applicant_router, ApiError, APPLICANT_NOT_FOUND};
