//! Applicant records over HTTP, persisted in PostgreSQL.

pub mod applicants;
pub mod config;
pub mod error;
pub mod telemetry;
