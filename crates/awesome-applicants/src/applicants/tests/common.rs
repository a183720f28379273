use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use serde_json::Value;
use tower::ServiceExt;

use crate::applicants::domain::{Applicant, ApplicantFields, ApplicantId};
use crate::applicants::repository::{ApplicantRepository, RepositoryError};
use crate::applicants::router::applicant_router;

pub(super) fn james() -> Applicant {
    Applicant {
        id: ApplicantId(1),
        name: Some("James Joe".to_string()),
        bio: Some("Developer".to_string()),
        experience: Some("Some Experience".to_string()),
    }
}

pub(super) fn sara() -> ApplicantFields {
    ApplicantFields {
        name: Some("Sara Joe".to_string()),
        bio: Some("Developer".to_string()),
        experience: Some("Entry level".to_string()),
    }
}

/// In-memory stand-in for the `applicants` table, assigning ids like a sequence.
#[derive(Default)]
pub(super) struct MemoryRepository {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    last_id: i32,
    rows: BTreeMap<ApplicantId, Applicant>,
}

impl MemoryRepository {
    pub(super) fn seeded(applicants: Vec<Applicant>) -> Self {
        let repository = Self::default();
        {
            let mut state = repository.state.lock().expect("repository mutex poisoned");
            for applicant in applicants {
                state.last_id = state.last_id.max(applicant.id.0);
                state.rows.insert(applicant.id, applicant);
            }
        }
        repository
    }

    pub(super) fn rows(&self) -> Vec<Applicant> {
        let state = self.state.lock().expect("repository mutex poisoned");
        state.rows.values().cloned().collect()
    }
}

#[async_trait]
impl ApplicantRepository for MemoryRepository {
    async fn create(&self, fields: ApplicantFields) -> Result<Applicant, RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        state.last_id += 1;
        let applicant = fields.into_applicant(ApplicantId(state.last_id));
        state.rows.insert(applicant.id, applicant.clone());
        Ok(applicant)
    }

    async fn list(&self) -> Result<Vec<Applicant>, RepositoryError> {
        Ok(self.rows())
    }

    async fn update(
        &self,
        id: ApplicantId,
        fields: ApplicantFields,
    ) -> Result<Option<Applicant>, RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        Ok(state.rows.get_mut(&id).map(|row| {
            *row = fields.into_applicant(id);
            row.clone()
        }))
    }

    async fn delete(&self, id: ApplicantId) -> Result<u64, RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        Ok(state.rows.remove(&id).map_or(0, |_| 1))
    }
}

pub(super) struct UnavailableRepository;

#[async_trait]
impl ApplicantRepository for UnavailableRepository {
    async fn create(&self, _fields: ApplicantFields) -> Result<Applicant, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn list(&self) -> Result<Vec<Applicant>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn update(
        &self,
        _id: ApplicantId,
        _fields: ApplicantFields,
    ) -> Result<Option<Applicant>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn delete(&self, _id: ApplicantId) -> Result<u64, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn router_with<R>(repository: Arc<R>) -> axum::Router
where
    R: ApplicantRepository + 'static,
{
    applicant_router(repository)
}

pub(super) fn json_request(method: Method, uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload).expect("serialize payload")))
        .expect("valid request")
}

pub(super) fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

pub(super) async fn send(router: &axum::Router, request: Request<Body>) -> Response {
    router
        .clone()
        .oneshot(request)
        .await
        .expect("route executes")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf8 body")
}
