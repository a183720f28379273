use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{patch, post},
    Json, Router,
};
use tracing::{error, info, warn};

use super::domain::{Applicant, ApplicantFields, ApplicantId, InvalidApplicantId};
use super::repository::{ApplicantRepository, RepositoryError};

/// Plain-text body returned when update or delete matched no row.
pub const APPLICANT_NOT_FOUND: &str = "Applicant not found";

const GENERIC_FAILURE: &str = "Server error";

/// Router builder exposing the applicant CRUD endpoints.
pub fn applicant_router<R>(repository: Arc<R>) -> Router
where
    R: ApplicantRepository + 'static,
{
    Router::new()
        .route(
            "/awesome/applicant",
            post(create_handler::<R>).get(list_handler::<R>),
        )
        .route(
            "/awesome/applicant/{id}",
            patch(update_handler::<R>).delete(delete_handler::<R>),
        )
        .with_state(repository)
}

/// Failure raised while serving a request, translated into a response in one place.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Body(#[from] JsonRejection),
    #[error(transparent)]
    InvalidId(#[from] InvalidApplicantId),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // Extractor rejections already carry their own status.
            ApiError::Body(rejection) => {
                warn!(error = %rejection, "rejected request body");
                rejection.into_response()
            }
            other => {
                error!(error = %other, "request failed");
                let message = other.to_string();
                let body = if message.is_empty() {
                    GENERIC_FAILURE.to_string()
                } else {
                    message
                };
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

/// A body sent without a JSON content type is read as an empty object.
fn fields_from(
    payload: Result<Json<ApplicantFields>, JsonRejection>,
) -> Result<ApplicantFields, ApiError> {
    match payload {
        Ok(Json(fields)) => Ok(fields),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(ApplicantFields::default()),
        Err(rejection) => Err(rejection.into()),
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, APPLICANT_NOT_FOUND).into_response()
}

pub(crate) async fn create_handler<R>(
    State(repository): State<Arc<R>>,
    payload: Result<Json<ApplicantFields>, JsonRejection>,
) -> Result<(StatusCode, Json<Applicant>), ApiError>
where
    R: ApplicantRepository + 'static,
{
    let fields = fields_from(payload)?;
    let applicant = repository.create(fields).await?;
    info!(applicant_id = %applicant.id, "applicant created");
    Ok((StatusCode::CREATED, Json(applicant)))
}

pub(crate) async fn list_handler<R>(
    State(repository): State<Arc<R>>,
) -> Result<Json<Vec<Applicant>>, ApiError>
where
    R: ApplicantRepository + 'static,
{
    let applicants = repository.list().await?;
    Ok(Json(applicants))
}

pub(crate) async fn update_handler<R>(
    State(repository): State<Arc<R>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<ApplicantFields>, JsonRejection>,
) -> Result<Response, ApiError>
where
    R: ApplicantRepository + 'static,
{
    let fields = fields_from(payload)?;
    let id: ApplicantId = raw_id.parse()?;

    match repository.update(id, fields).await? {
        Some(applicant) => {
            info!(applicant_id = %id, "applicant updated");
            Ok((StatusCode::OK, Json(applicant)).into_response())
        }
        None => Ok(not_found()),
    }
}

pub(crate) async fn delete_handler<R>(
    State(repository): State<Arc<R>>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError>
where
    R: ApplicantRepository + 'static,
{
    let id: ApplicantId = raw_id.parse()?;

    if repository.delete(id).await? == 0 {
        return Ok(not_found());
    }

    info!(applicant_id = %id, "applicant deleted");
    Ok(StatusCode::NO_CONTENT.into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_text(response: Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .expect("read body");
        String::from_utf8(body.to_vec()).expect("utf8 body")
    }

    #[tokio::test]
    async fn repository_failure_maps_to_server_error_with_message() {
        let response =
            ApiError::from(RepositoryError::Unavailable("connection refused".to_string()))
                .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "connection refused");
    }

    #[tokio::test]
    async fn empty_message_falls_back_to_generic_text() {
        let response = ApiError::from(RepositoryError::Unavailable(String::new())).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, GENERIC_FAILURE);
    }

    #[tokio::test]
    async fn invalid_id_is_a_server_error() {
        let response = ApiError::from(InvalidApplicantId("abc".to_string())).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(response).await.contains("abc"));
    }
}
