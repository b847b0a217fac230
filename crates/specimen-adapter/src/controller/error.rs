//! Error → HTTP status mapping

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use specimen_usecase::{ErrorKind, ServiceError};
use thiserror::Error;

use super::dto::MessageBody;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Request could not be parsed or lacked the caller identity
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn missing_agent() -> Self {
        ApiError::BadRequest("Agent ID is required.".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Service(err) => match err.kind() {
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::Reference => StatusCode::UNPROCESSABLE_ENTITY,
                ErrorKind::NotFoundOrForbidden => StatusCode::NOT_FOUND,
                ErrorKind::Infrastructure => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            // Details stay in the server log
            ApiError::Service(ServiceError::Infrastructure(_)) => "Internal server error.".to_string(),
            other => other.to_string(),
        };

        (status, Json(MessageBody::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_per_kind() {
        let cases = [
            (ServiceError::missing_field("patientName"), StatusCode::BAD_REQUEST),
            (ServiceError::Reference("Hospital 'h' does not exist.".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (ServiceError::NotFoundOrForbidden, StatusCode::NOT_FOUND),
            (ServiceError::Infrastructure("disk full".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
        assert_eq!(ApiError::missing_agent().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_infrastructure_detail_is_hidden() {
        let response = ApiError::from(ServiceError::Infrastructure("/var/lib/store.json: EACCES".into()))
            .into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: MessageBody = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body.message, "Internal server error.");
    }
}
