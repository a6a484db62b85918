use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::{BoxError, EngineError, ErrorKind};

use serde::Serialize;
pub use server::{ServerState, router, run_with_listener, spawn_with_listener};
pub use views::ViewCacheStore;

mod invoices;
mod server;
mod user;
mod views;

pub mod types {
    pub mod invoice {
        pub use api_types::invoice::{ActionState, InvoiceListResponse, InvoiceStatus, InvoiceView};
    }

    pub mod user {
        pub use api_types::user::LoginRejected;
    }
}

pub enum ServerError {
    Engine(EngineError),
    /// Raised by a collaborator and not ours to interpret.
    Unclassified(BoxError),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

/// HTTP status for each error kind, shared by every route.
pub(crate) fn status_for_kind(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::FieldValidation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
        ErrorKind::Persistence | ErrorKind::Unclassified => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Persistence(cause) => {
            tracing::error!("database error: {cause}");
            "internal server error".to_string()
        }
        EngineError::MissingCollaborator(_) => {
            tracing::error!("{err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_kind(err.kind()), message_for_engine_error(err)),
            ServerError::Unclassified(err) => {
                tracing::error!("unclassified error: {err}");
                (
                    status_for_kind(ErrorKind::Unclassified),
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::StoreError;

    #[test]
    fn persistence_maps_to_500() {
        let res = ServerError::from(EngineError::from(StoreError::Backend("down".to_string())))
            .into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_collaborator_maps_to_500() {
        let res = ServerError::from(EngineError::MissingCollaborator("store")).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_maps_to_422() {
        let res = ServerError::from(EngineError::Validation(Default::default())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn authentication_maps_to_401() {
        assert_eq!(
            status_for_kind(ErrorKind::Authentication),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn unclassified_maps_to_500() {
        let res = ServerError::Unclassified("boom".into()).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
