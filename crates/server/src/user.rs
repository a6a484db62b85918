//! The sign-in form action.

use api_types::user::LoginRejected;
use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use engine::{AuthOutcome, ErrorKind, FormData, authenticate};

use crate::{ServerError, server::ServerState, status_for_kind};

/// Sign in with the credentials provider.
///
/// A rejected attempt answers `401` with the message to show; errors the
/// provider could not classify become a `500`.
pub async fn login(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Result<Response, ServerError> {
    match authenticate(state.signer.as_ref(), &form).await {
        Ok(AuthOutcome::SignedIn(Some(intent))) => Ok(Redirect::to(&intent.to).into_response()),
        Ok(AuthOutcome::SignedIn(None)) => Ok(StatusCode::NO_CONTENT.into_response()),
        Ok(AuthOutcome::Rejected(message)) => Ok((
            status_for_kind(ErrorKind::Authentication),
            Json(LoginRejected {
                message: message.to_string(),
            }),
        )
            .into_response()),
        Err(err) => Err(ServerError::Unclassified(err)),
    }
}
