//! Invoice form actions and the cached listing view.

use api_types::invoice::{
    ActionState as ApiActionState, InvoiceListResponse, InvoiceStatus as ApiStatus, InvoiceView,
};
use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use engine::{ActionOutcome, ActionState, FormData, Invoice, InvoiceStatus};

use crate::{ServerError, server::ServerState};

fn map_status(status: InvoiceStatus) -> ApiStatus {
    match status {
        InvoiceStatus::Pending => ApiStatus::Pending,
        InvoiceStatus::Paid => ApiStatus::Paid,
    }
}

fn map_invoice(invoice: Invoice) -> InvoiceView {
    InvoiceView {
        id: invoice.id,
        customer_id: invoice.customer_id,
        amount_minor: invoice.amount.cents(),
        status: map_status(invoice.status),
        date: invoice.date,
    }
}

fn map_state(state: ActionState) -> ApiActionState {
    ApiActionState {
        errors: state.errors.map(|errors| {
            errors
                .iter()
                .map(|(field, messages)| (field.as_str().to_string(), messages.to_vec()))
                .collect()
        }),
        message: state.message,
    }
}

/// Translate an action outcome into HTTP: navigation becomes `303 See Other`.
pub(crate) fn respond(outcome: ActionOutcome) -> Response {
    match outcome {
        ActionOutcome::Navigate(intent) => Redirect::to(&intent.to).into_response(),
        ActionOutcome::Completed => StatusCode::NO_CONTENT.into_response(),
        ActionOutcome::State(state) => {
            (StatusCode::UNPROCESSABLE_ENTITY, Json(map_state(state))).into_response()
        }
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<InvoiceListResponse>, ServerError> {
    let engine = &state.engine;
    let listing = state
        .views
        .get_or_build(engine.listing_view(), || async {
            let invoices = engine.list_invoices().await?;
            Ok::<_, ServerError>(InvoiceListResponse {
                invoices: invoices.into_iter().map(map_invoice).collect(),
            })
        })
        .await?;
    Ok(Json(listing))
}

pub async fn create(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Result<Response, ServerError> {
    let outcome = state.engine.create_invoice(&form).await?;
    Ok(respond(outcome))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Form(form): Form<FormData>,
) -> Result<Response, ServerError> {
    let outcome = state.engine.update_invoice(&id, &form).await?;
    Ok(respond(outcome))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Response, ServerError> {
    let outcome = state.engine.delete_invoice(&id).await?;
    Ok(respond(outcome))
}
