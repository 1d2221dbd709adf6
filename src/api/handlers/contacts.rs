//! Contact resource handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value;
use tracing::instrument;

use crate::api::{ApiError, AppState, ErrorResponse};
use crate::db::{ContactRepository, Database};
use crate::serializers::{ContactData, ContactSerializer};
use crate::validators::ValidationErrors;

/// List all contacts
#[utoipa::path(
    get,
    path = "/contacts/",
    tag = "contacts",
    responses(
        (status = 200, description = "All contacts", body = Vec<ContactData>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_contacts<D: Database>(
    State(state): State<AppState<D>>,
) -> Result<Json<Vec<ContactData>>, ApiError> {
    let contacts = state.db().contacts().find_all().await?;
    Ok(Json(contacts.into_iter().map(ContactData::from).collect()))
}

/// Create a new contact
///
/// Phone number and email must be unused, as must the name and phone
/// number pair.
#[utoipa::path(
    post,
    path = "/contacts/",
    tag = "contacts",
    request_body = ContactData,
    responses(
        (status = 201, description = "Contact created", body = ContactData),
        (status = 400, description = "Validation failed", body = ValidationErrors),
        (status = 415, description = "Body is not JSON", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn create_contact<D: Database>(
    State(state): State<AppState<D>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ContactData>), ApiError> {
    let Json(data) = body?;
    let repo = state.db().contacts();

    let contact = ContactSerializer::create(&repo, &data).await?;

    tracing::debug!(id = ?contact.id, "Created contact");
    Ok((StatusCode::CREATED, Json(ContactData::from(contact))))
}
