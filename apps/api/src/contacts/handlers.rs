use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::auth::AdminSession;
use crate::contacts::validation::ContactForm;
use crate::errors::AppError;
use crate::models::Contact;
use crate::state::AppState;

const THANK_YOU: &str = "Thank you for your message! I'll get back to you soon.";

#[derive(Debug, Serialize)]
pub struct ContactListResponse {
    pub contacts: Vec<Contact>,
    pub timestamp: String,
}

/// POST /api/contact
///
/// Public. Once validation passes the visitor always gets the success
/// envelope; a storage failure is only logged.
pub async fn handle_submit_contact(
    State(state): State<AppState>,
    WithRejection(Json(form), _): WithRejection<Json<ContactForm>, AppError>,
) -> Result<Json<Value>, AppError> {
    let contact = form.validate()?;

    match state
        .store
        .save_contact(&contact.name, &contact.email, &contact.message)
        .await
    {
        Ok(saved) => info!(
            "Contact form submission {} from {} <{}>",
            saved.id, contact.name, contact.email
        ),
        Err(e) => error!(
            "Failed to store contact from {} <{}>: {e}",
            contact.name, contact.email
        ),
    }

    Ok(Json(json!({
        "success": true,
        "message": THANK_YOU,
        "timestamp": Utc::now().to_rfc3339(),
    })))
}

/// GET /api/contacts
pub async fn handle_list_contacts(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<ContactListResponse>, AppError> {
    let contacts = state.store.list_contacts().await?;
    Ok(Json(ContactListResponse {
        contacts,
        timestamp: Utc::now().to_rfc3339(),
    }))
}
