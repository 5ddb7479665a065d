use axum::{
    extract::{rejection::JsonRejection, Json, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::{
    models::signup::BetaSignupPayload, responses::JsonResponse, routes::SERVER_ERROR_MESSAGE,
    services::sheets::SheetRow, state::AppState,
};

pub const MISSING_FIELDS_MESSAGE: &str = "Champs requis manquants";
pub const ROW_APPENDED_MESSAGE: &str = "Ligne ajoutée";

/// Appends a signup to the spreadsheet log. Only `firstName` and `email`
/// are required; the other columns are written as received.
pub async fn handle_beta_sheet(
    State(state): State<AppState>,
    payload: Result<Json<BetaSignupPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::error!(error = %rejection.body_text(), "Unreadable sheet body");
            return JsonResponse::server_error(SERVER_ERROR_MESSAGE).into_response();
        }
    };

    if payload.first_name.trim().is_empty() || payload.email.trim().is_empty() {
        return JsonResponse::bad_request(MISSING_FIELDS_MESSAGE).into_response();
    }

    let Some(sheets) = state.sheets.as_ref() else {
        tracing::error!("Google Sheets logging requested but not configured");
        return JsonResponse::server_error(SERVER_ERROR_MESSAGE).into_response();
    };

    let row = SheetRow::from_payload(&payload, Utc::now());
    match sheets.append_row(&row).await {
        Ok(()) => JsonResponse::success(ROW_APPENDED_MESSAGE).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to append signup row");
            JsonResponse::server_error(SERVER_ERROR_MESSAGE).into_response()
        }
    }
}
