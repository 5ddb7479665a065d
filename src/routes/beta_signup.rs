use axum::{
    extract::{rejection::JsonRejection, Json, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::{
    models::signup::BetaSignupPayload,
    notifications::{operator_notification, welcome_email},
    responses::JsonResponse,
    routes::SERVER_ERROR_MESSAGE,
    state::AppState,
    utils::validation::validate_signup,
};

pub const SIGNUP_SUCCESS_MESSAGE: &str = "Inscription réussie";

/// Validates a beta signup, then notifies the operator and welcomes the
/// user, in that order. A failed send is not compensated: if the welcome
/// email fails the operator has already been told.
pub async fn handle_beta_signup(
    State(state): State<AppState>,
    payload: Result<Json<BetaSignupPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::error!(error = %rejection.body_text(), "Unreadable beta signup body");
            return JsonResponse::server_error(SERVER_ERROR_MESSAGE).into_response();
        }
    };

    let signup = match validate_signup(&payload) {
        Ok(signup) => signup,
        Err(err) => return JsonResponse::bad_request(&err.to_string()).into_response(),
    };

    let settings = &state.config.email;
    let now = Utc::now();

    if let Err(err) = state
        .mailer
        .send_email(&operator_notification(&signup, settings, now))
        .await
    {
        tracing::error!(error = %err, "Failed to send operator notification");
        return JsonResponse::server_error(SERVER_ERROR_MESSAGE).into_response();
    }

    if let Err(err) = state
        .mailer
        .send_email(&welcome_email(&signup, settings, now))
        .await
    {
        tracing::error!(error = %err, "Failed to send welcome email");
        return JsonResponse::server_error(SERVER_ERROR_MESSAGE).into_response();
    }

    tracing::info!(
        os = %signup.os,
        country = %signup.country,
        source = %signup.source,
        "Beta signup accepted"
    );
    JsonResponse::success(SIGNUP_SUCCESS_MESSAGE).into_response()
}
