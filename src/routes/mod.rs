pub mod beta_sheet;
pub mod beta_signup;
pub mod contact;
pub mod countries;

use axum::{
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};

use crate::{responses::JsonResponse, state::AppState};

/// Message returned whenever an upstream dependency fails.
pub const SERVER_ERROR_MESSAGE: &str = "Erreur serveur";

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/beta-signup", post(beta_signup::handle_beta_signup))
        .route("/contact", post(contact::handle_contact))
        .route("/beta-googlesheet", post(beta_sheet::handle_beta_sheet))
        .route("/countries", get(countries::list_countries));

    Router::new()
        .route("/", get(root))
        .nest("/api", api_routes)
        .fallback(not_found)
        .with_state(state)
}

async fn root() -> Response {
    JsonResponse::success("Qera API").into_response()
}

async fn not_found() -> Response {
    JsonResponse::not_found("Route introuvable").into_response()
}
