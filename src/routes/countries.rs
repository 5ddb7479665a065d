use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::utils::countries::{quick_picks, selectable_countries, Country};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CountryCatalog {
    quick_picks: Vec<Country>,
    countries: Vec<Country>,
}

/// Serves the country selector: the short list first, then the full
/// catalog in French order.
pub async fn list_countries() -> Response {
    let catalog = CountryCatalog {
        quick_picks: quick_picks(),
        countries: selectable_countries(),
    };
    (StatusCode::OK, Json(catalog)).into_response()
}
