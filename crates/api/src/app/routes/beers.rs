use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};

use beerstock_beer::{BeerDto, QuantityDto};

use crate::app::errors;
use crate::app::services::AppServices;

// `:id` carries the beer name on GET and the numeric id everywhere else;
// the router needs one parameter name per path segment.
pub fn router() -> Router {
    Router::new()
        .route("/", get(list_beers).post(create_beer))
        .route("/:id", get(find_by_name).delete(delete_beer))
        .route("/:id/increment", patch(increment_stock))
        .route("/:id/decrement", patch(decrement_stock))
}

pub async fn create_beer(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<BeerDto>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_error(e.status(), "invalid_body", e.body_text()),
    };

    match services.beers().create(body).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_beers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.beers().list_all().await {
        Ok(beers) => (StatusCode::OK, Json(beers)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn find_by_name(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
) -> axum::response::Response {
    match services.beers().find_by_name(&name).await {
        Ok(beer) => (StatusCode::OK, Json(beer)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_beer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_beer_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.beers().delete_by_id(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn increment_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<QuantityDto>, JsonRejection>,
) -> axum::response::Response {
    let (id, amount) = match parse_adjustment(&id, body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.beers().increment(id, amount).await {
        Ok(beer) => (StatusCode::OK, Json(beer)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn decrement_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<QuantityDto>, JsonRejection>,
) -> axum::response::Response {
    let (id, amount) = match parse_adjustment(&id, body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.beers().decrement(id, amount).await {
        Ok(beer) => (StatusCode::OK, Json(beer)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

fn parse_adjustment(
    id: &str,
    body: Result<Json<QuantityDto>, JsonRejection>,
) -> Result<(beerstock_core::BeerId, u32), axum::response::Response> {
    let id = errors::parse_beer_id(id)?;
    let Json(quantity) =
        body.map_err(|e| errors::json_error(e.status(), "invalid_body", e.body_text()))?;
    let amount = quantity.amount().map_err(|e| {
        errors::json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string())
    })?;
    Ok((id, amount))
}
