use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use beerstock_core::BeerId;
use beerstock_infra::BeerServiceError;

pub fn service_error_to_response(err: BeerServiceError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        BeerServiceError::AlreadyRegistered(_) => {
            json_error(StatusCode::CONFLICT, "already_registered", message)
        }
        BeerServiceError::NotFound(_) => json_error(StatusCode::NOT_FOUND, "not_found", message),
        BeerServiceError::StockExceeded { .. } => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "stock_exceeded", message)
        }
        BeerServiceError::InsufficientStock { .. } => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "insufficient_stock", message)
        }
        BeerServiceError::Validation(_) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", message)
        }
        BeerServiceError::Repository(e) => {
            tracing::error!("repository failure: {e}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "repository_error", message)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn parse_beer_id(raw: &str) -> Result<BeerId, axum::response::Response> {
    raw.parse()
        .map_err(|_| json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid beer id"))
}
