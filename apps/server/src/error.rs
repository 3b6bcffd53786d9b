use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use stock::StockError;
use thiserror::Error;
use tracing::{error, warn};

use crate::api::query::QueryError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    BadQuery(#[from] QueryError),

    #[error(transparent)]
    Stock(#[from] StockError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::Stock(StockError::Upstream(_)) => StatusCode::BAD_GATEWAY,
            ApiError::Stock(StockError::Storage(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Stock(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, %status, "request failed");
        } else {
            warn!(error = %self, %status, "request rejected");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
