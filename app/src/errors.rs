// storefront_app/src/errors.rs

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use storefront::StorefrontError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Storefront Error: {source}")]
  Storefront {
    #[from]
    source: StorefrontError,
  },

  #[error("Template Error: {0}")]
  Template(#[from] tera::Error),
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Storefront { source } if source.is_not_found() => StatusCode::NOT_FOUND,
      AppError::Storefront { source } if source.is_catalog_failure() => StatusCode::BAD_GATEWAY,
      AppError::Storefront { .. } | AppError::Config(_) | AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    tracing::error!(application_error = %self, "Responding with error");
    let status = self.status_code();
    match self {
      AppError::Validation(m) | AppError::NotFound(m) => HttpResponse::build(status).json(json!({"error": m})),
      AppError::Storefront { source } if status == StatusCode::NOT_FOUND => {
        HttpResponse::build(status).json(json!({"error": "Product not found", "detail": source.to_string()}))
      }
      AppError::Storefront { source } if status == StatusCode::BAD_GATEWAY => {
        HttpResponse::build(status).json(json!({"error": "Catalog unavailable", "detail": source.to_string()}))
      }
      AppError::Config(m) => HttpResponse::build(status).json(json!({"error": "Configuration issue", "detail": m})),
      AppError::Template(_) => HttpResponse::build(status).json(json!({"error": "Page rendering failed"})),
      AppError::Storefront { source } => {
        HttpResponse::build(status).json(json!({"error": "An internal error occurred", "detail": source.to_string()}))
      }
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
