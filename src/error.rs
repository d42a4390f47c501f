use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
  #[error("Bad request signature")]
  InvalidSignature,

  #[error("Bad request: {0}")]
  BadRequest(String),

  #[error("Config error: {0}")]
  ConfigError(String),

  #[error("Not found: {0}")]
  NotFound(String),

  #[error("Market data error: {0}")]
  MarketData(String),
}

impl From<serde_json::Error> for AppError {
  fn from(err: serde_json::Error) -> Self {
      Self::BadRequest(format!("Invalid interaction payload: {}", err))
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
      let (status, error_message) = match self {
          // Platform clients match on this exact text
          AppError::InvalidSignature => {
              return (StatusCode::UNAUTHORIZED, "Bad request signature").into_response();
          }
          AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
          AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
          AppError::ConfigError(_) => (
              StatusCode::INTERNAL_SERVER_ERROR,
              "A configuration error occurred".to_string(),
          ),
          AppError::MarketData(_) => (
              StatusCode::INTERNAL_SERVER_ERROR,
              "An internal server error occurred".to_string(),
          ),
      };

      let body = Json(json!({
          "status": "error",
          "message": error_message,
      }));

      (status, body).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn invalid_signature_is_plain_text_unauthorized() {
      let response = AppError::InvalidSignature.into_response();
      assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
  }

  #[test]
  fn bad_request_maps_to_400() {
      let response = AppError::BadRequest("nope".into()).into_response();
      assert_eq!(response.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn market_data_error_hides_provider_details() {
      let response = AppError::MarketData("lastPrice is not a decimal: \"x\"".into()).into_response();
      assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

      let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
      let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
      assert_eq!(body["message"], "An internal server error occurred");
  }

  #[test]
  fn not_found_maps_to_404() {
      let response = AppError::NotFound("/elsewhere".into()).into_response();
      assert_eq!(response.status(), StatusCode::NOT_FOUND);
  }
}
