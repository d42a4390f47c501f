use axum::{
  body::Bytes,
  extract::State,
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;

use crate::{
  error::AppError,
  interactions::{
      model::Interaction,
      service::{Dispatch, InteractionService},
  },
};

// Body has already been checked as JSON and signature-verified by the middleware
pub async fn interactions(
  State(service): State<InteractionService>,
  body: Bytes,
) -> Result<Response, AppError> {
  let interaction: Interaction = serde_json::from_slice(&body)?;

  match service.dispatch(interaction).await {
      Dispatch::Reply(response) => Ok((StatusCode::OK, Json(response)).into_response()),
      Dispatch::Ignored => Ok((StatusCode::OK, Json(json!({}))).into_response()),
  }
}

pub async fn not_found(uri: axum::http::Uri) -> AppError {
  AppError::NotFound(uri.path().to_string())
}
