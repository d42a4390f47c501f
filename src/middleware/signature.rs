use axum::{
  body::{to_bytes, Body},
  extract::State,
  http::{HeaderMap, Request},
  middleware::Next,
  response::Response,
};
use serde::de::IgnoredAny;
use tracing::{debug, warn};

use crate::{error::AppError, utils::signature::SignatureVerifier};

pub const SIGNATURE_HEADER: &str = "X-Signature-Ed25519";
pub const TIMESTAMP_HEADER: &str = "X-Signature-Timestamp";

const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Buffers the body, rejects malformed JSON, then checks the request signature.
/// The untouched bytes are handed on to the handler.
pub async fn signature_middleware(
  State(verifier): State<SignatureVerifier>,
  req: Request<Body>,
  next: Next,
) -> Result<Response, AppError> {
  let (parts, body) = req.into_parts();
  let bytes = to_bytes(body, MAX_BODY_BYTES)
      .await
      .map_err(|e| AppError::BadRequest(format!("Failed to read request body: {}", e)))?;

  serde_json::from_slice::<IgnoredAny>(&bytes)?;

  let signature = header_str(&parts.headers, SIGNATURE_HEADER);
  let timestamp = header_str(&parts.headers, TIMESTAMP_HEADER);

  if !verifier.verify(signature, timestamp, &bytes) {
      warn!(
          has_signature = signature.is_some(),
          has_timestamp = timestamp.is_some(),
          "Bad request signature. Verification failed."
      );
      return Err(AppError::InvalidSignature);
  }
  debug!("Request verification successful");

  let req = Request::from_parts(parts, Body::from(bytes));
  Ok(next.run(req).await)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
  headers.get(name).and_then(|value| value.to_str().ok())
}
