use axum::{middleware, routing::post, Router};

use crate::{
  interactions::{handler, service::InteractionService},
  middleware::signature::signature_middleware,
  utils::signature::SignatureVerifier,
};

pub fn interaction_routes(service: InteractionService, verifier: SignatureVerifier) -> Router {
  Router::new()
      .route(
          "/interactions",
          post(handler::interactions)
              .route_layer(middleware::from_fn_with_state(verifier, signature_middleware))
              // Other methods on this path are treated like unknown paths
              .fallback(handler::not_found),
      )
      .with_state(service)
}
