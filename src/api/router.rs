use axum::Router;
use tower_http::trace::TraceLayer;

use crate::{
  config::Config,
  error::AppError,
  interactions::{handler, routes::interaction_routes, service::InteractionService},
  market::service::MarketService,
  utils::signature::SignatureVerifier,
};

pub fn create_router(config: &Config) -> Result<Router, AppError> {
  // Fail at startup on a bad key rather than per request
  let verifier = SignatureVerifier::from_hex(&config.public_key)?;

  // Setup services
  let market_service = MarketService::new(config.market.clone())?;
  let interaction_service = InteractionService::new(market_service);

  // Build the router
  let app = Router::new()
      .merge(interaction_routes(interaction_service, verifier))
      .fallback(handler::not_found)
      .layer(TraceLayer::new_for_http());

  Ok(app)
}
