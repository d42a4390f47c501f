use chrono::Utc;
use tracing::{debug, error, info};

use crate::{
    interactions::{
        embed::{self, ChangeStyle},
        model::{CommandData, Interaction, InteractionResponse, InteractionType, MessageData},
    },
    market::service::MarketService,
};

pub const CRYPTO_COMMAND: &str = "crypto";

#[derive(Debug, PartialEq)]
pub enum Dispatch {
    Reply(InteractionResponse),
    /// Nothing to say; acknowledged with an empty body.
    Ignored,
}

#[derive(Clone)]
pub struct InteractionService {
    market: MarketService,
}

impl InteractionService {
    pub fn new(market: MarketService) -> Self {
        Self { market }
    }

    pub async fn dispatch(&self, interaction: Interaction) -> Dispatch {
        match interaction.interaction_type() {
            InteractionType::Ping => Dispatch::Reply(InteractionResponse::pong()),
            InteractionType::ApplicationCommand => match interaction.data {
                Some(data) if data.name == CRYPTO_COMMAND => {
                    let symbol = symbol_option(&data);
                    Dispatch::Reply(InteractionResponse::message(self.crypto(&symbol).await))
                }
                Some(data) => {
                    info!(command = %data.name, "Ignoring unknown command");
                    Dispatch::Ignored
                }
                None => {
                    info!("Ignoring command interaction without data");
                    Dispatch::Ignored
                }
            },
            InteractionType::Other(kind) => {
                debug!(kind, "Ignoring unsupported interaction type");
                Dispatch::Ignored
            }
        }
    }

    /// Always produces a reply; upstream trouble becomes user-facing text.
    pub async fn crypto(&self, symbol: &str) -> MessageData {
        if symbol.is_empty() {
            return embed::not_found_message(symbol);
        }

        let (quote, logo_url) = self.market.lookup(symbol).await;

        match quote {
            Ok(quote) => embed::quote_message(
                symbol,
                quote.as_ref(),
                logo_url,
                ChangeStyle::from(self.market.provider()),
                Utc::now(),
            ),
            Err(e) => {
                error!(symbol, error = %e, "Failed to build crypto reply");
                embed::retrieval_failed_message(symbol)
            }
        }
    }
}

/// First option's value, trimmed and uppercased.
fn symbol_option(data: &CommandData) -> String {
    data.options
        .first()
        .and_then(|option| option.value_str())
        .map(|value| value.trim().to_uppercase())
        .unwrap_or_default()
}
