use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    config::{MarketConfig, QuoteProvider},
    error::AppError,
    market::model::{BinanceTicker, CoinList, CryptoCompareFull, MarketQuote},
};

#[derive(Clone)]
pub struct MarketService {
    client: Client,
    config: MarketConfig,
}

impl MarketService {
    pub fn new(config: MarketConfig) -> Result<Self, AppError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            let timeout = timeout
                .to_std()
                .map_err(|_| AppError::ConfigError("MARKET_TIMEOUT must be positive".into()))?;
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn provider(&self) -> QuoteProvider {
        self.config.provider
    }

    /// Quote and logo for an uppercased symbol, fetched concurrently.
    pub async fn lookup(
        &self,
        symbol: &str,
    ) -> (Result<Option<MarketQuote>, AppError>, Option<String>) {
        tokio::join!(self.get_quote(symbol), self.get_logo_url(symbol))
    }

    /// `Ok(None)` covers every way the provider can fail to answer: unknown symbol,
    /// transport error, non-2xx status or an undecodable body. An answer whose
    /// numbers cannot be read is an error.
    pub async fn get_quote(&self, symbol: &str) -> Result<Option<MarketQuote>, AppError> {
        match self.config.provider {
            QuoteProvider::Binance => {
                let url = format!("{}/api/v3/ticker/24hr", self.config.binance_url);
                let pair = format!("{}{}", symbol, self.config.quote_currency);
                let request = self.client.get(url).query(&[("symbol", pair.as_str())]);

                match self.fetch_json::<BinanceTicker>(request, "Binance ticker").await {
                    Some(ticker) => MarketQuote::from_binance(symbol, &ticker).map(Some),
                    None => Ok(None),
                }
            }
            QuoteProvider::CryptoCompare => {
                let url = format!("{}/data/pricemultifull", self.config.cryptocompare_url);
                let request = self.cryptocompare(self.client.get(url)).query(&[
                    ("fsyms", symbol),
                    ("tsyms", self.config.quote_currency.as_str()),
                ]);

                let Some(full) = self
                    .fetch_json::<CryptoCompareFull>(request, "CryptoCompare price")
                    .await
                else {
                    return Ok(None);
                };

                match full
                    .raw
                    .get(symbol)
                    .and_then(|by_currency| by_currency.get(&self.config.quote_currency))
                {
                    Some(raw) => MarketQuote::from_cryptocompare(symbol, raw).map(Some),
                    None => {
                        warn!(symbol, "Symbol not found on CryptoCompare");
                        Ok(None)
                    }
                }
            }
        }
    }

    /// Absolute image URL for the symbol, or `None` on any failure.
    pub async fn get_logo_url(&self, symbol: &str) -> Option<String> {
        let url = format!("{}/data/all/coinlist", self.config.cryptocompare_url);
        let request = self
            .cryptocompare(self.client.get(url))
            .query(&[("summary", "true")]);

        let list = self.fetch_json::<CoinList>(request, "CryptoCompare coin list").await?;

        match list.data.get(symbol).and_then(|coin| coin.image_url.as_deref()) {
            Some(path) => Some(format!(
                "{}/{}",
                self.config.cryptocompare_image_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            )),
            None => {
                warn!(symbol, "Logo not found on CryptoCompare");
                None
            }
        }
    }

    fn cryptocompare(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.cryptocompare_api_key {
            Some(key) => request.header("authorization", format!("Apikey {}", key)),
            None => request,
        }
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Option<T> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Error fetching {}", what);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "{} request was rejected", what);
            return None;
        }
        debug!(%status, "{} response received", what);

        match response.json::<T>().await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(error = %e, "Malformed {} response", what);
                None
            }
        }
    }
}
