use std::env;
use chrono::Duration;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub host: String,
    pub app_env: AppEnv,
    /// Hex-encoded Ed25519 public key of the chat application.
    pub public_key: String,
    pub market: MarketConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEnv {
    Development,
    Production,
    Test,
}

/// Which upstream serves quotes. Also decides how the 24H change is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteProvider {
    Binance,
    CryptoCompare,
}

impl QuoteProvider {
    pub fn default_quote_currency(self) -> &'static str {
        match self {
            QuoteProvider::Binance => "USDT",
            QuoteProvider::CryptoCompare => "USD",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MarketConfig {
    pub provider: QuoteProvider,
    pub quote_currency: String,
    pub binance_url: String,
    pub cryptocompare_url: String,
    pub cryptocompare_image_url: String,
    pub cryptocompare_api_key: Option<String>,
    pub timeout: Option<Duration>,
}

impl MarketConfig {
    /// Public endpoints, no key, transport default timeout.
    pub fn new(provider: QuoteProvider) -> Self {
        Self {
            provider,
            quote_currency: provider.default_quote_currency().to_string(),
            binance_url: "https://api.binance.com".into(),
            cryptocompare_url: "https://min-api.cryptocompare.com".into(),
            cryptocompare_image_url: "https://www.cryptocompare.com".into(),
            cryptocompare_api_key: None,
            timeout: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server config
        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".into())
            .parse::<u16>()
            .map_err(|_| AppError::ConfigError("Invalid PORT".into()))?;

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let app_env_str = lookup("APP_ENV").unwrap_or_else(|| "development".into());
        let app_env = match app_env_str.to_lowercase().as_str() {
            "production" => AppEnv::Production,
            "test" => AppEnv::Test,
            _ => AppEnv::Development,
        };

        // Interaction signing
        let public_key = lookup("PUBLIC_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AppError::ConfigError("PUBLIC_KEY must be set".into()))?;

        // Market data config
        let provider_str = lookup("QUOTE_PROVIDER").unwrap_or_else(|| "binance".into());
        let provider = match provider_str.to_lowercase().as_str() {
            "binance" => QuoteProvider::Binance,
            "cryptocompare" => QuoteProvider::CryptoCompare,
            other => {
                return Err(AppError::ConfigError(format!(
                    "Unknown QUOTE_PROVIDER '{}', use binance or cryptocompare",
                    other
                )))
            }
        };

        let mut market = MarketConfig::new(provider);
        if let Some(currency) = lookup("QUOTE_CURRENCY") {
            market.quote_currency = currency.to_uppercase();
        }
        if let Some(url) = lookup("BINANCE_API_URL") {
            market.binance_url = url;
        }
        if let Some(url) = lookup("CRYPTOCOMPARE_API_URL") {
            market.cryptocompare_url = url;
        }
        if let Some(url) = lookup("CRYPTOCOMPARE_IMAGE_URL") {
            market.cryptocompare_image_url = url;
        }
        market.cryptocompare_api_key = lookup("CRYPTOCOMPARE_API_KEY").filter(|key| !key.is_empty());

        market.timeout = match lookup("MARKET_TIMEOUT") {
            Some(timeout_str) => {
                let timeout = parse_duration(&timeout_str)
                    .map_err(|_| AppError::ConfigError("Invalid MARKET_TIMEOUT format".into()))?;
                // A zero timeout fails every upstream call
                if timeout <= Duration::zero() {
                    return Err(AppError::ConfigError("MARKET_TIMEOUT must be greater than zero".into()));
                }
                Some(timeout)
            }
            None => None,
        };

        Ok(Self {
            port,
            host,
            app_env,
            public_key,
            market,
        })
    }
}

fn parse_duration(duration_str: &str) -> Result<Duration, &'static str> {
    let duration_str = duration_str.trim();

    if duration_str.is_empty() {
        return Err("Duration string is empty");
    }

    // Extract the number and unit parts
    let len = duration_str.len();
    let (num_part, unit_part) = duration_str.split_at(
        duration_str
            .chars()
            .position(|c| !c.is_ascii_digit())
            .unwrap_or(len)
    );

    let num = num_part.parse::<i64>().map_err(|_| "Invalid number")?;

    match unit_part {
        "ms" => Ok(Duration::milliseconds(num)),
        "s" => Ok(Duration::seconds(num)),
        "m" => Ok(Duration::minutes(num)),
        "h" => Ok(Duration::hours(num)),
        _ => Err("Unknown time unit, use ms, s, m, or h"),
    }
}
