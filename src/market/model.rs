use std::collections::HashMap;

use serde::Deserialize;

use crate::error::AppError;

/// Normalized 24h statistics for one symbol, whatever provider produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketQuote {
    pub symbol: String,
    pub last_price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub low: f64,
    pub high: f64,
}

/// `GET /api/v3/ticker/24hr` on Binance. Numbers arrive as strings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinanceTicker {
    pub last_price: String,
    pub price_change: String,
    pub price_change_percent: String,
    pub low_price: String,
    pub high_price: String,
}

/// `GET /data/pricemultifull` on CryptoCompare: `RAW.<symbol>.<currency>`.
#[derive(Debug, Deserialize)]
pub struct CryptoCompareFull {
    #[serde(rename = "RAW", default)]
    pub raw: HashMap<String, HashMap<String, CryptoCompareRaw>>,
}

#[derive(Debug, Deserialize)]
pub struct CryptoCompareRaw {
    #[serde(rename = "PRICE")]
    pub price: Option<f64>,
    #[serde(rename = "CHANGE24HOUR")]
    pub change_24h: Option<f64>,
    #[serde(rename = "CHANGEPCT24HOUR")]
    pub change_pct_24h: Option<f64>,
    #[serde(rename = "LOW24HOUR")]
    pub low_24h: Option<f64>,
    #[serde(rename = "HIGH24HOUR")]
    pub high_24h: Option<f64>,
}

/// `GET /data/all/coinlist?summary=true` on CryptoCompare.
#[derive(Debug, Deserialize)]
pub struct CoinList {
    #[serde(rename = "Data", default)]
    pub data: HashMap<String, CoinSummary>,
}

#[derive(Debug, Deserialize)]
pub struct CoinSummary {
    #[serde(rename = "ImageUrl")]
    pub image_url: Option<String>,
}

impl MarketQuote {
    pub fn from_binance(symbol: &str, ticker: &BinanceTicker) -> Result<Self, AppError> {
        Ok(Self {
            symbol: symbol.to_string(),
            last_price: parse_decimal("lastPrice", &ticker.last_price)?,
            change: parse_decimal("priceChange", &ticker.price_change)?,
            change_percent: parse_decimal("priceChangePercent", &ticker.price_change_percent)?,
            low: parse_decimal("lowPrice", &ticker.low_price)?,
            high: parse_decimal("highPrice", &ticker.high_price)?,
        })
    }

    pub fn from_cryptocompare(symbol: &str, raw: &CryptoCompareRaw) -> Result<Self, AppError> {
        Ok(Self {
            symbol: symbol.to_string(),
            last_price: require("PRICE", raw.price)?,
            change: require("CHANGE24HOUR", raw.change_24h)?,
            change_percent: require("CHANGEPCT24HOUR", raw.change_pct_24h)?,
            low: require("LOW24HOUR", raw.low_24h)?,
            high: require("HIGH24HOUR", raw.high_24h)?,
        })
    }
}

fn parse_decimal(field: &str, value: &str) -> Result<f64, AppError> {
    let parsed = value
        .trim()
        .parse::<f64>()
        .map_err(|_| AppError::MarketData(format!("{} is not a decimal: {:?}", field, value)))?;
    require(field, Some(parsed))
}

fn require(field: &str, value: Option<f64>) -> Result<f64, AppError> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        Some(v) => Err(AppError::MarketData(format!("{} is not finite: {}", field, v))),
        None => Err(AppError::MarketData(format!("{} is missing", field))),
    }
}
