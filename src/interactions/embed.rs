use chrono::{DateTime, Utc};

use crate::{
    config::QuoteProvider,
    interactions::model::{Embed, EmbedField, EmbedFooter, EmbedThumbnail, MessageData},
    market::model::MarketQuote,
};

pub const EMBED_COLOR: u32 = 0x007BFF;

/// How the 24H change is shown. Binance reports an amount alongside the
/// percentage, CryptoCompare replies are shown as a percentage only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStyle {
    Amount,
    Percent,
}

impl From<QuoteProvider> for ChangeStyle {
    fn from(provider: QuoteProvider) -> Self {
        match provider {
            QuoteProvider::Binance => ChangeStyle::Amount,
            QuoteProvider::CryptoCompare => ChangeStyle::Percent,
        }
    }
}

pub fn not_found_message(symbol: &str) -> MessageData {
    MessageData::text(format!(
        "Sorry, I couldn't find a cryptocurrency with the symbol \"{}\".",
        symbol
    ))
}

pub fn retrieval_failed_message(symbol: &str) -> MessageData {
    MessageData::text(format!(
        "Sorry, I couldn't retrieve information for \"{}\". Please check the name and try again.",
        symbol
    ))
}

pub fn quote_message(
    symbol: &str,
    quote: Option<&MarketQuote>,
    logo_url: Option<String>,
    style: ChangeStyle,
    now: DateTime<Utc>,
) -> MessageData {
    match quote {
        Some(quote) => MessageData::embed(quote_embed(symbol, quote, logo_url, style, now)),
        None => not_found_message(symbol),
    }
}

fn quote_embed(
    symbol: &str,
    quote: &MarketQuote,
    logo_url: Option<String>,
    style: ChangeStyle,
    now: DateTime<Utc>,
) -> Embed {
    Embed {
        title: symbol.to_string(),
        color: EMBED_COLOR,
        fields: vec![
            field("Price", format!("${:.4} USD", quote.last_price)),
            field("24H Change", format_change(quote, style)),
            field("24H Low", format!("${:.4}", quote.low)),
            field("24H High", format!("${:.4}", quote.high)),
        ],
        footer: EmbedFooter {
            text: format!("{} • {}", symbol, footer_timestamp(now)),
        },
        thumbnail: logo_url.map(|url| EmbedThumbnail { url }),
    }
}

fn field(name: &str, value: String) -> EmbedField {
    EmbedField {
        name: name.to_string(),
        value,
        inline: false,
    }
}

/// The `+` is decided on the rounded text, and a negative amount keeps its
/// own sign after the `$`.
pub fn format_change(quote: &MarketQuote, style: ChangeStyle) -> String {
    let percent = fixed(quote.change_percent, 2);
    match style {
        ChangeStyle::Amount => {
            let amount = fixed(quote.change, 4);
            format!("{}${} ({}%)", plus(&amount), amount, percent)
        }
        ChangeStyle::Percent => format!("{}{}%", plus(&percent), percent),
    }
}

fn fixed(value: f64, digits: usize) -> String {
    // -0.0 would otherwise print as "-0.00"
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.*}", digits, value)
}

fn plus(rounded: &str) -> &'static str {
    match rounded.parse::<f64>() {
        Ok(value) if value > 0.0 => "+",
        _ => "",
    }
}

/// en-US short date and time, e.g. `10/19/26, 3:04 PM`.
fn footer_timestamp(now: DateTime<Utc>) -> String {
    now.format("%-m/%-d/%y, %-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn quote(change: f64, change_percent: f64) -> MarketQuote {
        MarketQuote {
            symbol: "BTC".into(),
            last_price: 42123.456789,
            change,
            change_percent,
            low: 48000.0,
            high: 51000.0,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 15, 4, 59).unwrap()
    }

    #[test]
    fn missing_quote_is_plain_text() {
        let message = quote_message("DOGE", None, Some("https://img".into()), ChangeStyle::Amount, now());

        assert!(message.embeds.is_empty());
        assert_eq!(
            message.content.as_deref(),
            Some("Sorry, I couldn't find a cryptocurrency with the symbol \"DOGE\".")
        );
    }

    #[test]
    fn embed_fields_are_fixed_precision_and_ordered() {
        let message = quote_message("BTC", Some(&quote(1200.5, 2.456)), None, ChangeStyle::Amount, now());
        let embed = &message.embeds[0];

        let names: Vec<&str> = embed.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Price", "24H Change", "24H Low", "24H High"]);
        assert_eq!(embed.fields[0].value, "$42123.4568 USD");
        assert_eq!(embed.fields[1].value, "+$1200.5000 (2.46%)");
        assert_eq!(embed.fields[2].value, "$48000.0000");
        assert_eq!(embed.fields[3].value, "$51000.0000");
        assert_eq!(embed.title, "BTC");
        assert_eq!(embed.color, 0x007BFF);
        assert!(embed.thumbnail.is_none());
        assert!(message.content.is_none());
    }

    #[test]
    fn percent_style_signs_only_gains() {
        assert_eq!(format_change(&quote(0.0, 3.0), ChangeStyle::Percent), "+3.00%");
        assert_eq!(format_change(&quote(0.0, -1.2), ChangeStyle::Percent), "-1.20%");
        assert_eq!(format_change(&quote(0.0, 0.0), ChangeStyle::Percent), "0.00%");
    }

    #[test]
    fn amount_style_keeps_minus_after_currency() {
        assert_eq!(format_change(&quote(-3.0, -0.1), ChangeStyle::Amount), "$-3.0000 (-0.10%)");
    }

    #[test]
    fn sign_follows_rounded_value() {
        assert_eq!(format_change(&quote(0.00001, 0.0), ChangeStyle::Amount), "$0.0000 (0.00%)");
        assert_eq!(format_change(&quote(0.00005, 0.004), ChangeStyle::Amount), "+$0.0001 (0.00%)");
        assert_eq!(format_change(&quote(0.0, 0.001), ChangeStyle::Percent), "0.00%");
    }

    #[test]
    fn negative_zero_prints_unsigned() {
        assert_eq!(format_change(&quote(-0.0, -0.0), ChangeStyle::Amount), "$0.0000 (0.00%)");
        assert_eq!(format_change(&quote(0.0, -0.0), ChangeStyle::Percent), "0.00%");
    }

    #[test]
    fn footer_uses_short_utc_timestamp() {
        let message = quote_message(
            "ETH",
            Some(&quote(1.0, 1.0)),
            Some("https://www.cryptocompare.com/media/eth.png".into()),
            ChangeStyle::Percent,
            now(),
        );
        let embed = &message.embeds[0];

        assert_eq!(embed.footer.text, "ETH • 10/19/26, 3:04 PM");
        assert_eq!(
            embed.thumbnail,
            Some(EmbedThumbnail { url: "https://www.cryptocompare.com/media/eth.png".into() })
        );
    }

    #[test]
    fn change_style_follows_provider() {
        assert_eq!(ChangeStyle::from(QuoteProvider::Binance), ChangeStyle::Amount);
        assert_eq!(ChangeStyle::from(QuoteProvider::CryptoCompare), ChangeStyle::Percent);
    }
}
