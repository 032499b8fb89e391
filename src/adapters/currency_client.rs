use crate::config::RateApiConfig;
use crate::domain::{RateProvider, RateQuote};
use crate::utils::error::{Result, SkillError};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::str::FromStr;
use url::Url;

pub const SOURCE_CURRENCY: &str = "USD";
const SPOKEN_DECIMAL_PLACES: u32 = 2;

/// Body of the currencylayer `live` endpoint, success or failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LiveQuoteResponse {
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub quotes: Option<Map<String, Value>>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub code: i64,
    #[serde(default)]
    pub info: String,
}

pub struct CurrencyLayerClient {
    client: Client,
    base_url: Url,
    access_key: String,
}

impl CurrencyLayerClient {
    pub fn new(config: &RateApiConfig) -> Result<Self> {
        let base_url =
            Url::parse(&config.base_url).map_err(|e| SkillError::InvalidConfigValueError {
                field: "rate_api.base_url".to_string(),
                value: config.base_url.clone(),
                reason: format!("Invalid URL format: {}", e),
            })?;

        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url,
            access_key: config.access_key.clone(),
        })
    }

    pub fn build_endpoint(&self, currency_code: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("access_key", &self.access_key)
            .append_pair("currencies", currency_code)
            .append_pair("source", SOURCE_CURRENCY)
            .append_pair("format", "1");
        url
    }
}

#[async_trait]
impl RateProvider for CurrencyLayerClient {
    async fn fetch_rate(&self, currency_code: &str) -> Result<RateQuote> {
        // the full endpoint carries the access key: log only the base, and
        // strip the url from every reqwest error before it can be logged
        tracing::debug!(currency = currency_code, endpoint = %self.base_url, "Requesting live quote");

        let response = self
            .client
            .get(self.build_endpoint(currency_code))
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        tracing::debug!("Rate API response status: {}", response.status());

        let body = response
            .error_for_status()
            .map_err(reqwest::Error::without_url)?
            .text()
            .await
            .map_err(reqwest::Error::without_url)?;
        let parsed: LiveQuoteResponse = serde_json::from_str(&body)?;

        if let Some(quoted_at) = parsed
            .timestamp
            .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0))
        {
            tracing::debug!(quoted_at = %quoted_at.to_rfc3339(), "Quote timestamp");
        }

        let quote = parse_quote(&parsed, currency_code)?;
        tracing::info!(currency = currency_code, rate = %quote, "Fetched USD rate");
        Ok(quote)
    }
}

/// Extracts the USD→`currency_code` rate from a parsed body.
///
/// An API error object becomes [`SkillError::RateApiError`]; a null, missing
/// or empty `quotes` map is [`RateQuote::Unavailable`].
pub fn parse_quote(body: &LiveQuoteResponse, currency_code: &str) -> Result<RateQuote> {
    if let Some(error) = &body.error {
        return Err(SkillError::RateApiError {
            code: error.code,
            info: error.info.clone(),
        });
    }

    let quotes = match &body.quotes {
        Some(quotes) if !quotes.is_empty() => quotes,
        _ => {
            tracing::warn!(currency = currency_code, "Rate API returned no quotes");
            return Ok(RateQuote::Unavailable);
        }
    };

    let pair = format!("{}{}", SOURCE_CURRENCY, currency_code);
    let raw = match quotes.get(&pair) {
        Some(value) => value,
        // a single-currency request has exactly one entry
        None => match quotes.values().next() {
            Some(value) => value,
            None => return Ok(RateQuote::Unavailable),
        },
    };

    if raw.is_null() {
        return Ok(RateQuote::Unavailable);
    }

    let rate = decimal_from_value(raw)?;
    Ok(RateQuote::Available(round_for_speech(rate)))
}

/// Half-to-even at two places: 17.125 → 17.12, 17.135 → 17.14.
pub fn round_for_speech(rate: Decimal) -> Decimal {
    rate.round_dp_with_strategy(SPOKEN_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven)
}

fn decimal_from_value(value: &Value) -> Result<Decimal> {
    // go through the textual form so no binary float rounding leaks in
    let text = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.trim().to_string(),
        other => {
            return Err(SkillError::MalformedQuoteError {
                message: format!("expected a number, got {}", other),
            })
        }
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| SkillError::MalformedQuoteError {
            message: format!("{:?} is not a decimal: {}", text, e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn body(value: Value) -> LiveQuoteResponse {
        serde_json::from_value(value).unwrap()
    }

    fn client_for(server: &MockServer) -> CurrencyLayerClient {
        let mut config = RateApiConfig::new("test-key");
        config.base_url = server.url("/api/live");
        CurrencyLayerClient::new(&config).unwrap()
    }

    #[test]
    fn test_string_quote_rounds_to_two_places() {
        let quote = parse_quote(&body(json!({"quotes": {"USDMXN": "17.1234"}})), "MXN").unwrap();
        assert_eq!(quote, RateQuote::Available(dec!(17.12)));
        assert_eq!(quote.to_string(), "17.12");
    }

    #[test]
    fn test_null_quotes_is_sentinel() {
        let quote = parse_quote(&body(json!({"quotes": null})), "MXN").unwrap();
        assert_eq!(quote, RateQuote::Unavailable);
        assert_eq!(quote.value(), dec!(-1));
    }

    #[test]
    fn test_missing_or_empty_quotes_is_unavailable() {
        assert_eq!(
            parse_quote(&body(json!({"success": true})), "CAD").unwrap(),
            RateQuote::Unavailable
        );
        assert_eq!(
            parse_quote(&body(json!({"quotes": {}})), "CAD").unwrap(),
            RateQuote::Unavailable
        );
    }

    #[test]
    fn test_numeric_quote_is_exact() {
        let quote = parse_quote(&body(json!({"quotes": {"USDCOP": 3912.505}})), "COP").unwrap();
        assert_eq!(quote, RateQuote::Available(dec!(3912.50)));
    }

    #[test]
    fn test_rounding_is_half_to_even() {
        assert_eq!(round_for_speech(dec!(17.125)), dec!(17.12));
        assert_eq!(round_for_speech(dec!(17.135)), dec!(17.14));
        assert_eq!(round_for_speech(dec!(17.1251)), dec!(17.13));
        assert_eq!(round_for_speech(dec!(950)), dec!(950));
    }

    #[test]
    fn test_falls_back_to_first_quote() {
        let quote = parse_quote(&body(json!({"quotes": {"USDVEF": "9.987"}})), "VEB").unwrap();
        assert_eq!(quote, RateQuote::Available(dec!(9.99)));
    }

    #[test]
    fn test_api_error_body() {
        let err = parse_quote(
            &body(json!({
                "success": false,
                "error": {"code": 101, "info": "You have not supplied a valid API Access Key."}
            })),
            "MXN",
        )
        .unwrap_err();

        match err {
            SkillError::RateApiError { code, .. } => assert_eq!(code, 101),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_quote() {
        let err = parse_quote(&body(json!({"quotes": {"USDMXN": "abc"}})), "MXN").unwrap_err();
        assert!(matches!(err, SkillError::MalformedQuoteError { .. }));

        let err = parse_quote(&body(json!({"quotes": {"USDMXN": [1]}})), "MXN").unwrap_err();
        assert!(matches!(err, SkillError::MalformedQuoteError { .. }));
    }

    #[test]
    fn test_build_endpoint() {
        let mut config = RateApiConfig::new("k&y");
        config.base_url = "http://apilayer.net/api/live".to_string();
        let client = CurrencyLayerClient::new(&config).unwrap();

        assert_eq!(
            client.build_endpoint("MXN").as_str(),
            "http://apilayer.net/api/live?access_key=k%26y&currencies=MXN&source=USD&format=1"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut config = RateApiConfig::new("k");
        config.base_url = "not a url".to_string();
        assert!(matches!(
            CurrencyLayerClient::new(&config),
            Err(SkillError::InvalidConfigValueError { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_rate_success() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/live")
                .query_param("access_key", "test-key")
                .query_param("currencies", "MXN")
                .query_param("source", "USD")
                .query_param("format", "1");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({
                    "success": true,
                    "timestamp": 1700000000,
                    "source": "USD",
                    "quotes": {"USDMXN": 17.1234}
                }));
        });

        let quote = client_for(&server).fetch_rate("MXN").await.unwrap();

        api_mock.assert();
        assert_eq!(quote, RateQuote::Available(dec!(17.12)));
    }

    #[tokio::test]
    async fn test_fetch_rate_server_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/live");
            then.status(500);
        });

        let result = client_for(&server).fetch_rate("CAD").await;

        api_mock.assert();
        assert!(matches!(result, Err(SkillError::ApiError(_))));
    }

    #[tokio::test]
    async fn test_errors_never_carry_access_key() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/live");
            then.status(500);
        });

        let mut config = RateApiConfig::new("SUPER-SECRET-KEY");
        config.base_url = server.url("/api/live");
        let client = CurrencyLayerClient::new(&config).unwrap();

        let err = client.fetch_rate("MXN").await.unwrap_err();

        api_mock.assert();
        assert!(matches!(err, SkillError::ApiError(_)));
        assert!(!err.to_string().contains("SUPER-SECRET-KEY"));
        assert!(!format!("{:?}", err).contains("SUPER-SECRET-KEY"));
        assert!(!err.user_friendly_message().contains("SUPER-SECRET-KEY"));
    }

    #[tokio::test]
    async fn test_connection_error_never_carries_access_key() {
        let mut config = RateApiConfig::new("SUPER-SECRET-KEY");
        // nothing listens on the discard port
        config.base_url = "http://127.0.0.1:9/api/live".to_string();
        config.timeout_secs = 1;
        let client = CurrencyLayerClient::new(&config).unwrap();

        let err = client.fetch_rate("MXN").await.unwrap_err();

        assert!(matches!(err, SkillError::ApiError(_)));
        assert!(!format!("{} {:?}", err, err).contains("SUPER-SECRET-KEY"));
    }

    #[tokio::test]
    async fn test_fetch_rate_invalid_json() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/live");
            then.status(200).body("<html>maintenance</html>");
        });

        let result = client_for(&server).fetch_rate("CAD").await;

        api_mock.assert();
        assert!(matches!(result, Err(SkillError::SerializationError(_))));
    }
}
