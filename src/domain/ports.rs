use crate::domain::model::RateQuote;
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Rate for `currency_code` against USD, rounded for speech.
    async fn fetch_rate(&self, currency_code: &str) -> Result<RateQuote>;
}
