use chrono::Utc;
use log::debug;
use serde_json::Value;

use crate::waqi::{FailureReport, FetchError, Reading, parse_feed};

pub const WAQI_URL: &str = "https://api.waqi.info";

/// Something that yields one reading per call, or the report explaining why not.
pub trait FeedSource {
    fn fetch(&self) -> impl Future<Output = Result<Reading, FailureReport>>;
}

#[derive(Debug, Clone)]
pub struct WaqiClient {
    http: reqwest::Client,
    city: String,
    token: String,
}

impl WaqiClient {
    pub fn new(http: reqwest::Client, city: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http,
            city: city.into(),
            token: token.into(),
        }
    }

    pub fn feed_url(&self) -> String {
        feed_url(&self.city, &self.token)
    }

    async fn get_feed(&self) -> Result<Reading, FetchError> {
        let url = self.feed_url();
        debug!("Trying to get data from {url}");

        let payload: Value = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Unavailable(e.to_string()))?
            .json()
            .await
            .map_err(|e| FetchError::Unavailable(e.to_string()))?;

        parse_feed(payload)
    }
}

impl FeedSource for WaqiClient {
    async fn fetch(&self) -> Result<Reading, FailureReport> {
        let captured_at = Utc::now().timestamp();

        self.get_feed()
            .await
            .map_err(|err| err.into_report(captured_at))
    }
}

pub fn feed_url(city: &str, token: &str) -> String {
    format!("{WAQI_URL}/feed/{city}/?token={token}")
}
