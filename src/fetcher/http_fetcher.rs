use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::app::Result;
use crate::config::ApiConfig;
use crate::domain::BirthPayload;
use crate::fetcher::BirthdayFetcher;

pub struct HttpBirthdayFetcher {
    client: Client,
    base_url: Url,
}

impl HttpBirthdayFetcher {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::from_config(&ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str());

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: Url::parse(&config.base_url)?,
        })
    }

    pub fn endpoint(&self, month: &str, day: &str) -> String {
        format!(
            "{}/feed/v1/wikipedia/en/onthisday/births/{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            month,
            day
        )
    }
}

#[async_trait]
impl BirthdayFetcher for HttpBirthdayFetcher {
    async fn fetch(&self, month: &str, day: &str) -> Result<BirthPayload> {
        let url = self.endpoint(month, day);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        response.error_for_status_ref()?;

        let body = response.bytes().await?;
        BirthPayload::from_slice(&body)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::app::BirthboardError;

    const BIRTHS_PATH: &str = "/feed/v1/wikipedia/en/onthisday/births/12/10";

    #[test]
    fn test_endpoint_template() {
        let fetcher = HttpBirthdayFetcher::new("https://api.wikimedia.org").unwrap();
        assert_eq!(
            fetcher.endpoint("01", "05"),
            "https://api.wikimedia.org/feed/v1/wikipedia/en/onthisday/births/01/05"
        );
    }

    #[test]
    fn test_endpoint_passes_values_through() {
        let fetcher = HttpBirthdayFetcher::new("https://api.wikimedia.org/").unwrap();
        assert_eq!(
            fetcher.endpoint("13", "99"),
            "https://api.wikimedia.org/feed/v1/wikipedia/en/onthisday/births/13/99"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            HttpBirthdayFetcher::new("not a url"),
            Err(BirthboardError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn fetches_births_for_day() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(BIRTHS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "births": [
                    { "text": "Ada Lovelace", "year": 1815 },
                    { "text": "Emily Dickinson", "year": 1830 }
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let fetcher = HttpBirthdayFetcher::new(&mock_server.uri()).unwrap();
        let payload = fetcher.fetch("12", "10").await.unwrap();

        let texts: Vec<&str> = payload.births().iter().map(|b| b.text.as_str()).collect();
        assert_eq!(texts, vec!["Ada Lovelace", "Emily Dickinson"]);
        assert!(payload.births().iter().all(|b| !b.is_favourite));
    }

    #[tokio::test]
    async fn error_status_comes_back_as_err() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(BIRTHS_PATH))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
            .mount(&mock_server)
            .await;

        let fetcher = HttpBirthdayFetcher::new(&mock_server.uri()).unwrap();
        let result = fetcher.fetch("12", "10").await;

        assert!(matches!(result, Err(BirthboardError::Http(_))));
    }

    #[tokio::test]
    async fn undecodable_body_comes_back_as_err() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(BIRTHS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&mock_server)
            .await;

        let fetcher = HttpBirthdayFetcher::new(&mock_server.uri()).unwrap();
        let result = fetcher.fetch("12", "10").await;

        assert!(matches!(result, Err(BirthboardError::Payload(_))));
    }

    #[tokio::test]
    async fn payload_without_births_is_ok() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(BIRTHS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "title": "Not Found."
            })))
            .mount(&mock_server)
            .await;

        let fetcher = HttpBirthdayFetcher::new(&mock_server.uri()).unwrap();
        let payload = fetcher.fetch("12", "10").await.unwrap();

        assert!(!payload.has_births());
    }

    #[tokio::test]
    async fn unreachable_host_comes_back_as_err() {
        // Port 9 (discard) is almost never listening locally
        let fetcher = HttpBirthdayFetcher::new("http://127.0.0.1:9").unwrap();
        let result = fetcher.fetch("01", "01").await;
        assert!(result.is_err());
    }
}
