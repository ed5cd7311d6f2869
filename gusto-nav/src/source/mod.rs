//! Restaurant slug sources for dynamic route registration.

use crate::error::{self, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::Deserialize;
use snafu::ResultExt;
use std::time::Duration;
use tracing::debug;

/// One restaurant record from the collection endpoint.
///
/// The upstream front end read `slug` off the collection response itself;
/// the contract here assumes the field lives on each record. Confirm against
/// the real API before relying on further fields.
#[derive(Debug, Clone, Deserialize)]
pub struct RestaurantRecord {
    pub slug: String,
}

/// Anything that can produce restaurant slugs for route synthesis.
#[async_trait]
pub trait SlugSource: Send + Sync {
    async fn fetch_slugs(&self) -> Result<Vec<String>>;
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Slug source backed by the restaurant API.
pub struct HttpSlugSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpSlugSource {
    /// Build a source for `base_url`, e.g. `http://127.0.0.1:8000`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()
            .context(error::SlugRequestSnafu)?;

        let base_url = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SlugSource for HttpSlugSource {
    async fn fetch_slugs(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/restaurants", self.base_url);
        debug!(%url, "fetching restaurant slugs");

        let records: Vec<RestaurantRecord> = self
            .http
            .get(&url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .context(error::SlugRequestSnafu)?
            .json()
            .await
            .context(error::SlugDecodeSnafu)?;

        Ok(records.into_iter().map(|r| r.slug).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetches_slugs_from_collection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/restaurants"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "slug": "trattoria-roma", "name": "Trattoria Roma" },
                { "slug": "sushi-kyo" },
            ])))
            .mount(&server)
            .await;

        let source = HttpSlugSource::new(server.uri()).unwrap();
        let slugs = source.fetch_slugs().await.unwrap();
        assert_eq!(slugs, vec!["trattoria-roma", "sushi-kyo"]);
    }

    #[tokio::test]
    async fn server_error_is_a_request_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/restaurants"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let source = HttpSlugSource::new(server.uri()).unwrap();
        let err = source.fetch_slugs().await.unwrap_err();
        assert!(matches!(err, Error::SlugRequest { .. }));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/restaurants"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "slug": "oops" })))
            .mount(&server)
            .await;

        let source = HttpSlugSource::new(server.uri()).unwrap();
        let err = source.fetch_slugs().await.unwrap_err();
        assert!(matches!(err, Error::SlugDecode { .. }));
    }
}
