use crate::{Config, Error, Method, ProbeResult, Result, TestCase};
use reqwest::{Client, header};
use serde_json::Value;
use std::time::Instant;
use url::Url;

/// Issues one request per test case against a fixed base URL
#[derive(Clone)]
pub struct Prober {
    client: Client,
    base_url: Url,
}

impl Prober {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, config.base_url.clone()))
    }

    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins `path` onto the base URL, keeping any path prefix the base carries.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    /// Runs the request for `case`; every failure is folded into the result.
    pub async fn probe(&self, case: &TestCase) -> ProbeResult {
        let start = Instant::now();
        match self.send(case).await {
            Ok((status, data)) => {
                tracing::debug!(case = %case.name, status, elapsed = ?start.elapsed(), "response received");
                ProbeResult::response(status, data, start.elapsed())
            }
            Err(err) => {
                tracing::warn!(case = %case.name, error = %err, "request failed");
                ProbeResult::fault(&err, start.elapsed())
            }
        }
    }

    async fn send(&self, case: &TestCase) -> Result<(u16, Value)> {
        let url = self.endpoint(&case.path)?;
        tracing::debug!(case = %case.name, method = %case.method, %url, "sending request");

        let mut request = self.client.request(case.method.into(), url);
        if let (Method::Post, Some(body)) = (case.method, &case.body) {
            request = request
                .header(header::CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(body)?);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let data = serde_json::from_slice(&bytes)
            .map_err(|source| Error::InvalidBody { status, source })?;
        Ok((status, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prober(base: &str) -> Prober {
        Prober::with_client(Client::new(), Url::parse(base).unwrap())
    }

    #[test]
    fn test_endpoint_appends_path() {
        let prober = prober("https://example.workers.dev");
        assert_eq!(
            prober
                .endpoint("/youtube/search?query=javascript%20tutorial&maxResults=2")
                .unwrap()
                .as_str(),
            "https://example.workers.dev/youtube/search?query=javascript%20tutorial&maxResults=2"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_prefix() {
        let prober = prober("http://localhost:8787/api/");
        assert_eq!(
            prober.endpoint("/mcp").unwrap().as_str(),
            "http://localhost:8787/api/mcp"
        );
        assert_eq!(
            prober.endpoint("mcp").unwrap().as_str(),
            "http://localhost:8787/api/mcp"
        );
    }
}
