use super::client::HttpClient;
use async_trait::async_trait;
use std::time::Duration;

/// Plain `reqwest` client without any request decoration.
pub struct BasicClient(reqwest::Client);

impl BasicClient {
    /// Builds a client that gives up after `timeout` overall and `connect`
    /// for the TCP/TLS handshake.
    pub fn with_timeouts(timeout: Duration, connect: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect)
            .build()?;
        Ok(Self(client))
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}
