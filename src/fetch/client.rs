use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes a prepared HTTP request.
///
/// The dataset fetch goes through this seam so that callers can wrap or
/// replace the underlying `reqwest` client.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
