//! HTTP transport used by the creative direction clients
//!
//! The clients only need "POST a JSON body, give me status and text back".
//! Keeping that behind a trait lets tests count and script requests.

use gloo_net::http::Request;

/// Raw reply of an endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    /// POST `body` as JSON. `Err` only for network level failures,
    /// HTTP error statuses come back as a normal reply.
    async fn post_json(&self, url: &str, body: String) -> Result<HttpReply, String>;
}

/// Browser fetch via gloo-net
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl HttpTransport for FetchTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<HttpReply, String> {
        let response = Request::post(url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .body(body)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| e.to_string())?;
        Ok(HttpReply { status, body })
    }
}
