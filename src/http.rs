//! HTTP utilities shared by the provider client.

use reqwest::{Client, RequestBuilder};

use crate::client::GatewayError;
use crate::options::TransportOptions;

/// Build a configured HTTP client from transport options.
pub fn build_http_client(transport: &TransportOptions) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder();

    if let Some(timeout) = transport.timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(proxy_url) = &transport.proxy {
        if let Ok(proxy) = reqwest::Proxy::all(proxy_url) {
            builder = builder.proxy(proxy);
        }
    }

    builder.build()
}

/// Add extra headers to a request if specified in transport options.
pub fn add_extra_headers(mut request: RequestBuilder, transport: &TransportOptions) -> RequestBuilder {
    if let Some(headers) = &transport.headers {
        for (key, value) in headers {
            request = request.header(key, value);
        }
    }
    request
}

/// Append the API key to a URI as a query parameter.
///
/// Completed video jobs return a signed URI that already carries its own
/// query string; the key still has to be attached for the fetch to succeed.
pub fn append_key(uri: &str, api_key: &str) -> String {
    if uri.contains('?') {
        format!("{uri}&key={api_key}")
    } else {
        format!("{uri}?key={api_key}")
    }
}

/// Extension trait for RequestBuilder that logs request body.
pub trait RequestBuilderExt {
    /// Set JSON request body and log it. Returns the RequestBuilder for chaining.
    fn json_logged<T: serde::Serialize + ?Sized>(self, json: &T) -> Self;
}

impl RequestBuilderExt for RequestBuilder {
    fn json_logged<T: serde::Serialize + ?Sized>(self, json: &T) -> Self {
        if let Ok(body) = serde_json::to_string_pretty(json) {
            tracing::debug!("provider request body ({} bytes):\n{}", body.len(), body);
        }

        self.json(json)
    }
}

/// Extension trait for Response that logs response body.
#[async_trait::async_trait]
pub trait ResponseExt {
    /// Get response text and log it. Consumes the response.
    async fn text_logged(self) -> Result<String, reqwest::Error>;

    /// Parse response as JSON and log it. Consumes the response.
    async fn json_logged<T: serde::de::DeserializeOwned>(self) -> Result<T, GatewayError>;
}

#[async_trait::async_trait]
impl ResponseExt for reqwest::Response {
    async fn text_logged(self) -> Result<String, reqwest::Error> {
        let text = self.text().await?;
        tracing::debug!("provider response ({} bytes):\n{}", text.len(), text);
        Ok(text)
    }

    async fn json_logged<T: serde::de::DeserializeOwned>(self) -> Result<T, GatewayError> {
        let bytes = self.bytes().await?;

        if let Ok(text) = std::str::from_utf8(&bytes) {
            tracing::debug!("provider response ({} bytes):\n{}", text.len(), text);
        }

        serde_json::from_slice(&bytes).map_err(GatewayError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_key_extends_existing_query() {
        assert_eq!(
            append_key("https://dl.example.com/v.mp4?alt=media", "k"),
            "https://dl.example.com/v.mp4?alt=media&key=k"
        );
    }

    #[test]
    fn append_key_starts_query_when_absent() {
        assert_eq!(
            append_key("https://dl.example.com/v.mp4", "k"),
            "https://dl.example.com/v.mp4?key=k"
        );
    }
}
