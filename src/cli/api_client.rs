use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::env;

use crate::cli::error::{CliError, CliResult};

pub const API_URL_ENV: &str = "BLOG_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:3737";

/// API client for communicating with the blog REST API
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// Priority for base URL:
    /// 1. Explicit `api_url` parameter
    /// 2. BLOG_API_URL environment variable
    /// 3. Default: http://localhost:3737
    pub fn new(api_url: Option<String>) -> Self {
        let _ = rustls::crypto::ring::default_provider().install_default();

        let base_url = api_url
            .or_else(|| env::var(API_URL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Get the base URL being used
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Create a GET request builder
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.get(self.url(path))
    }

    /// Create a POST request builder
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.post(self.url(path))
    }

    /// Create a PUT request builder
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.put(self.url(path))
    }

    /// Create a DELETE request builder
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.delete(self.url(path))
    }

    /// Handle API response with standardized error handling
    ///
    /// Returns the deserialized response body on success,
    /// or a CliError::ApiError on non-success status codes.
    pub async fn handle_response<T: DeserializeOwned>(response: Response) -> CliResult<T> {
        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| CliError::InvalidResponse {
                    message: e.to_string(),
                })
        } else {
            Err(Self::api_error(response).await)
        }
    }

    /// Like `handle_response` for endpoints that answer without a body.
    pub async fn handle_empty_response(response: Response) -> CliResult<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::api_error(response).await)
        }
    }

    /// Build an `ApiError`, preferring the `error` field of a JSON body.
    async fn api_error(response: Response) -> CliError {
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        let message = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|body| {
                let error = body.get("error")?.as_str()?.to_string();
                let details: Vec<String> = body
                    .get("details")
                    .and_then(|d| d.as_array())
                    .map(|items| {
                        items
                            .iter()
                            .filter_map(|d| {
                                Some(format!(
                                    "{}: {}",
                                    d.get("field")?.as_str()?,
                                    d.get("message")?.as_str()?
                                ))
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                Some(if details.is_empty() {
                    error
                } else {
                    format!("{} ({})", error, details.join("; "))
                })
            })
            .unwrap_or(text);

        CliError::ApiError { status, message }
    }
}
