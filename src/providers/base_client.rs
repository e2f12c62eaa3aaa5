use crate::core::error::JarvisError;
use reqwest::Client;
use reqwest::multipart::Form;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Thin JSON-over-HTTP client shared by the provider implementations.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    auth_header: Option<(String, String)>,
    extra_headers: HashMap<String, String>,
}

impl HttpClient {
    /// No request timeout is set here; callers bound each call themselves.
    pub fn new(
        base_url: String,
        auth_header: Option<(String, String)>,
        extra_headers: Option<HashMap<String, String>>,
    ) -> Result<Self, JarvisError> {
        let client = Client::builder()
            .build()
            .map_err(|e| JarvisError::Initialization(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            auth_header,
            extra_headers: extra_headers.unwrap_or_default(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, path: &str) -> reqwest::RequestBuilder {
        let url = self.url(path);
        debug!("POST {}", url);

        let mut request = self.client.post(&url);
        if let Some((name, value)) = &self.auth_header {
            request = request.header(name, value);
        }
        for (key, value) in &self.extra_headers {
            request = request.header(key, value);
        }
        request
    }

    /// Posts `payload` as JSON and returns the body of a successful response.
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<String, JarvisError> {
        let response = self.request(path).json(payload).send().await?;
        Self::read_body(response).await
    }

    /// Posts a multipart form and returns the body of a successful response.
    pub async fn post_multipart(&self, path: &str, form: Form) -> Result<String, JarvisError> {
        let response = self.request(path).multipart(form).send().await?;
        Self::read_body(response).await
    }

    async fn read_body(response: reqwest::Response) -> Result<String, JarvisError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(JarvisError::from_status(status, &body));
        }
        Ok(body)
    }
}
