//! HTTP client for the Metal Enrollment API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use metalinv_api::{Machine, MachineGroup};

use crate::error::{ClientError, Result};
use crate::traits::EnrollmentApi;

/// Default per-request timeout.
///
/// The upstream service leaves this unbounded; an inventory script hanging
/// forever stalls every `ansible-playbook` run, so requests are capped here.
/// Use [`HttpClient::with_client`] to pick a different value.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for communicating with the enrollment server
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client with the default request timeout
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the underlying
    /// client cannot be constructed.
    ///
    /// # Example
    /// ```no_run
    /// use metalinv_client::HttpClient;
    ///
    /// let client = HttpClient::new("http://localhost:8080")?;
    /// # Ok::<(), metalinv_client::ClientError>(())
    /// ```
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let client = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Self::with_client(base_url, client)
    }

    /// Create a new HTTP client with a custom `reqwest::Client`
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid.
    pub fn with_client(base_url: impl AsRef<str>, client: Client) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// Send `Authorization: Bearer <token>` on every request
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Build a full URL from a path
    fn url(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(ClientError::Url)
    }

    /// Perform a GET request and deserialize the response
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path)?;
        debug!(%url, "GET");

        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, message });
        }

        Ok(response.json().await?)
    }

    /// List all enrolled machines
    ///
    /// # Errors
    /// Returns an error if the request fails or the server returns an
    /// error status.
    pub async fn list_machines(&self) -> Result<Vec<Machine>> {
        self.get("/api/v1/machines").await
    }

    /// List all custom machine groups
    ///
    /// # Errors
    /// Returns an error if the request fails or the server returns an
    /// error status.
    pub async fn list_groups(&self) -> Result<Vec<MachineGroup>> {
        self.get("/api/v1/groups").await
    }

    /// List the machines belonging to a group
    ///
    /// # Errors
    /// Returns an error if the request fails or the server returns an
    /// error status.
    pub async fn list_group_machines(&self, group_id: &str) -> Result<Vec<Machine>> {
        self.get(&format!("/api/v1/groups/{group_id}/machines"))
            .await
    }
}

#[async_trait]
impl EnrollmentApi for HttpClient {
    async fn machines(&self) -> Result<Vec<Machine>> {
        self.list_machines().await
    }

    async fn groups(&self) -> Result<Vec<MachineGroup>> {
        self.list_groups().await
    }

    async fn group_machines(&self, group_id: &str) -> Result<Vec<Machine>> {
        self.list_group_machines(group_id).await
    }
}
