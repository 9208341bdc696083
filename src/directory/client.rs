//! Order Directory API client.
//!
//! Each call is an independent transaction: a bearer token in, one request
//! out, no retries. The trait seam exists so route handlers can be tested
//! against an in-memory directory.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header};
use thiserror::Error;

use crate::directory::models::{ClientCollection, ClientRecord, OrderCollection, OrderDraft};

/// Accept header signaling tolerance for the hypermedia dialect as well as
/// plain JSON
const ACCEPT_HYPERMEDIA: &str = "application/ld+json, application/json;q=0.9, */*;q=0.8";

/// Fixed page size for the clients lookup
const CLIENTS_PAGE_SIZE: u32 = 50;

#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Non-2xx response from the Directory API
    #[error("Directory API returned HTTP {status}")]
    Upstream { status: u16, body: String },

    /// Transport failure or undecodable body
    #[error("Directory API request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl DirectoryError {
    /// Upstream HTTP status, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            DirectoryError::Upstream { status, .. } => Some(*status),
            DirectoryError::Http(_) => None,
        }
    }
}

#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// Fetch one page of orders. `page <= 1` requests the server default.
    async fn list_orders(&self, token: &str, page: u32) -> Result<OrderCollection, DirectoryError>;

    /// Fetch clients for the order-creation form, up to the fixed page size.
    async fn list_clients(&self, token: &str) -> Result<Vec<ClientRecord>, DirectoryError>;

    /// Submit a new order.
    async fn create_order(&self, token: &str, draft: &OrderDraft) -> Result<(), DirectoryError>;
}

/// reqwest-backed Directory API client
pub struct HttpDirectory {
    client: Client,
    base_url: String,
}

impl HttpDirectory {
    pub fn new(api_base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: api_base_url.to_string(),
        }
    }
}

#[async_trait]
impl DirectoryApi for HttpDirectory {
    async fn list_orders(&self, token: &str, page: u32) -> Result<OrderCollection, DirectoryError> {
        // The server defaults to the first page, so page=1 is left off the URL
        let mut url = format!("{}/api/orders", self.base_url);
        if page > 1 {
            url.push_str(&format!("?page={}", page));
        }

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .header(header::ACCEPT, ACCEPT_HYPERMEDIA)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DirectoryError::Upstream {
                status: response.status().as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        Ok(response.json().await?)
    }

    async fn list_clients(&self, token: &str) -> Result<Vec<ClientRecord>, DirectoryError> {
        let url = format!(
            "{}/api/clients?itemsPerPage={}",
            self.base_url, CLIENTS_PAGE_SIZE
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .header(header::ACCEPT, ACCEPT_HYPERMEDIA)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DirectoryError::Upstream {
                status: response.status().as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let collection: ClientCollection = response.json().await?;
        Ok(collection.member)
    }

    async fn create_order(&self, token: &str, draft: &OrderDraft) -> Result<(), DirectoryError> {
        let url = format!("{}/api/orders", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header(header::ACCEPT, ACCEPT_HYPERMEDIA)
            .json(draft)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DirectoryError::Upstream {
                status: response.status().as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        Ok(())
    }
}
