//! HTTP implementation of the backend client.
//!
//! Speaks the legacy REST contract: `GET /products`, `POST /order`,
//! `POST /auth/login`, `GET /branch/all`, and so on, all JSON.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument};
use url::Url;

use minimart_core::{BackendOrderId, ProductId};

use crate::config::StorefrontConfig;

use super::types::{
    ApiMessage, Branch, CreatedProduct, Credentials, LoginResponse, OrderLineRecord, OrderRecord,
    OrderSubmission, ProductPayload, RawProduct, RawUser, Registration,
};
use super::{BackendApi, BackendError};

/// Client for the MiniMart REST backend.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct RestBackend {
    inner: Arc<RestBackendInner>,
}

struct RestBackendInner {
    client: reqwest::Client,
    base_url: Url,
}

impl RestBackend {
    /// Create a new backend client from configuration.
    ///
    /// # Errors
    ///
    /// Returns a `reqwest` error if the HTTP client cannot be constructed.
    pub fn new(config: &StorefrontConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(RestBackendInner {
                client,
                base_url: config.api_base_url.clone(),
            }),
        })
    }

    /// Build a full endpoint URL from a path relative to the base URL.
    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.inner.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Decode a response, mapping non-success statuses to
    /// [`BackendError::Rejected`] with the server's `msg` when present.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            return Ok(serde_json::from_str(&body)?);
        }

        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<ApiMessage>(&body).ok())
            .map_or_else(|| format!("HTTP {status}"), |api| api.msg);

        Err(BackendError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let url = self.endpoint(path);
        debug!(%url, "GET");
        let response = self.inner.client.get(&url).send().await?;
        Self::decode(response).await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, BackendError> {
        let url = self.endpoint(path);
        debug!(%url, method = %method, "request");
        let response = self
            .inner
            .client
            .request(method, &url)
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }
}

impl BackendApi for RestBackend {
    #[instrument(skip(self))]
    async fn fetch_products(&self) -> Result<Vec<RawProduct>, BackendError> {
        self.get_json("products").await
    }

    #[instrument(skip(self, payload), fields(name = %payload.name))]
    async fn create_product(&self, payload: &ProductPayload) -> Result<ProductId, BackendError> {
        let body = serde_json::to_value(payload)?;
        let created: CreatedProduct = self
            .send_json(reqwest::Method::POST, "products", &body)
            .await?;
        Ok(created.id)
    }

    #[instrument(skip(self, payload), fields(id = %id))]
    async fn update_product(
        &self,
        id: ProductId,
        payload: &ProductPayload,
    ) -> Result<(), BackendError> {
        let body = serde_json::to_value(payload)?;
        let _: serde_json::Value = self
            .send_json(reqwest::Method::PUT, &format!("products/{id}"), &body)
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, id: ProductId) -> Result<(), BackendError> {
        let url = self.endpoint(&format!("products/{id}"));
        let response = self.inner.client.delete(&url).send().await?;
        let _: serde_json::Value = Self::decode(response).await?;
        Ok(())
    }

    #[instrument(skip(self, order), fields(items = order.items.len()))]
    async fn submit_order(&self, order: &OrderSubmission) -> Result<(), BackendError> {
        let body = serde_json::to_value(order)?;
        let _: serde_json::Value = self.send_json(reqwest::Method::POST, "order", &body).await?;
        Ok(())
    }

    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    async fn login(&self, credentials: &Credentials) -> Result<RawUser, BackendError> {
        let body = json!({
            "username": credentials.username,
            "password": credentials.password.expose_secret(),
        });
        let response: LoginResponse = self
            .send_json(reqwest::Method::POST, "auth/login", &body)
            .await?;
        Ok(response.user)
    }

    #[instrument(skip(self, registration), fields(username = %registration.username))]
    async fn register(&self, registration: &Registration) -> Result<(), BackendError> {
        let body = json!({
            "username": registration.username,
            "password": registration.password.expose_secret(),
            "full_name": registration.full_name,
            "email": registration.email,
        });
        let _: serde_json::Value = self
            .send_json(reqwest::Method::POST, "auth/register", &body)
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn fetch_orders(&self) -> Result<Vec<OrderRecord>, BackendError> {
        self.get_json("order/all").await
    }

    #[instrument(skip(self))]
    async fn fetch_order_lines(
        &self,
        id: BackendOrderId,
    ) -> Result<Vec<OrderLineRecord>, BackendError> {
        self.get_json(&format!("order/{id}/items")).await
    }

    #[instrument(skip(self))]
    async fn fetch_branches(&self) -> Result<Vec<Branch>, BackendError> {
        self.get_json("branch/all").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_duplicate_slashes() {
        let config = StorefrontConfig::default();
        let backend = RestBackend::new(&config).expect("client");
        assert_eq!(
            backend.endpoint("/products"),
            "http://localhost:3000/api/products"
        );
        assert_eq!(
            backend.endpoint("order/all"),
            "http://localhost:3000/api/order/all"
        );
    }
}
