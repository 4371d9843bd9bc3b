//! HTTP order backend client.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use vitrine::orders::{NewOrder, Order, OrderId, OrderStatus};

use crate::domain::orders::{errors::OrdersServiceError, service::OrderSource};

/// Order source backed by the storefront REST API.
#[derive(Debug, Clone)]
pub struct HttpOrderSource {
    base_url: String,
    http: Client,
}

#[derive(Debug, Serialize)]
struct StatusUpdate {
    status: OrderStatus,
}

impl HttpOrderSource {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, Client::new())
    }

    #[must_use]
    pub fn with_client(base_url: &str, http: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/orders{path}", self.base_url)
    }
}

async fn expect_success(response: Response) -> Result<Response, OrdersServiceError> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(OrdersServiceError::NotFound);
    }

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();

        return Err(OrdersServiceError::UnexpectedResponse(format!(
            "request failed with status {status}: {text}"
        )));
    }

    Ok(response)
}

#[async_trait]
impl OrderSource for HttpOrderSource {
    #[tracing::instrument(name = "orders.http.get_all", skip(self), err)]
    async fn get_all(&self) -> Result<Vec<Order>, OrdersServiceError> {
        let response = self.http.get(self.url("")).send().await?;

        Ok(expect_success(response).await?.json().await?)
    }

    #[tracing::instrument(name = "orders.http.get_by_id", skip(self), fields(order = %id), err)]
    async fn get_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrdersServiceError> {
        let response = self.http.get(self.url(&format!("/{id}"))).send().await?;

        match expect_success(response).await {
            Ok(response) => Ok(Some(response.json().await?)),
            Err(OrdersServiceError::NotFound) => Ok(None),
            Err(error) => Err(error),
        }
    }

    #[tracing::instrument(name = "orders.http.update_status", skip(self), fields(order = %id), err)]
    async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let response = self
            .http
            .patch(self.url(&format!("/{id}/status")))
            .json(&StatusUpdate { status })
            .send()
            .await?;

        Ok(expect_success(response).await?.json().await?)
    }

    #[tracing::instrument(name = "orders.http.create_order", skip(self, order), err)]
    async fn create_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError> {
        let response = self.http.post(self.url("")).json(&order).send().await?;

        Ok(expect_success(response).await?.json().await?)
    }
}
