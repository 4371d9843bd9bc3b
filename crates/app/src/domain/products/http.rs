//! HTTP product backend client.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use vitrine::{
    filters::FilterCriteria,
    products::{Product, ProductId},
};

use crate::domain::products::{
    data::{NewProduct, ProductUpdate},
    errors::ProductsServiceError,
    service::ProductSource,
};

/// Product source backed by the storefront REST API.
///
/// Filtering happens server-side; the backend applies the same criteria as
/// [`vitrine::filters::filter_products`].
#[derive(Debug, Clone)]
pub struct HttpProductSource {
    base_url: String,
    http: Client,
}

impl HttpProductSource {
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
        format!("{}/api/products{path}", self.base_url)
    }
}

async fn expect_success(response: Response) -> Result<Response, ProductsServiceError> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(ProductsServiceError::NotFound);
    }

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();

        return Err(ProductsServiceError::UnexpectedResponse(format!(
            "request failed with status {status}: {text}"
        )));
    }

    Ok(response)
}

#[async_trait]
impl ProductSource for HttpProductSource {
    #[tracing::instrument(name = "products.http.get_all", skip(self, criteria), err)]
    async fn get_all(
        &self,
        criteria: &FilterCriteria,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let response = self
            .http
            .get(self.url(""))
            .query(criteria.to_query_pairs().as_slice())
            .send()
            .await?;

        Ok(expect_success(response).await?.json().await?)
    }

    #[tracing::instrument(name = "products.http.get_by_id", skip(self), fields(product = %id), err)]
    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductsServiceError> {
        let response = self.http.get(self.url(&format!("/{id}"))).send().await?;

        match expect_success(response).await {
            Ok(response) => Ok(Some(response.json().await?)),
            Err(ProductsServiceError::NotFound) => Ok(None),
            Err(error) => Err(error),
        }
    }

    #[tracing::instrument(name = "products.http.get_featured", skip(self), err)]
    async fn get_featured(&self) -> Result<Vec<Product>, ProductsServiceError> {
        let response = self.http.get(self.url("/featured")).send().await?;

        Ok(expect_success(response).await?.json().await?)
    }

    #[tracing::instrument(name = "products.http.add_product", skip(self, product), err)]
    async fn add_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        let response = self.http.post(self.url("")).json(&product).send().await?;

        Ok(expect_success(response).await?.json().await?)
    }

    #[tracing::instrument(name = "products.http.update_product", skip(self, update), fields(product = %id), err)]
    async fn update_product(
        &self,
        id: &ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        let response = self
            .http
            .put(self.url(&format!("/{id}")))
            .json(&update)
            .send()
            .await?;

        Ok(expect_success(response).await?.json().await?)
    }

    #[tracing::instrument(name = "products.http.delete_product", skip(self), fields(product = %id), err)]
    async fn delete_product(&self, id: &ProductId) -> Result<(), ProductsServiceError> {
        let response = self.http.delete(self.url(&format!("/{id}"))).send().await?;

        expect_success(response).await?;

        Ok(())
    }
}
