//! Products service.

use async_trait::async_trait;
use mockall::automock;
use vitrine::{
    filters::FilterCriteria,
    products::{Product, ProductId},
};

use crate::domain::products::{
    data::{NewProduct, ProductUpdate},
    errors::ProductsServiceError,
};

/// Number of products shown on the landing page.
pub const FEATURED_COUNT: usize = 4;

#[automock]
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Retrieves the products matching `criteria`, in catalog order.
    async fn get_all(&self, criteria: &FilterCriteria)
    -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product, `None` when there is no such product.
    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductsServiceError>;

    /// The first [`FEATURED_COUNT`] products of the catalog.
    async fn get_featured(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Adds a product, assigning it a new id.
    async fn add_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Applies a partial update to a product.
    async fn update_product(
        &self,
        id: &ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Deletes a product.
    async fn delete_product(&self, id: &ProductId) -> Result<(), ProductsServiceError>;
}
