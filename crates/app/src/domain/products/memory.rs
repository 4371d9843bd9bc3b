//! In-memory product repository.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;
use vitrine::{
    filters::{FilterCriteria, filter_products},
    products::{Product, ProductId},
};

use crate::domain::products::{
    data::{NewProduct, ProductUpdate},
    errors::ProductsServiceError,
    service::{FEATURED_COUNT, ProductSource},
};

/// Product catalog held in memory. Each instance owns its own data.
#[derive(Debug, Default)]
pub struct InMemoryProductSource {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductSource {
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }

    fn snapshot(&self) -> Vec<Product> {
        self.products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ProductSource for InMemoryProductSource {
    #[tracing::instrument(name = "products.memory.get_all", skip(self, criteria))]
    async fn get_all(
        &self,
        criteria: &FilterCriteria,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let products = self.products.read().unwrap_or_else(PoisonError::into_inner);
        let matched = filter_products(&products, criteria);

        debug!(total = products.len(), matched = matched.len(), "filtered catalog");

        Ok(matched)
    }

    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductsServiceError> {
        Ok(self
            .products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|product| product.id == *id)
            .cloned())
    }

    async fn get_featured(&self) -> Result<Vec<Product>, ProductsServiceError> {
        let mut products = self.snapshot();
        products.truncate(FEATURED_COUNT);

        Ok(products)
    }

    #[tracing::instrument(name = "products.memory.add_product", skip(self, product), err)]
    async fn add_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        if product.name.trim().is_empty() {
            return Err(ProductsServiceError::InvalidData(
                "product name is required".to_string(),
            ));
        }

        let created = product.with_id(ProductId::new(Uuid::now_v7().to_string()));

        self.products
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(created.clone());

        Ok(created)
    }

    #[tracing::instrument(name = "products.memory.update_product", skip(self, update), fields(product = %id), err)]
    async fn update_product(
        &self,
        id: &ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        let mut products = self.products.write().unwrap_or_else(PoisonError::into_inner);

        let product = products
            .iter_mut()
            .find(|product| product.id == *id)
            .ok_or(ProductsServiceError::NotFound)?;

        update.apply_to(product);

        Ok(product.clone())
    }

    #[tracing::instrument(name = "products.memory.delete_product", skip(self), fields(product = %id), err)]
    async fn delete_product(&self, id: &ProductId) -> Result<(), ProductsServiceError> {
        let mut products = self.products.write().unwrap_or_else(PoisonError::into_inner);
        let before = products.len();

        products.retain(|product| product.id != *id);

        if products.len() == before {
            return Err(ProductsServiceError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use vitrine::{
        prices::Price,
        products::{Category, Metal},
    };

    use super::*;

    fn product(id: &str, price: u64, metal: Metal, category: Category) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Piece {id}"),
            description: String::new(),
            price: Price::new(price),
            images: Vec::new(),
            metal,
            category,
            sizes: None,
            stock: 1,
        }
    }

    fn source() -> InMemoryProductSource {
        InMemoryProductSource::new(vec![
            product("a", 100, Metal::Gold, Category::Rings),
            product("b", 200, Metal::Silver, Category::Necklaces),
            product("c", 300, Metal::Platinum, Category::Earrings),
            product("d", 400, Metal::Gold, Category::Bracelets),
            product("e", 500, Metal::Silver, Category::Rings),
        ])
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[tokio::test]
    async fn get_all_applies_criteria() -> TestResult {
        let source = source();

        let all = source.get_all(&FilterCriteria::new()).await?;
        let gold = source
            .get_all(&FilterCriteria::new().with_metals([Metal::Gold]))
            .await?;

        assert_eq!(all.len(), 5);
        assert_eq!(ids(&gold), ["a", "d"]);

        Ok(())
    }

    #[tokio::test]
    async fn featured_is_first_four() -> TestResult {
        let featured = source().get_featured().await?;

        assert_eq!(ids(&featured), ["a", "b", "c", "d"]);

        Ok(())
    }

    #[tokio::test]
    async fn get_by_id_returns_none_for_unknown() -> TestResult {
        let source = source();

        assert!(source.get_by_id(&ProductId::new("c")).await?.is_some());
        assert!(source.get_by_id(&ProductId::new("zzz")).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn add_update_delete_roundtrip() -> TestResult {
        let source = InMemoryProductSource::default();

        let created = source
            .add_product(NewProduct {
                name: "Cuff".to_string(),
                description: String::new(),
                price: Price::new(900),
                images: Vec::new(),
                metal: Metal::Silver,
                category: Category::Bracelets,
                sizes: None,
                stock: 2,
            })
            .await?;

        let updated = source
            .update_product(
                &created.id,
                ProductUpdate {
                    stock: Some(0),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.stock, 0);
        assert_eq!(updated.name, "Cuff");

        source.delete_product(&created.id).await?;

        assert!(source.get_by_id(&created.id).await?.is_none());
        assert!(matches!(
            source.delete_product(&created.id).await,
            Err(ProductsServiceError::NotFound)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn instances_do_not_share_data() -> TestResult {
        let first = source();
        let second = source();

        first.delete_product(&ProductId::new("a")).await?;

        assert_eq!(first.get_all(&FilterCriteria::new()).await?.len(), 4);
        assert_eq!(second.get_all(&FilterCriteria::new()).await?.len(), 5);

        Ok(())
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let result = InMemoryProductSource::default()
            .add_product(NewProduct {
                name: "  ".to_string(),
                description: String::new(),
                price: Price::new(1),
                images: Vec::new(),
                metal: Metal::Gold,
                category: Category::Rings,
                sizes: None,
                stock: 1,
            })
            .await;

        assert!(matches!(result, Err(ProductsServiceError::InvalidData(_))));
    }
}
