//! Products Data

use serde::{Deserialize, Serialize};
use vitrine::{
    prices::Price,
    products::{Category, Metal, Product, ProductId},
};

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub images: Vec<String>,
    pub metal: Metal,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    pub stock: u32,
}

impl NewProduct {
    /// Attach an identifier, producing the catalog record.
    #[must_use]
    pub fn with_id(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            images: self.images,
            metal: self.metal,
            category: self.category,
            sizes: self.sizes,
            stock: self.stock,
        }
    }
}

/// Product Update Data
///
/// Only the fields that are set are changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metal: Option<Metal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

impl ProductUpdate {
    /// Overwrite the set fields of `product`.
    pub fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(images) = self.images {
            product.images = images;
        }
        if let Some(metal) = self.metal {
            product.metal = metal;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(sizes) = self.sizes {
            product.sizes = Some(sizes);
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn update_only_touches_set_fields() {
        let mut product = NewProduct {
            name: "Band".to_string(),
            description: "Plain".to_string(),
            price: Price::new(100),
            images: Vec::new(),
            metal: Metal::Gold,
            category: Category::Rings,
            sizes: None,
            stock: 1,
        }
        .with_id(ProductId::new("p1"));

        ProductUpdate {
            price: Some(Price::new(250)),
            stock: Some(9),
            ..ProductUpdate::default()
        }
        .apply_to(&mut product);

        assert_eq!(product.price, Price::new(250));
        assert_eq!(product.stock, 9);
        assert_eq!(product.name, "Band");
        assert_eq!(product.metal, Metal::Gold);
    }

    #[test]
    fn update_serializes_only_set_fields() -> TestResult {
        let update = ProductUpdate {
            stock: Some(3),
            ..ProductUpdate::default()
        };

        assert_eq!(serde_json::to_string(&update)?, r#"{"stock":3}"#);

        Ok(())
    }
}
