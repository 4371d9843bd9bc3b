//! Products

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    prices::Price,
    sorting::{SortValue, Sortable},
};

/// A name that did not match any variant of a closed set (metal, category, order status).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariantError {
    /// What was being parsed.
    pub kind: &'static str,

    /// The rejected input.
    pub value: String,
}

/// Product identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Metal a piece is made from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metal {
    /// Gold
    Gold,
    /// Silver
    Silver,
    /// Platinum
    Platinum,
}

impl Metal {
    /// Every metal, in display order.
    pub const ALL: [Metal; 3] = [Metal::Gold, Metal::Silver, Metal::Platinum];

    /// Name as stored and sent over the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Metal::Gold => "Gold",
            Metal::Silver => "Silver",
            Metal::Platinum => "Platinum",
        }
    }
}

impl fmt::Display for Metal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metal {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metal::ALL
            .into_iter()
            .find(|metal| metal.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariantError {
                kind: "metal",
                value: s.to_string(),
            })
    }
}

/// Jewellery category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Rings
    Rings,
    /// Necklaces
    Necklaces,
    /// Earrings
    Earrings,
    /// Bracelets
    Bracelets,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 4] = [
        Category::Rings,
        Category::Necklaces,
        Category::Earrings,
        Category::Bracelets,
    ];

    /// Name as stored and sent over the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Rings => "Rings",
            Category::Necklaces => "Necklaces",
            Category::Earrings => "Earrings",
            Category::Bracelets => "Bracelets",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariantError {
                kind: "category",
                value: s.to_string(),
            })
    }
}

/// Product
///
/// Catalog records are read-only to the cart and the filter pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product description
    pub description: String,

    /// Product price
    pub price: Price,

    /// Image references, the first one is the primary image.
    #[serde(default)]
    pub images: Vec<String>,

    /// Metal
    pub metal: Metal,

    /// Category
    pub category: Category,

    /// Size labels, when the piece comes in sizes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,

    /// Units in stock
    pub stock: u32,
}

impl Product {
    /// The image shown for this product in listings and cart lines.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Size labels, empty when the product is not sized.
    pub fn sizes(&self) -> &[String] {
        self.sizes.as_deref().unwrap_or_default()
    }
}

impl Sortable for Product {
    fn sort_value(&self, key: &str) -> Option<SortValue<'_>> {
        match key {
            "id" => Some(SortValue::Text(self.id.as_str())),
            "name" => Some(SortValue::Text(&self.name)),
            "description" => Some(SortValue::Text(&self.description)),
            "price" => Some(SortValue::Number(Decimal::from(self.price.minor_units()))),
            "stock" => Some(SortValue::Number(Decimal::from(self.stock))),
            "metal" => Some(SortValue::Text(self.metal.as_str())),
            "category" => Some(SortValue::Text(self.category.as_str())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn ring() -> Product {
        Product {
            id: ProductId::new("p1"),
            name: "Diamond Ring".to_string(),
            description: "Shiny".to_string(),
            price: Price::new(1000),
            images: vec!["img.jpg".to_string(), "side.jpg".to_string()],
            metal: Metal::Gold,
            category: Category::Rings,
            sizes: None,
            stock: 10,
        }
    }

    #[test]
    fn metal_parses_case_insensitively() -> TestResult {
        assert_eq!("gold".parse::<Metal>()?, Metal::Gold);
        assert_eq!("PLATINUM".parse::<Metal>()?, Metal::Platinum);

        Ok(())
    }

    #[test]
    fn unknown_category_is_rejected() {
        let result = "Brooches".parse::<Category>();

        assert_eq!(
            result,
            Err(UnknownVariantError {
                kind: "category",
                value: "Brooches".to_string(),
            })
        );
    }

    #[test]
    fn primary_image_is_first_image() {
        let mut product = ring();

        assert_eq!(product.primary_image(), Some("img.jpg"));

        product.images.clear();

        assert_eq!(product.primary_image(), None);
    }

    #[test]
    fn unsized_product_has_no_sizes() {
        assert!(ring().sizes().is_empty());
    }

    #[test]
    fn deserializes_wire_format() -> TestResult {
        let json = r#"{
            "id": "p9",
            "name": "Pearl Studs",
            "description": "Freshwater",
            "price": 250,
            "images": [],
            "metal": "Silver",
            "category": "Earrings",
            "stock": 3
        }"#;

        let product: Product = serde_norway::from_str(json)?;

        assert_eq!(product.id, ProductId::new("p9"));
        assert_eq!(product.price, Price::new(250));
        assert_eq!(product.metal, Metal::Silver);
        assert_eq!(product.sizes, None);

        Ok(())
    }

    #[test]
    fn unknown_sort_key_has_no_value() {
        assert_eq!(ring().sort_value("weight"), None);
    }
}
