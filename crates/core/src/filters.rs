//! Product Filters

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{
    prices::Price,
    products::{Category, Metal, Product},
};

/// Active filter constraints for a product listing.
///
/// An empty metal or category selection means "no restriction" on that dimension, not "reject
/// everything".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCriteria")]
pub struct FilterCriteria {
    /// Price ceiling, inclusive. `None` means no ceiling.
    #[serde(rename = "price", skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Price>,

    /// Accepted metals
    metals: SmallVec<[Metal; 3]>,

    /// Accepted categories
    categories: SmallVec<[Category; 4]>,
}

/// Wire shape of [`FilterCriteria`]. Selections may repeat until they pass through the builders.
#[derive(Debug, Deserialize)]
struct RawCriteria {
    #[serde(default, rename = "price")]
    max_price: Option<Price>,

    #[serde(default)]
    metals: Vec<Metal>,

    #[serde(default)]
    categories: Vec<Category>,
}

impl From<RawCriteria> for FilterCriteria {
    fn from(raw: RawCriteria) -> Self {
        let criteria = FilterCriteria {
            max_price: raw.max_price,
            ..FilterCriteria::default()
        };

        criteria
            .with_metals(raw.metals)
            .with_categories(raw.categories)
    }
}

impl FilterCriteria {
    /// Criteria that accept every product.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the price ceiling.
    #[must_use]
    pub fn with_max_price(mut self, max_price: Price) -> Self {
        self.max_price = Some(max_price);
        self
    }

    /// Replace the accepted metals.
    #[must_use]
    pub fn with_metals(mut self, metals: impl IntoIterator<Item = Metal>) -> Self {
        self.metals.clear();
        for metal in metals {
            if !self.metals.contains(&metal) {
                self.metals.push(metal);
            }
        }
        self
    }

    /// Replace the accepted categories.
    #[must_use]
    pub fn with_categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.categories.clear();
        for category in categories {
            if !self.categories.contains(&category) {
                self.categories.push(category);
            }
        }
        self
    }

    /// Accepted metals, in selection order.
    pub fn metals(&self) -> &[Metal] {
        &self.metals
    }

    /// Accepted categories, in selection order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Checkbox behaviour: select the metal if unselected, otherwise deselect it.
    pub fn toggle_metal(&mut self, metal: Metal) {
        if let Some(pos) = self.metals.iter().position(|m| *m == metal) {
            self.metals.remove(pos);
        } else {
            self.metals.push(metal);
        }
    }

    /// Checkbox behaviour: select the category if unselected, otherwise deselect it.
    pub fn toggle_category(&mut self, category: Category) {
        if let Some(pos) = self.categories.iter().position(|c| *c == category) {
            self.categories.remove(pos);
        } else {
            self.categories.push(category);
        }
    }

    /// Check whether a product satisfies every active constraint.
    pub fn matches(&self, product: &Product) -> bool {
        self.max_price.is_none_or(|ceiling| product.price <= ceiling)
            && (self.metals.is_empty() || self.metals.contains(&product.metal))
            && (self.categories.is_empty() || self.categories.contains(&product.category))
    }

    /// Query parameters for a backend that filters server-side.
    ///
    /// `price` is sent only when a ceiling is set; `metals` and `categories` are comma-joined
    /// and omitted when empty.
    pub fn to_query_pairs(&self) -> SmallVec<[(&'static str, String); 3]> {
        let mut pairs = SmallVec::new();

        if let Some(max_price) = self.max_price {
            pairs.push(("price", max_price.minor_units().to_string()));
        }

        if !self.metals.is_empty() {
            pairs.push(("metals", join(self.metals.iter().map(|m| m.as_str()))));
        }

        if !self.categories.is_empty() {
            pairs.push((
                "categories",
                join(self.categories.iter().map(|c| c.as_str())),
            ));
        }

        pairs
    }
}

fn join<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(",")
}

/// Products that satisfy `criteria`, in their original order.
pub fn filter_products(products: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
    products
        .iter()
        .filter(|product| criteria.matches(product))
        .cloned()
        .collect()
}
