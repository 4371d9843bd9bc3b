//! Cart Actions

use serde::{Deserialize, Serialize};

use crate::{cart::LineId, products::Product};

/// The serializable action protocol understood by [`reduce`](super::reduce).
///
/// Encoded as `{"type": "ADD_ITEM", "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartAction {
    /// Add `quantity` of a product variant, merging into an existing line for the same variant.
    AddItem {
        /// Product being added
        product: Product,
        /// Units to add
        quantity: u32,
        /// Selected size
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<String>,
    },

    /// Drop a line.
    RemoveItem {
        /// Line to remove
        id: LineId,
    },

    /// Replace a line's quantity. Zero or less removes the line.
    UpdateQuantity {
        /// Line to update
        id: LineId,
        /// New quantity
        quantity: i64,
    },

    /// Empty the cart.
    ClearCart,
}

impl CartAction {
    /// `ADD_ITEM` for a product and optional size.
    pub fn add_item(product: &Product, quantity: u32, size: Option<&str>) -> Self {
        Self::AddItem {
            product: product.clone(),
            quantity,
            size: size.map(str::to_string),
        }
    }

    /// `REMOVE_ITEM` for a line.
    pub fn remove_item(id: impl Into<LineId>) -> Self {
        Self::RemoveItem { id: id.into() }
    }

    /// `UPDATE_QUANTITY` for a line.
    pub fn update_quantity(id: impl Into<LineId>, quantity: i64) -> Self {
        Self::UpdateQuantity {
            id: id.into(),
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn actions_use_tagged_encoding() -> TestResult {
        let action = CartAction::update_quantity("p1-7", 0);

        let yaml = serde_norway::to_string(&action)?;
        let decoded: CartAction = serde_norway::from_str(&yaml)?;

        assert!(yaml.contains("type: UPDATE_QUANTITY"), "got {yaml}");
        assert_eq!(decoded, action);

        Ok(())
    }

    #[test]
    fn clear_cart_has_no_payload() -> TestResult {
        let decoded: CartAction = serde_norway::from_str("type: CLEAR_CART")?;

        assert_eq!(decoded, CartAction::ClearCart);

        Ok(())
    }
}
