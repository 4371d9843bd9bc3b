//! Cart Reducer

use crate::{
    cart::{Cart, CartAction, CartLine, LineId},
    products::Product,
};

/// Compute the next cart state from the previous state and an action.
///
/// Pure: the previous state is never mutated. Unknown line ids are a no-op, and an `ADD_ITEM`
/// with zero quantity leaves the state unchanged.
pub fn reduce(state: &Cart, action: &CartAction) -> Cart {
    match action {
        CartAction::AddItem {
            product,
            quantity,
            size,
        } => add_item(state, product, *quantity, size.as_deref()),
        CartAction::RemoveItem { id } => without_line(state, id),
        CartAction::UpdateQuantity { id, quantity } => update_quantity(state, id, *quantity),
        CartAction::ClearCart => Cart::new(),
    }
}

fn add_item(state: &Cart, product: &Product, quantity: u32, size: Option<&str>) -> Cart {
    if quantity == 0 {
        return state.clone();
    }

    let id = LineId::for_product(&product.id, size);

    if state.line(&id).is_none() {
        let mut lines = state.lines.clone();
        lines.push(CartLine::from_product(product, quantity, size));

        return Cart { lines };
    }

    Cart {
        lines: state
            .lines
            .iter()
            .map(|line| {
                if line.id == id {
                    CartLine {
                        quantity: line.quantity.saturating_add(quantity),
                        ..line.clone()
                    }
                } else {
                    line.clone()
                }
            })
            .collect(),
    }
}

fn without_line(state: &Cart, id: &LineId) -> Cart {
    Cart {
        lines: state
            .lines
            .iter()
            .filter(|line| line.id != *id)
            .cloned()
            .collect(),
    }
}

fn update_quantity(state: &Cart, id: &LineId, quantity: i64) -> Cart {
    if quantity <= 0 {
        return without_line(state, id);
    }

    let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

    Cart {
        lines: state
            .lines
            .iter()
            .map(|line| {
                if line.id == *id {
                    CartLine {
                        quantity,
                        ..line.clone()
                    }
                } else {
                    line.clone()
                }
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        prices::Price,
        products::{Category, Metal, ProductId},
    };

    use super::*;

    fn diamond_ring() -> Product {
        Product {
            id: ProductId::new("p1"),
            name: "Diamond Ring".to_string(),
            description: "Shiny".to_string(),
            price: Price::new(1000),
            images: vec!["img.jpg".to_string()],
            metal: Metal::Gold,
            category: Category::Rings,
            sizes: Some(vec!["7".to_string(), "8".to_string()]),
            stock: 10,
        }
    }

    fn cart_with_ring() -> Cart {
        reduce(
            &Cart::new(),
            &CartAction::add_item(&diamond_ring(), 1, Some("7")),
        )
    }

    #[test]
    fn adds_new_item() {
        let state = cart_with_ring();

        assert_eq!(state.len(), 1);
        assert_eq!(state.lines().first().map(|l| l.id.as_str()), Some("p1-7"));
        assert_eq!(state.lines().first().map(|l| l.quantity), Some(1));
    }

    #[test]
    fn increments_quantity_for_same_variant() {
        let state = reduce(
            &cart_with_ring(),
            &CartAction::add_item(&diamond_ring(), 2, Some("7")),
        );

        assert_eq!(state.len(), 1);
        assert_eq!(state.lines().first().map(|l| l.quantity), Some(3));
    }

    #[test]
    fn different_sizes_are_different_lines() {
        let state = reduce(
            &cart_with_ring(),
            &CartAction::add_item(&diamond_ring(), 1, Some("8")),
        );

        assert_eq!(state.len(), 2);
        assert_eq!(state.lines().get(1).map(|l| l.id.as_str()), Some("p1-8"));
    }

    #[test]
    fn merge_keeps_snapshot_price() {
        let mut repriced = diamond_ring();
        repriced.price = Price::new(5000);

        let state = reduce(&cart_with_ring(), &CartAction::add_item(&repriced, 1, Some("7")));

        assert_eq!(state.total(), Price::new(2000));
    }

    #[test]
    fn zero_quantity_add_is_ignored() {
        let state = reduce(
            &Cart::new(),
            &CartAction::add_item(&diamond_ring(), 0, None),
        );

        assert!(state.is_empty());
    }

    #[test]
    fn removes_item() {
        let state = reduce(&cart_with_ring(), &CartAction::remove_item("p1-7"));

        assert!(state.is_empty());
    }

    #[test]
    fn removing_unknown_item_is_noop() {
        let before = cart_with_ring();
        let after = reduce(&before, &CartAction::remove_item("nope"));

        assert_eq!(after, before);
    }

    #[test]
    fn update_replaces_quantity() {
        let state = reduce(&cart_with_ring(), &CartAction::update_quantity("p1-7", 5));

        assert_eq!(state.lines().first().map(|l| l.quantity), Some(5));
    }

    #[test]
    fn update_to_zero_or_negative_removes() {
        let zero = reduce(&cart_with_ring(), &CartAction::update_quantity("p1-7", 0));
        let negative = reduce(&cart_with_ring(), &CartAction::update_quantity("p1-7", -3));

        assert!(zero.is_empty());
        assert!(negative.is_empty());
    }

    #[test]
    fn update_unknown_line_is_noop() {
        let before = cart_with_ring();
        let after = reduce(&before, &CartAction::update_quantity("p2", 4));

        assert_eq!(after, before);
    }

    #[test]
    fn clear_empties_cart() {
        let state = reduce(&cart_with_ring(), &CartAction::ClearCart);

        assert!(state.is_empty());
    }

    #[test]
    fn previous_state_is_untouched() {
        let before = cart_with_ring();
        let snapshot = before.clone();

        let _after = reduce(&before, &CartAction::add_item(&diamond_ring(), 4, Some("7")));

        assert_eq!(before, snapshot);
    }
}
