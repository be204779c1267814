//! Shopping cart kept in the browser until checkout.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::store_const::MAX_LINE_QUANTITY;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    #[error("invalid product id {0}")]
    InvalidProductId(u64),
    #[error("quantity must be between 1 and {max}, got {got}", max = MAX_LINE_QUANTITY)]
    InvalidQuantity { got: u32 },
    #[error("no cart line with id {0}")]
    LineNotFound(u64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub line_id: u64,
    pub product_id: u64,
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub subtotal: f64,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CartLine {
    fn recompute(&mut self) {
        self.subtotal = self.unit_price * f64::from(self.quantity);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Cart {
    items: Vec<CartLine>,
    item_count: u32,
    total: f64,
    next_line_id: u64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    /// Sum of line quantities.
    pub fn item_count(&self) -> u32 {
        self.item_count
    }

    /// Sum of line subtotals, shipping excluded.
    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add `quantity` of `product`, merging with an existing line for it.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<&CartLine, CartError> {
        if product.id == 0 {
            return Err(CartError::InvalidProductId(product.id));
        }
        if !(1..=MAX_LINE_QUANTITY).contains(&quantity) {
            return Err(CartError::InvalidQuantity { got: quantity });
        }

        let index = match self.items.iter().position(|line| line.product_id == product.id) {
            Some(index) => {
                let line = &mut self.items[index];
                line.quantity = line.quantity.saturating_add(quantity).min(MAX_LINE_QUANTITY);
                line.recompute();
                index
            }
            None => {
                self.next_line_id += 1;
                let mut line = CartLine {
                    line_id: self.next_line_id,
                    product_id: product.id,
                    name: product.name.clone(),
                    quantity,
                    unit_price: product.price,
                    subtotal: 0.0,
                    image_url: product.image_url.clone(),
                };
                line.recompute();
                self.items.push(line);
                self.items.len() - 1
            }
        };
        self.refresh_totals();
        Ok(&self.items[index])
    }

    /// Set a line's quantity; zero removes the line. Lowering is always
    /// allowed, raising stops at [`MAX_LINE_QUANTITY`].
    pub fn update_quantity(&mut self, line_id: u64, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove(line_id);
        }
        let line = self.items.iter_mut().find(|line| line.line_id == line_id).ok_or(CartError::LineNotFound(line_id))?;
        if quantity > MAX_LINE_QUANTITY && quantity >= line.quantity {
            return Err(CartError::InvalidQuantity { got: quantity });
        }
        line.quantity = quantity;
        line.recompute();
        self.refresh_totals();
        Ok(())
    }

    pub fn remove(&mut self, line_id: u64) -> Result<(), CartError> {
        let before = self.items.len();
        self.items.retain(|line| line.line_id != line_id);
        if self.items.len() == before {
            return Err(CartError::LineNotFound(line_id));
        }
        self.refresh_totals();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.refresh_totals();
    }

    fn refresh_totals(&mut self) {
        self.item_count = self.items.iter().map(|line| line.quantity).sum();
        self.total = self.items.iter().map(|line| line.subtotal).sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter_engine::tests::product;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn adding_the_same_product_merges_lines() {
        let mut cart = Cart::new();
        let pad = product(2, "Brake Pad", "AISIN", "Brake System", 38.5);
        cart.add(&pad, 1).unwrap();
        let line = cart.add(&pad, 2).unwrap().clone();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(line.quantity, 3);
        assert_eq!(line.subtotal, 115.5);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn rejects_bad_ids_and_quantities() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(&product(0, "x", "", "", 1.0), 1).unwrap_err(), CartError::InvalidProductId(0));
        assert_eq!(cart.add(&product(1, "x", "", "", 1.0), 0).unwrap_err(), CartError::InvalidQuantity { got: 0 });
        assert_eq!(cart.update_quantity(9, 1).unwrap_err(), CartError::LineNotFound(9));
        assert!(cart.is_empty());
    }

    #[test]
    fn merged_quantities_stop_at_the_line_limit() {
        let mut cart = Cart::new();
        let pad = product(2, "Brake Pad", "AISIN", "Brake System", 10.0);
        cart.add(&pad, MAX_LINE_QUANTITY).unwrap();
        let line = cart.add(&pad, 5).unwrap().clone();
        assert_eq!(line.quantity, MAX_LINE_QUANTITY);
        assert_eq!(cart.total(), 10.0 * f64::from(MAX_LINE_QUANTITY));

        cart.update_quantity(line.line_id, MAX_LINE_QUANTITY - 1).unwrap();
        assert_eq!(cart.item_count(), MAX_LINE_QUANTITY - 1);
        assert_eq!(
            cart.update_quantity(line.line_id, MAX_LINE_QUANTITY + 1).unwrap_err(),
            CartError::InvalidQuantity { got: MAX_LINE_QUANTITY + 1 }
        );
    }

    #[test]
    fn oversized_stored_lines_can_still_be_lowered() {
        let mut cart = Cart::new();
        let line_id = cart.add(&product(1, "Oil Filter", "Denso", "Filtration", 1.0), 1).unwrap().line_id;
        // carts saved before the limit was enforced on merges
        let mut stored = serde_json::to_value(&cart).unwrap();
        stored["items"][0]["quantity"] = 25.into();
        let mut cart: Cart = serde_json::from_value(stored).unwrap();

        cart.update_quantity(line_id, 24).unwrap();
        assert_eq!(cart.items()[0].quantity, 24);
        assert!(cart.update_quantity(line_id, 25).is_err());
    }

    #[test]
    fn zero_quantity_removes_the_line() {
        let mut cart = Cart::new();
        let line_id = cart.add(&product(1, "Oil Filter", "Denso", "Filtration", 9.5), 2).unwrap().line_id;
        cart.update_quantity(line_id, 0).unwrap();
        assert!(cart.is_empty());
        assert_eq!((cart.item_count(), cart.total()), (0, 0.0));
    }

    #[test]
    fn survives_a_storage_round_trip() {
        let mut cart = Cart::new();
        cart.add(&product(1, "Oil Filter", "Denso", "Filtration", 9.5), 2).unwrap();
        let stored = serde_json::to_string(&cart).unwrap();
        let mut restored: Cart = serde_json::from_str(&stored).unwrap();
        let second = restored.add(&product(7, "Wiper", "Bosch", "Wipers", 4.0), 1).unwrap().line_id;
        assert_ne!(second, cart.items()[0].line_id);
    }

    proptest! {
        #[test]
        fn totals_are_sums_of_lines(ops in prop::collection::vec((1u64..6, 1u32..=MAX_LINE_QUANTITY), 0..20)) {
            let mut cart = Cart::new();
            for (id, qty) in ops {
                cart.add(&product(id, "part", "", "", id as f64 * 2.5), qty).unwrap();
            }
            let count: u32 = cart.items().iter().map(|l| l.quantity).sum();
            let total: f64 = cart.items().iter().map(|l| l.unit_price * f64::from(l.quantity)).sum();
            prop_assert_eq!(cart.item_count(), count);
            prop_assert!((cart.total() - total).abs() < 1e-6);
        }
    }
}
