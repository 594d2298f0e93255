//! In-memory shopping cart.
//!
//! The cart is a pure state container: an insertion-ordered collection of
//! line items keyed by product id. It performs no I/O; the web layer keeps
//! one per visitor session and serializes it between requests.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Product;

/// A cart entry referencing a catalog item plus a chosen quantity.
///
/// The unit price is captured when the item is first added and is not
/// refreshed if the catalog price changes before checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Equal to the catalog item's id; unique within a cart.
    pub id: String,
    pub name: String,
    pub price: Decimal,
    /// Always >= 1; a line item is removed, never decremented away.
    pub quantity: u32,
}

impl LineItem {
    /// Unit price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// An insertion-ordered collection of line items with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add one unit of a catalog item.
    ///
    /// If a line item with the same id already exists its quantity is
    /// incremented and the stored unit price is kept (first-seen price
    /// wins); otherwise a new line item is appended at the item's current
    /// price. Always succeeds.
    pub fn add(&mut self, product: &Product) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == product.id) {
            item.quantity = item.quantity.saturating_add(1);
        } else {
            self.items.push(LineItem {
                id: product.id.clone(),
                name: product.name.clone(),
                price: product.price,
                quantity: 1,
            });
        }
    }

    /// Remove a line item. Unknown ids are a no-op.
    pub fn remove(&mut self, id: &str) {
        self.items.retain(|i| i.id != id);
    }

    /// Adjust a line item's quantity by `delta`, clamped to a minimum of 1.
    ///
    /// Decrementing cannot empty a line; removal is only ever explicit via
    /// [`Cart::remove`]. Unknown ids are a no-op.
    pub fn update_quantity(&mut self, id: &str, delta: i64) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            let next = i64::from(item.quantity)
                .saturating_add(delta)
                .clamp(1, i64::from(u32::MAX));
            item.quantity = u32::try_from(next).unwrap_or(1);
        }
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of unit price times quantity over all line items.
    ///
    /// Recomputed on every call; never cached.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Total number of units across all line items (the nav badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, i| acc.saturating_add(i.quantity))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Item {id}"),
            category: "Mains".to_string(),
            price: Decimal::from(price),
            description: String::new(),
            image_url: String::new(),
            active_status: true,
        }
    }

    #[test]
    fn repeated_adds_merge_into_one_line() {
        let mut cart = Cart::new();
        let momo = product("A", 500);
        for _ in 0..5 {
            cart.add(&momo);
        }

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
        assert_eq!(cart.total(), Decimal::from(2500));
    }

    #[test]
    fn first_seen_price_wins_on_re_add() {
        let mut cart = Cart::new();
        cart.add(&product("A", 500));
        // The catalog price changed before the second add; the line keeps
        // the price captured at first add.
        cart.add(&product("A", 900));

        assert_eq!(cart.items()[0].price, Decimal::from(500));
        assert_eq!(cart.total(), Decimal::from(1000));
    }

    #[test]
    fn quantity_never_drops_below_one() {
        let mut cart = Cart::new();
        cart.add(&product("A", 500));
        cart.add(&product("A", 500));

        cart.update_quantity("A", -5);
        assert_eq!(cart.items()[0].quantity, 1);

        cart.update_quantity("A", i64::MIN);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn update_and_remove_on_unknown_id_are_noops() {
        let mut cart = Cart::new();
        cart.add(&product("A", 500));

        cart.update_quantity("Z", 3);
        cart.remove("Z");

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn total_tracks_any_interleaving() {
        let mut cart = Cart::new();
        cart.add(&product("A", 500));
        cart.add(&product("B", 250));
        cart.update_quantity("B", 3);
        cart.add(&product("A", 500));
        cart.remove("B");
        cart.add(&product("C", 120));

        // A x2 + C x1
        assert_eq!(cart.total(), Decimal::from(1120));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn clear_empties_everything() {
        let mut cart = Cart::new();
        cart.add(&product("A", 500));
        cart.add(&product("B", 250));

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn add_clamp_remove_scenario() {
        let mut cart = Cart::new();
        let item = product("A", 500);

        cart.add(&item);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(cart.total(), Decimal::from(500));

        cart.add(&item);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.total(), Decimal::from(1000));

        cart.update_quantity("A", -5);
        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(cart.total(), Decimal::from(500));

        cart.remove("A");
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut cart = Cart::new();
        cart.add(&product("B", 250));
        cart.add(&product("A", 500));
        cart.add(&product("B", 250));

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["B", "A"]);
    }

    #[test]
    fn cart_serializes_as_bare_item_list() {
        let mut cart = Cart::new();
        cart.add(&product("A", 500));

        let json = serde_json::to_string(&cart).expect("should serialize");
        let restored: Cart = serde_json::from_str(&json).expect("should parse");
        assert_eq!(restored, cart);
        assert!(json.starts_with('['), "session stores a plain array: {json}");
    }
}
