use crate::model::product::null_as_empty;
use crate::model::{Product, ProductId};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;

/// A line in the cart: a product's display fields plus the quantity held.
///
/// Serialized flat, `{ id, name, price, image, amount }`, which is also the layout the
/// storage key holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    #[serde(alias = "title")]
    pub name: String,
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image: String,
    pub amount: u32,
}

impl CartItem {
    pub fn from_product(product: Product, amount: u32) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            image: product.image,
            amount,
        }
    }

    /// `price * amount`.
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.amount)
    }
}

/// An immutable snapshot of the cart.
///
/// Items are unique by id and every amount is at least 1. The `with_*`/`without`
/// methods never touch `self`; they build the next snapshot, which the owner swaps in
/// wholesale. Cloning shares the underlying slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    items: Arc<[CartItem]>,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    pub fn new() -> Self {
        Self {
            items: Arc::from(Vec::new()),
        }
    }

    /// Builds a cart from raw items, dropping entries that would break the invariants:
    /// zero amounts, and any repeat of an id already seen.
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut kept: Vec<CartItem> = Vec::new();
        for item in items {
            if item.amount == 0 || kept.iter().any(|k| k.id == item.id) {
                continue;
            }
            kept.push(item);
        }
        Self {
            items: Arc::from(kept),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CartItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    pub fn amount_of(&self, id: ProductId) -> Option<u32> {
        self.get(id).map(|item| item.amount)
    }

    /// Sum of all amounts (what a cart badge shows).
    pub fn total_amount(&self) -> u32 {
        self.items.iter().map(|item| item.amount).sum()
    }

    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Next snapshot with `item` appended, or replacing the entry with the same id.
    #[must_use]
    pub fn with_item(&self, item: CartItem) -> Self {
        if item.amount == 0 {
            return self.without(item.id);
        }
        let mut next = self.items.to_vec();
        match next.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => next.push(item),
        }
        Self {
            items: Arc::from(next),
        }
    }

    /// Next snapshot without the entry for `id`. Equal to `self` if there is none.
    #[must_use]
    pub fn without(&self, id: ProductId) -> Self {
        if !self.contains(id) {
            return self.clone();
        }
        Self {
            items: self.items.iter().filter(|item| item.id != id).cloned().collect(),
        }
    }

    /// Next snapshot with the amount for `id` replaced. A zero amount removes the entry;
    /// an unknown id leaves the cart as it is.
    #[must_use]
    pub fn with_amount(&self, id: ProductId, amount: u32) -> Self {
        if amount == 0 {
            return self.without(id);
        }
        Self {
            items: self
                .items
                .iter()
                .map(|item| {
                    if item.id == id {
                        CartItem {
                            amount,
                            ..item.clone()
                        }
                    } else {
                        item.clone()
                    }
                })
                .collect(),
        }
    }
}

impl FromIterator<CartItem> for Cart {
    fn from_iter<I: IntoIterator<Item = CartItem>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter())
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<CartItem>::deserialize(deserializer).map(Self::from_items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32, amount: u32) -> CartItem {
        CartItem::from_product(Product::new(id, format!("Shoe {id}"), 10.0), amount)
    }

    #[test]
    fn test_with_item_appends_in_order() {
        let cart = Cart::new().with_item(item(2, 1)).with_item(item(1, 1));
        let ids: Vec<u32> = cart.iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_with_item_keeps_ids_unique() {
        let cart = Cart::new().with_item(item(1, 1)).with_item(item(1, 4));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.amount_of(ProductId(1)), Some(4));
    }

    #[test]
    fn test_snapshots_are_not_mutated() {
        let before = Cart::new().with_item(item(1, 1));
        let after = before.with_amount(ProductId(1), 3);
        assert_eq!(before.amount_of(ProductId(1)), Some(1));
        assert_eq!(after.amount_of(ProductId(1)), Some(3));
    }

    #[test]
    fn test_without_removes_exactly_one_entry() {
        let cart = Cart::from_items([item(1, 1), item(2, 2), item(3, 3)]);
        let next = cart.without(ProductId(2));
        assert_eq!(next, Cart::from_items([item(1, 1), item(3, 3)]));
        assert_eq!(next.without(ProductId(9)), next);
    }

    #[test]
    fn test_zero_amount_removes_instead_of_storing() {
        let cart = Cart::from_items([item(1, 2)]);
        assert!(cart.with_amount(ProductId(1), 0).is_empty());
        assert!(Cart::new().with_item(item(5, 0)).is_empty());
    }

    #[test]
    fn test_with_amount_ignores_unknown_id() {
        let cart = Cart::from_items([item(1, 2)]);
        assert_eq!(cart.with_amount(ProductId(7), 3), cart);
    }

    #[test]
    fn test_from_items_repairs_invariants() {
        let cart = Cart::from_items([item(1, 1), item(2, 0), item(1, 5)]);
        assert_eq!(cart, Cart::from_items([item(1, 1)]));
    }

    #[test]
    fn test_totals() {
        let cart = Cart::from_items([
            item(1, 2),
            CartItem::from_product(Product::new(2, "Boot", 25.5), 1),
        ]);
        assert_eq!(cart.total_amount(), 3);
        assert!((cart.subtotal() - 45.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_json_round_trip() {
        let cart = Cart::from_items([
            item(1, 1),
            CartItem::from_product(Product::new(2, "Boot", 25.5).with_image("boot.png"), 3),
        ]);
        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_serialized_layout_is_flat() {
        let cart = Cart::from_items([item(1, 2)]);
        let value = serde_json::to_value(&cart).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{ "id": 1, "name": "Shoe 1", "price": 10.0, "image": "", "amount": 2 }])
        );
    }
}
