use serde::{Deserialize, Serialize};

use super::MenuItem;

/// A menu item snapshot and how many of it the user wants.
///
/// Quantity is always at least 1 while the entry is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub menu_item: MenuItem,
    pub quantity: u32,
}

impl CartItem {
    pub fn new(menu_item: MenuItem, quantity: u32) -> Self {
        Self { menu_item, quantity }
    }

    /// `price * quantity`, or `None` if it does not fit in a `u64`.
    pub fn line_total(&self) -> Option<u64> {
        self.menu_item.price.checked_mul(u64::from(self.quantity))
    }
}

/// Sum of `price * quantity` over the given entries, `None` on overflow.
pub fn checked_total_price(items: &[CartItem]) -> Option<u64> {
    items
        .iter()
        .try_fold(0u64, |sum, item| sum.checked_add(item.line_total()?))
}

/// Like [`checked_total_price`] but saturating at `u64::MAX`.
///
/// The cart refuses entries whose total would overflow, so for stored carts
/// and placed orders this is exact.
pub fn total_price(items: &[CartItem]) -> u64 {
    checked_total_price(items).unwrap_or(u64::MAX)
}

pub fn total_quantity(items: &[CartItem]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: u64, quantity: u32) -> CartItem {
        let menu_item = MenuItem {
            id: price.to_string(),
            name: "Item".to_string(),
            description: String::new(),
            price,
            image: String::new(),
            category: "Snacks".to_string(),
            available: true,
        };
        CartItem::new(menu_item, quantity)
    }

    #[test]
    fn test_totals() {
        let items = vec![item(60, 2), item(30, 1)];
        assert_eq!(checked_total_price(&items), Some(150));
        assert_eq!(total_price(&items), 150);
        assert_eq!(total_quantity(&items), 3);
        assert_eq!(total_price(&[]), 0);
    }

    #[test]
    fn test_overflow_detected_not_panicking() {
        assert_eq!(item(u64::MAX / 2, 3).line_total(), None);

        let items = vec![item(u64::MAX / 2, 2), item(10, 1)];
        assert_eq!(checked_total_price(&items), None);
        assert_eq!(total_price(&items), u64::MAX);
    }
}
