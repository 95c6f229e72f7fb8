use crate::domain::MenuItemCreate;

/// The demo menu loaded at startup.
pub fn sample_menu() -> Vec<MenuItemCreate> {
    vec![
        MenuItemCreate::new("Veg Sandwich", "Fresh vegetables with cheese and mayo", 60, "Snacks"),
        MenuItemCreate::new("Coffee", "Hot brewed coffee", 30, "Beverages"),
        MenuItemCreate::new("Veg Biryani", "Fragrant rice with vegetables and spices", 100, "Meals"),
        MenuItemCreate::new("Chocolate Muffin", "Freshly baked chocolate muffin", 45, "Bakery"),
        MenuItemCreate::new("Samosa", "Spicy potato filled pastry", 20, "Snacks"),
        MenuItemCreate::new("Cold Drink", "Refreshing cold beverage", 40, "Beverages"),
    ]
}
