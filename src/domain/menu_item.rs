use serde::{Deserialize, Serialize};

/// Highest price the catalog accepts for a single item, in minor units.
pub const MAX_ITEM_PRICE: u64 = 10_000_000;

/// An orderable item on the cafeteria menu.
///
/// `price` is in minor currency units so totals stay exact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub image: String,
    pub category: String,
    pub available: bool,
}

/// Params for adding an item to the catalog.
#[derive(Debug, Clone)]
pub struct MenuItemCreate {
    pub name: String,
    pub description: String,
    pub price: u64,
    pub image: String,
    pub category: String,
    pub available: bool,
}

impl MenuItemCreate {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: u64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
            image: "/placeholder.svg".to_string(),
            category: category.into(),
            available: true,
        }
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }
}

impl MenuItem {
    /// Case-insensitive match against name, description or category.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
            || self.category.to_lowercase().contains(&query)
    }
}
