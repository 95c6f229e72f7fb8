use std::convert::Infallible;

use crate::actor_framework::Entity;
use crate::domain::{MenuItem, MenuItemCreate, MAX_ITEM_PRICE};
use super::CatalogError;

impl Entity for MenuItem {
    type Id = String;
    type CreateParams = MenuItemCreate;
    type Patch = Infallible;
    type Action = ();
    type ActionResult = ();
    type Error = CatalogError;

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new MenuItem from creation parameters.
    ///
    /// # Errors
    /// Rejects items with a blank name or category, or a price above
    /// [`MAX_ITEM_PRICE`].
    fn from_create_params(id: String, params: MenuItemCreate) -> Result<Self, CatalogError> {
        if params.name.trim().is_empty() {
            return Err(CatalogError::InvalidItem("name is required".to_string()));
        }
        if params.category.trim().is_empty() {
            return Err(CatalogError::InvalidItem(format!("{} has no category", params.name)));
        }
        if params.price > MAX_ITEM_PRICE {
            return Err(CatalogError::InvalidItem(format!(
                "{} costs {}, above the limit of {MAX_ITEM_PRICE}",
                params.name, params.price
            )));
        }
        Ok(Self {
            id,
            name: params.name,
            description: params.description,
            price: params.price,
            image: params.image,
            category: params.category,
            available: params.available,
        })
    }

    /// Menu items are immutable for the lifetime of a session.
    fn on_update(&mut self, patch: Infallible) -> Result<(), CatalogError> {
        match patch {}
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), CatalogError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_ceiling() {
        let at_limit = MenuItemCreate::new("Feast", "Everything", MAX_ITEM_PRICE, "Meals");
        assert!(MenuItem::from_create_params("1".to_string(), at_limit).is_ok());

        let too_dear = MenuItemCreate::new("Gold Samosa", "Gilded", u64::MAX / 2, "Snacks");
        assert!(matches!(
            MenuItem::from_create_params("2".to_string(), too_dear),
            Err(CatalogError::InvalidItem(_))
        ));
    }

    #[test]
    fn test_blank_fields_rejected() {
        let nameless = MenuItemCreate::new(" ", "", 10, "Snacks");
        assert!(MenuItem::from_create_params("1".to_string(), nameless).is_err());
        let uncategorised = MenuItemCreate::new("Tea", "", 10, "");
        assert!(MenuItem::from_create_params("1".to_string(), uncategorised).is_err());
    }
}
