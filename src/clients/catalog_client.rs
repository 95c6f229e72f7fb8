use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::catalog_actor::CatalogError;
use crate::domain::{MenuItem, MenuItemCreate};

/// Client for the menu catalog.
///
/// Reads return items in the order they were added to the catalog.
#[derive(Clone)]
pub struct CatalogClient {
    inner: ResourceClient<MenuItem>,
}

impl CatalogClient {
    pub fn new(inner: ResourceClient<MenuItem>) -> Self {
        Self { inner }
    }

    /// Adds an item at startup; the catalog is read-only afterwards.
    #[instrument(skip(self, item), fields(item_name = %item.name))]
    pub async fn add_item(&self, item: MenuItemCreate) -> Result<String, CatalogError> {
        debug!("Sending request");
        Ok(self.inner.create(item).await?)
    }

    #[instrument(skip(self))]
    pub async fn list_items(&self) -> Result<Vec<MenuItem>, CatalogError> {
        debug!("Sending request");
        Ok(self.inner.list().await?)
    }

    #[instrument(skip(self))]
    pub async fn get_item(&self, id: String) -> Result<Option<MenuItem>, CatalogError> {
        debug!("Sending request");
        Ok(self.inner.get(id).await?)
    }

    /// Items whose name, description or category contains `query`, ignoring case.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<MenuItem>, CatalogError> {
        let items = self.list_items().await?;
        Ok(items.into_iter().filter(|item| item.matches(query)).collect())
    }

    /// Distinct categories in first-seen order.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<String>, CatalogError> {
        let mut categories: Vec<String> = Vec::new();
        for item in self.list_items().await? {
            if !categories.contains(&item.category) {
                categories.push(item.category);
            }
        }
        Ok(categories)
    }

    #[instrument(skip(self))]
    pub async fn items_in_category(&self, category: &str) -> Result<Vec<MenuItem>, CatalogError> {
        let items = self.list_items().await?;
        Ok(items.into_iter().filter(|item| item.category == category).collect())
    }

    pub async fn shutdown(&self) -> Result<(), CatalogError> {
        Ok(self.inner.shutdown().await?)
    }
}
