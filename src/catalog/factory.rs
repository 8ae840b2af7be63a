use std::sync::Arc;
use crate::books::repository::InventoryStore;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::domain::Configuration;

pub fn create_catalog_service(config: &Configuration, inventory: Arc<dyn InventoryStore>) -> Arc<dyn CatalogService> {
    Arc::new(CatalogServiceImpl::new(config, inventory))
}
