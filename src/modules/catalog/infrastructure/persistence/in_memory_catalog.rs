use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::log_debug;
use crate::modules::catalog::domain::entities::{ProductAttribute, ProductDraft};
use crate::modules::catalog::domain::repositories::CatalogRepository;
use crate::modules::catalog::domain::value_objects::ProductId;
use crate::shared::errors::{AppError, AppResult};

/// Product store backed by a concurrent map
///
/// SKUs are not unique here; lookups return the oldest product.
#[derive(Debug)]
pub struct InMemoryCatalogRepository {
    products: DashMap<u64, ProductDraft>,
    next_id: AtomicU64,
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self {
            products: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn product(&self, id: ProductId) -> Option<ProductDraft> {
        self.products.get(&id.value()).map(|entry| entry.value().clone())
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    /// Ids of every product carrying `sku`, oldest first
    pub fn products_with_sku(&self, sku: &str) -> Vec<ProductId> {
        let mut ids: Vec<ProductId> = self
            .products
            .iter()
            .filter(|entry| entry.sku == sku)
            .map(|entry| ProductId(*entry.key()))
            .collect();
        ids.sort();
        ids
    }
}

impl Default for InMemoryCatalogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn find_product_id_by_sku(&self, sku: &str) -> AppResult<Option<ProductId>> {
        if sku.is_empty() {
            return Ok(None);
        }
        Ok(self.products_with_sku(sku).into_iter().next())
    }

    async fn create_product(&self, draft: &ProductDraft) -> AppResult<ProductId> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.products.insert(id, draft.clone());
        log_debug!("Stored product #{} with SKU '{}'", id, draft.sku);
        Ok(ProductId(id))
    }

    async fn get_product_attributes(&self, id: ProductId) -> AppResult<Vec<ProductAttribute>> {
        self.products
            .get(&id.value())
            .map(|entry| entry.attributes.clone())
            .ok_or_else(|| AppError::NotFound(format!("Product {}", id)))
    }
}
