use async_trait::async_trait;

use crate::modules::catalog::domain::entities::{ProductAttribute, ProductDraft};
use crate::modules::catalog::domain::value_objects::ProductId;
use crate::shared::errors::AppResult;

/// Repository interface for the product store
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Find a product id by exact SKU
    async fn find_product_id_by_sku(&self, sku: &str) -> AppResult<Option<ProductId>>;

    /// Persist a finished draft and return the new product id
    async fn create_product(&self, draft: &ProductDraft) -> AppResult<ProductId>;

    /// Attributes of a stored product, term order preserved
    async fn get_product_attributes(&self, id: ProductId) -> AppResult<Vec<ProductAttribute>>;
}
