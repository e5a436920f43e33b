use async_trait::async_trait;

use crate::modules::catalog::domain::entities::CustomFieldValue;
use crate::modules::catalog::domain::value_objects::ProductId;
use crate::shared::errors::AppResult;

/// Repository interface for custom product fields
#[async_trait]
pub trait CustomFieldRepository: Send + Sync {
    async fn set_field(
        &self,
        name: &str,
        value: &CustomFieldValue,
        product_id: ProductId,
    ) -> AppResult<()>;
}
