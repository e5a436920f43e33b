use async_trait::async_trait;
use dashmap::DashMap;

use crate::modules::catalog::domain::entities::CustomFieldValue;
use crate::modules::catalog::domain::repositories::CustomFieldRepository;
use crate::modules::catalog::domain::value_objects::ProductId;
use crate::shared::errors::AppResult;

#[derive(Debug, Default)]
pub struct InMemoryCustomFieldRepository {
    fields: DashMap<(ProductId, String), CustomFieldValue>,
}

impl InMemoryCustomFieldRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, product_id: ProductId, name: &str) -> Option<CustomFieldValue> {
        self.fields
            .get(&(product_id, name.to_string()))
            .map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl CustomFieldRepository for InMemoryCustomFieldRepository {
    async fn set_field(
        &self,
        name: &str,
        value: &CustomFieldValue,
        product_id: ProductId,
    ) -> AppResult<()> {
        self.fields
            .insert((product_id, name.to_string()), value.clone());
        Ok(())
    }
}
