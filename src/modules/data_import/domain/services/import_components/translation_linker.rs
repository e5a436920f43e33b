use std::sync::Arc;

use crate::log_debug;
use crate::modules::catalog::{
    CatalogRepository, ElementType, LanguageCode, ProductId, TranslationGroupId,
    TranslationRecord, TranslationRegistry,
};
use crate::shared::utils::LogContext;

use super::field_catalog::ProductField;
use super::field_mapping::FieldMappingResolver;
use super::types::{ColumnResolution, ImportContext, ImportError, RowClassification};

/// Decides whether a row translates an existing product and wires the
/// product-level translation group
pub struct TranslationLinker {
    catalog: Arc<dyn CatalogRepository>,
    registry: Arc<dyn TranslationRegistry>,
}

impl TranslationLinker {
    pub fn new(catalog: Arc<dyn CatalogRepository>, registry: Arc<dyn TranslationRegistry>) -> Self {
        Self { catalog, registry }
    }

    pub async fn classify_row(
        &self,
        row: &[String],
        context: &ImportContext,
        strict: bool,
    ) -> Result<RowClassification, ImportError> {
        let language_index = Self::required_column(context, ProductField::LanguageCode)?;
        let sku_index = Self::required_column(context, ProductField::Sku)?;

        let language = LanguageCode::new(&Self::read(row, language_index, strict)?);
        if language.is_empty() {
            return Err(ImportError::EmptyRequiredValue {
                field: ProductField::LanguageCode.key().to_string(),
            });
        }
        let mut sku = Self::read(row, sku_index, strict)?;

        let original_sku = FieldMappingResolver::read_field(
            row,
            &context.headers,
            &context.column_mapping,
            ProductField::OriginalProductSku.key(),
            strict,
        )?
        .unwrap_or_default();

        if original_sku.is_empty() {
            return Ok(RowClassification {
                language,
                sku,
                is_translation: false,
                original_product_id: None,
                semantic_original_sku: None,
            });
        }

        let original_product_id = self
            .catalog
            .find_product_id_by_sku(&original_sku)
            .await?
            .ok_or_else(|| ImportError::OriginalProductNotFound {
                sku: original_sku.clone(),
            })?;
        self.ensure_language_free(original_product_id, &original_sku, &language, context)
            .await?;

        let mut semantic_original_sku = None;
        if let Some(existing) = self.find_existing(&sku).await? {
            let existing_language = self
                .registry
                .language_of(existing.value(), &ElementType::Product)
                .await?;
            if existing_language.as_ref() != Some(&language) {
                let disambiguated = format!("{}-{}", sku, language);
                log_debug!(
                    "SKU {} already used by product {} ({:?}), importing as {}",
                    sku,
                    existing,
                    existing_language.as_ref().map(LanguageCode::as_str),
                    disambiguated
                );
                semantic_original_sku = Some(sku);
                sku = disambiguated;
            }
        }

        Ok(RowClassification {
            language,
            sku,
            is_translation: true,
            original_product_id: Some(original_product_id),
            semantic_original_sku,
        })
    }

    /// Translation group of the original product
    ///
    /// An original without a registry entry gets a group seeded in its own
    /// language (the default language when unknown). Non-translations get
    /// `None`.
    pub async fn original_group(
        &self,
        classification: &RowClassification,
        default_language: &LanguageCode,
    ) -> Result<Option<TranslationGroupId>, ImportError> {
        let original = match classification.original_product_id {
            Some(original) if classification.is_translation => original,
            _ => return Ok(None),
        };

        if let Some(group_id) = self
            .registry
            .group_id_of(original.value(), &ElementType::Product)
            .await?
        {
            return Ok(Some(group_id));
        }

        let language = self.original_language(original, default_language).await?;
        let group_id = self
            .registry
            .register_translation(&TranslationRecord {
                element_id: original.value(),
                element_type: ElementType::Product,
                group_id: None,
                language: language.clone(),
                source_language: None,
            })
            .await?;
        LogContext::translation_link(
            "product",
            original.value(),
            Some(group_id.value()),
            language.as_str(),
        );
        Ok(Some(group_id))
    }

    /// Register a saved product's language and group
    ///
    /// Translations join the original's group with the default language as
    /// source; other products start their own group.
    pub async fn link_product(
        &self,
        product_id: ProductId,
        classification: &RowClassification,
        group_id: Option<TranslationGroupId>,
        default_language: &LanguageCode,
    ) -> Result<TranslationGroupId, ImportError> {
        let source_language = if classification.is_translation {
            Some(default_language.clone())
        } else {
            None
        };

        let group_id = self
            .registry
            .register_translation(&TranslationRecord {
                element_id: product_id.value(),
                element_type: ElementType::Product,
                group_id: if classification.is_translation { group_id } else { None },
                language: classification.language.clone(),
                source_language,
            })
            .await?;
        Ok(group_id)
    }

    /// Fail the row when the original already has a member in `language`
    ///
    /// Runs before any term or product is created, so a rejected row leaves
    /// nothing behind.
    async fn ensure_language_free(
        &self,
        original: ProductId,
        original_sku: &str,
        language: &LanguageCode,
        context: &ImportContext,
    ) -> Result<(), ImportError> {
        let original_language = self
            .original_language(original, &context.default_language)
            .await?;
        let taken = if &original_language == language {
            true
        } else {
            self.registry
                .translation_of(original.value(), &ElementType::Product, language)
                .await?
                .is_some()
        };

        if taken {
            return Err(ImportError::TranslationExists {
                sku: original_sku.to_string(),
                language: language.clone(),
            });
        }
        Ok(())
    }

    async fn original_language(
        &self,
        original: ProductId,
        default_language: &LanguageCode,
    ) -> Result<LanguageCode, ImportError> {
        Ok(self
            .registry
            .language_of(original.value(), &ElementType::Product)
            .await?
            .filter(|language| !language.is_empty())
            .unwrap_or_else(|| default_language.clone()))
    }

    /// Product already using this SKU, if any
    pub async fn find_existing(&self, sku: &str) -> Result<Option<ProductId>, ImportError> {
        if sku.is_empty() {
            return Ok(None);
        }
        Ok(self.catalog.find_product_id_by_sku(sku).await?)
    }

    fn required_column(context: &ImportContext, field: ProductField) -> Result<usize, ImportError> {
        match FieldMappingResolver::resolve_column(
            &context.headers,
            &context.column_mapping,
            field.key(),
        ) {
            ColumnResolution::Mapped(index) => Ok(index),
            ColumnResolution::NotMapped => Err(ImportError::MissingRequiredColumn {
                field: field.key().to_string(),
            }),
        }
    }

    fn read(row: &[String], index: usize, strict: bool) -> Result<String, ImportError> {
        if strict {
            FieldMappingResolver::try_extract_value(row, index)
        } else {
            Ok(FieldMappingResolver::extract_value(row, index))
        }
    }
}
