use std::sync::Arc;

use crate::modules::catalog::{
    AttachmentId, CatalogRepository, CustomFieldValue, LanguageCode, MediaRepository,
    ProductAttribute, ProductDraft, TermId, PRODUCT_CATEGORY_TAXONOMY,
};
use crate::shared::infrastructure::TermFailurePolicy;
use crate::{log_debug, log_warn};

use super::field_catalog::{FieldCatalog, FieldHandler, RegisteredField};
use super::field_mapping::FieldMappingResolver;
use super::term_reconciler::{TermReconciler, TermResolutionContext};
use super::types::{ImportContext, ImportError, OmittedField, RowClassification, TypedValue};
use super::value_transformer::ValueTransformer;

/// Draft assembled from one row, plus the fields that had to be dropped
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltDraft {
    pub draft: ProductDraft,
    pub omitted_fields: Vec<OmittedField>,
}

/// Runs the field loop for one row
pub struct DraftBuilder {
    reconciler: TermReconciler,
    catalog: Arc<dyn CatalogRepository>,
    media: Arc<dyn MediaRepository>,
    term_failure_policy: TermFailurePolicy,
}

impl DraftBuilder {
    pub fn new(
        reconciler: TermReconciler,
        catalog: Arc<dyn CatalogRepository>,
        media: Arc<dyn MediaRepository>,
    ) -> Self {
        Self {
            reconciler,
            catalog,
            media,
            term_failure_policy: TermFailurePolicy::default(),
        }
    }

    pub fn with_term_failure_policy(mut self, policy: TermFailurePolicy) -> Self {
        self.term_failure_policy = policy;
        self
    }

    pub async fn build(
        &self,
        row: &[String],
        context: &ImportContext,
        fields: &FieldCatalog,
        classification: &RowClassification,
        strict: bool,
    ) -> Result<BuiltDraft, ImportError> {
        let mut draft = ProductDraft::new(&classification.sku, classification.language.clone());
        let mut original_attributes = Vec::new();
        if let Some(original) = classification.original_product_id {
            draft = draft.as_translation_of(original);
            original_attributes = self.catalog.get_product_attributes(original).await?;
        }

        let mut omitted_fields = Vec::new();

        for field in fields.fields() {
            if field.handler == FieldHandler::Control {
                continue;
            }

            let raw = match FieldMappingResolver::read_field(
                row,
                &context.headers,
                &context.column_mapping,
                &field.spec.key,
                strict,
            )? {
                Some(raw) => raw,
                None => continue,
            };

            let value = ValueTransformer::transform(&raw, field.spec.field_type);
            if value.is_empty() {
                continue;
            }

            let applied = self
                .apply(&mut draft, field, value, context, &original_attributes)
                .await;

            match applied {
                Ok(()) => {}
                Err(error @ ImportError::TermCreationFailed { .. })
                    if self.term_failure_policy == TermFailurePolicy::OmitField =>
                {
                    log_warn!(
                        "Omitting field '{}' of SKU {}: {}",
                        field.spec.key,
                        classification.sku,
                        error
                    );
                    omitted_fields.push(OmittedField {
                        field_key: field.spec.key.clone(),
                        reason: error.to_string(),
                    });
                }
                Err(error) => return Err(error),
            }
        }

        Ok(BuiltDraft {
            draft,
            omitted_fields,
        })
    }

    async fn apply(
        &self,
        draft: &mut ProductDraft,
        field: &RegisteredField,
        value: TypedValue,
        context: &ImportContext,
        original_attributes: &[ProductAttribute],
    ) -> Result<(), ImportError> {
        match &field.handler {
            FieldHandler::Control => Ok(()),
            FieldHandler::Scalar(scalar) => {
                if let TypedValue::Text(text) = value {
                    draft.set_scalar(*scalar, &text);
                }
                Ok(())
            }
            FieldHandler::Image => {
                let url = value.into_items().into_iter().next().unwrap_or_default();
                if let Some(id) = self.attachment_for(&url).await? {
                    draft.set_image_id(id);
                }
                Ok(())
            }
            FieldHandler::Gallery => {
                let mut ids = Vec::new();
                for url in value.into_items() {
                    if let Some(id) = self.attachment_for(&url).await? {
                        ids.push(id);
                    }
                }
                if !ids.is_empty() {
                    draft.set_gallery_image_ids(ids);
                }
                Ok(())
            }
            FieldHandler::Categories => {
                let term_context =
                    TermResolutionContext::standalone(&draft.language, &context.default_language);
                let mut ids = Vec::new();
                for name in value.into_items() {
                    let id = self
                        .reconciler
                        .resolve_term(PRODUCT_CATEGORY_TAXONOMY, &name, &term_context)
                        .await?;
                    ids.push(id);
                }
                if !ids.is_empty() {
                    draft.set_category_ids(ids);
                }
                Ok(())
            }
            FieldHandler::Attribute { taxonomy } => {
                let original_terms = original_attributes
                    .iter()
                    .find(|attribute| &attribute.taxonomy == taxonomy)
                    .map(|attribute| attribute.term_ids.as_slice());
                let term_ids = self
                    .resolve_attribute_terms(
                        taxonomy,
                        value.into_items(),
                        original_terms,
                        &draft.language,
                        &context.default_language,
                    )
                    .await?;
                if !term_ids.is_empty() {
                    draft.add_attribute(ProductAttribute::new(taxonomy, term_ids));
                }
                Ok(())
            }
            FieldHandler::Custom { name } => {
                let pieces: Vec<String> = value
                    .into_items()
                    .into_iter()
                    .filter(|piece| !piece.is_empty())
                    .collect();
                if let Some(custom) = CustomFieldValue::from_pieces(pieces) {
                    draft.set_custom_field(name, custom);
                }
                Ok(())
            }
        }
    }

    /// Resolve attribute pieces, linking piece `i` to original term `i`
    /// when the original product carries this taxonomy
    async fn resolve_attribute_terms(
        &self,
        taxonomy: &str,
        pieces: Vec<String>,
        original_terms: Option<&[TermId]>,
        language: &LanguageCode,
        default_language: &LanguageCode,
    ) -> Result<Vec<TermId>, ImportError> {
        let mut term_ids = Vec::new();

        for (index, name) in pieces.iter().enumerate() {
            if name.is_empty() {
                continue;
            }

            let term_context = match original_terms {
                Some(originals) => match originals.get(index) {
                    Some(original) => {
                        TermResolutionContext::linked(language, default_language, *original)
                    }
                    None => {
                        log_warn!(
                            "'{}' at position {} has no counterpart in the original {} terms, dropped",
                            name,
                            index,
                            taxonomy
                        );
                        continue;
                    }
                },
                None => TermResolutionContext::standalone(language, default_language),
            };

            let id = self
                .reconciler
                .resolve_term(taxonomy, name, &term_context)
                .await?;
            term_ids.push(id);
        }

        Ok(term_ids)
    }

    async fn attachment_for(&self, url: &str) -> Result<Option<AttachmentId>, ImportError> {
        if url.is_empty() {
            return Ok(None);
        }
        let id = self.media.find_attachment_id_by_url(url).await?;
        if id.is_none() {
            log_debug!("No attachment found for {}", url);
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::infrastructure::persistence::{
        InMemoryCatalogRepository, InMemoryMediaRepository, InMemoryTaxonomyRepository,
        InMemoryTranslationRegistry,
    };
    use crate::modules::catalog::{ProductId, ScalarField};
    use crate::modules::data_import::domain::services::import_components::field_catalog::{
        AttributeDefinition, CustomFieldDefinition,
    };
    use crate::modules::data_import::domain::services::import_components::types::ColumnMapping;

    struct Fixture {
        catalog: Arc<InMemoryCatalogRepository>,
        terms: Arc<InMemoryTaxonomyRepository>,
        builder: DraftBuilder,
    }

    fn fixture(policy: TermFailurePolicy) -> Fixture {
        let catalog = Arc::new(InMemoryCatalogRepository::new());
        let terms = Arc::new(InMemoryTaxonomyRepository::new());
        let registry = Arc::new(InMemoryTranslationRegistry::new("it"));
        let media = Arc::new(
            InMemoryMediaRepository::new()
                .with_attachment("https://cdn.example/chair.jpg", 11)
                .with_attachment("https://cdn.example/chair-side.jpg", 12),
        );
        let builder = DraftBuilder::new(
            TermReconciler::new(terms.clone(), registry),
            catalog.clone(),
            media,
        )
        .with_term_failure_policy(policy);
        Fixture {
            catalog,
            terms,
            builder,
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn headers() -> Vec<String> {
        strings(&[
            "sku", "lang", "name", "image", "gallery", "cats", "color", "material",
        ])
    }

    fn context() -> ImportContext {
        ImportContext::new(
            LanguageCode::new("it"),
            headers(),
            ColumnMapping::new()
                .with("set_sku", "sku")
                .with("language_code", "lang")
                .with("set_name", "name")
                .with("set_image_id", "image")
                .with("set_gallery_image_ids", "gallery")
                .with("set_category_ids", "cats")
                .with("color", "color")
                .with("custom_material", "material"),
        )
    }

    fn fields() -> FieldCatalog {
        FieldCatalog::standard(
            &[AttributeDefinition {
                name: "color".to_string(),
                label: None,
            }],
            &[CustomFieldDefinition {
                name: "material".to_string(),
                label: None,
            }],
        )
    }

    fn classification(sku: &str, language: &str, original: Option<ProductId>) -> RowClassification {
        RowClassification {
            language: LanguageCode::new(language),
            sku: sku.to_string(),
            is_translation: original.is_some(),
            original_product_id: original,
            semantic_original_sku: None,
        }
    }

    #[tokio::test]
    async fn test_builds_every_handler() {
        let f = fixture(TermFailurePolicy::OmitField);
        let row = strings(&[
            "P1",
            "it",
            " Sedia ",
            "https://cdn.example/chair.jpg",
            "https://cdn.example/chair-side.jpg, https://cdn.example/missing.jpg",
            "Sedie, Legno",
            "Rosso|Blu",
            "rovere|| noce",
        ]);

        let built = f
            .builder
            .build(&row, &context(), &fields(), &classification("P1", "it", None), false)
            .await
            .unwrap();
        let draft = built.draft;

        assert!(built.omitted_fields.is_empty());
        assert_eq!(draft.sku, "P1");
        assert_eq!(draft.scalar(ScalarField::Name), Some("Sedia"));
        assert_eq!(draft.image_id, Some(AttachmentId(11)));
        assert_eq!(draft.gallery_image_ids, vec![AttachmentId(12)]);
        assert_eq!(draft.category_ids.len(), 2);
        assert_eq!(f.terms.term_count(PRODUCT_CATEGORY_TAXONOMY), 2);
        assert_eq!(draft.attribute("pa_color").map(|a| a.term_ids.len()), Some(2));
        assert_eq!(
            draft.custom_fields.get("material"),
            Some(&CustomFieldValue::List(vec![
                "rovere".to_string(),
                "noce".to_string()
            ]))
        );
    }

    #[tokio::test]
    async fn test_unmapped_and_empty_fields_are_skipped() {
        let f = fixture(TermFailurePolicy::OmitField);
        let mut ctx = context();
        ctx.column_mapping.unassign("set_name");
        let row = strings(&["P1", "it", "Sedia", "", "", "", " | ", ""]);

        let built = f
            .builder
            .build(&row, &ctx, &fields(), &classification("P1", "it", None), false)
            .await
            .unwrap();

        assert_eq!(built.draft.name(), "");
        assert!(built.draft.attributes.is_empty());
        assert!(built.draft.category_ids.is_empty());
        assert!(built.draft.custom_fields.is_empty());
        assert_eq!(built.draft.image_id, None);
    }

    #[tokio::test]
    async fn test_translation_links_attributes_by_position() {
        let f = fixture(TermFailurePolicy::OmitField);
        let ctx = context();

        let original = f
            .builder
            .build(
                &strings(&["P1", "it", "Sedia", "", "", "", "Rosso|Blu|Verde", ""]),
                &ctx,
                &fields(),
                &classification("P1", "it", None),
                false,
            )
            .await
            .unwrap();
        let original_id = f.catalog.create_product(&original.draft).await.unwrap();
        let original_terms = original.draft.attribute("pa_color").unwrap().term_ids.clone();

        // Fewer values than the original: third original term stays unlinked
        let translated = f
            .builder
            .build(
                &strings(&["P1", "en", "Chair", "", "", "", "Red||", ""]),
                &ctx,
                &fields(),
                &classification("P1-en", "en", Some(original_id)),
                false,
            )
            .await
            .unwrap();

        let translated_terms = &translated.draft.attribute("pa_color").unwrap().term_ids;
        assert_eq!(translated_terms.len(), 1);
        assert_ne!(translated_terms[0], original_terms[0]);
        assert_eq!(f.terms.term_count("pa_color"), 4);

        // Gap at position 0 keeps "Green" aligned with the third term
        let gapped = f
            .builder
            .build(
                &strings(&["P1", "en", "Chair", "", "", "", "|Blue|Green|Extra", ""]),
                &ctx,
                &fields(),
                &classification("P1-en", "en", Some(original_id)),
                false,
            )
            .await
            .unwrap();
        assert_eq!(gapped.draft.attribute("pa_color").unwrap().term_ids.len(), 2);
        assert_eq!(f.terms.term_count("pa_color"), 6);
    }

    #[tokio::test]
    async fn test_term_failure_omits_field_by_default() {
        let f = fixture(TermFailurePolicy::OmitField);
        let too_long = "x".repeat(201);
        let colors = format!("Rosso|{}", too_long);
        let row = strings(&["P1", "it", "Sedia", "", "", "Sedie", &colors, ""]);

        let built = f
            .builder
            .build(&row, &context(), &fields(), &classification("P1", "it", None), false)
            .await
            .unwrap();

        assert!(built.draft.attribute("pa_color").is_none());
        assert_eq!(built.draft.category_ids.len(), 1);
        assert_eq!(built.omitted_fields.len(), 1);
        assert_eq!(built.omitted_fields[0].field_key, "color");
    }

    #[tokio::test]
    async fn test_term_failure_can_abort_row() {
        let f = fixture(TermFailurePolicy::AbortRow);
        let too_long = "x".repeat(201);
        let row = strings(&["P1", "it", "Sedia", "", "", &too_long, "", ""]);

        let result = f
            .builder
            .build(&row, &context(), &fields(), &classification("P1", "it", None), false)
            .await;

        assert!(matches!(
            result,
            Err(ImportError::TermCreationFailed { ref taxonomy, .. }) if taxonomy == "product_cat"
        ));
    }
}
