use std::collections::BTreeMap;
use std::sync::Arc;

use crate::modules::catalog::{
    CatalogRepository, CustomFieldRepository, CustomFieldValue, MediaRepository, ProductId,
    TaxonomyRepository, TranslationRegistry,
};
use crate::shared::infrastructure::{DuplicateSkuPolicy, ImportConfig, TermFailurePolicy};
use crate::shared::utils::{LogContext, TimedOperation};
use crate::{log_error, log_info, log_warn};

use super::draft_builder::DraftBuilder;
use super::field_catalog::FieldCatalog;
use super::term_reconciler::TermReconciler;
use super::translation_linker::TranslationLinker;
use super::types::{ImportContext, ImportError, ImportReport, RowOutcome};

/// Catalog collaborators an import run talks to
#[derive(Clone)]
pub struct ImportCollaborators {
    pub catalog: Arc<dyn CatalogRepository>,
    pub taxonomy: Arc<dyn TaxonomyRepository>,
    pub registry: Arc<dyn TranslationRegistry>,
    pub custom_fields: Arc<dyn CustomFieldRepository>,
    pub media: Arc<dyn MediaRepository>,
}

/// Per-run behaviour switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOptions {
    pub term_failure_policy: TermFailurePolicy,
    pub duplicate_sku_policy: DuplicateSkuPolicy,
    pub strict_row_length: bool,
}

impl From<&ImportConfig> for ImportOptions {
    fn from(config: &ImportConfig) -> Self {
        Self {
            term_failure_policy: config.term_failure_policy,
            duplicate_sku_policy: config.duplicate_sku_policy,
            strict_row_length: config.strict_row_length,
        }
    }
}

/// Drives the per-row pipeline and aggregates the report
///
/// Rows are processed strictly one after another: term lookup-then-create
/// is not atomic, so two rows must never race on the same term or SKU.
pub struct ImportCoordinator {
    linker: TranslationLinker,
    builder: DraftBuilder,
    catalog: Arc<dyn CatalogRepository>,
    custom_fields: Arc<dyn CustomFieldRepository>,
    options: ImportOptions,
}

impl ImportCoordinator {
    pub fn new(collaborators: ImportCollaborators, options: ImportOptions) -> Self {
        let reconciler =
            TermReconciler::new(collaborators.taxonomy.clone(), collaborators.registry.clone());
        let builder = DraftBuilder::new(
            reconciler,
            collaborators.catalog.clone(),
            collaborators.media.clone(),
        )
        .with_term_failure_policy(options.term_failure_policy);
        let linker =
            TranslationLinker::new(collaborators.catalog.clone(), collaborators.registry.clone());

        Self {
            linker,
            builder,
            catalog: collaborators.catalog,
            custom_fields: collaborators.custom_fields,
            options,
        }
    }

    pub fn options(&self) -> ImportOptions {
        self.options
    }

    /// Import every row; a failing row never stops the batch
    pub async fn run(
        &self,
        rows: &[Vec<String>],
        context: &ImportContext,
        fields: &FieldCatalog,
    ) -> ImportReport {
        let timer = TimedOperation::new("import_run");
        let total = rows.len();
        let mut report = ImportReport::new();

        log_info!(
            "Starting import of {} rows ({} fields, default language {})",
            total,
            fields.len(),
            context.default_language
        );

        for (index, row) in rows.iter().enumerate() {
            let row_number = index + 1;
            let outcome = match self.import_row(row_number, total, row, context, fields).await {
                Ok(outcome) => outcome,
                Err(error) => {
                    log_warn!("Row {} failed: {}", row_number, error);
                    RowOutcome::Failed { row_number, error }
                }
            };
            report.record(outcome);
        }

        report.finish();
        timer.finish_with_info(&report.summary_line());
        log_info!("{}", report.summary_line());
        report
    }

    async fn import_row(
        &self,
        row_number: usize,
        total: usize,
        row: &[String],
        context: &ImportContext,
        fields: &FieldCatalog,
    ) -> Result<RowOutcome, ImportError> {
        let strict = self.options.strict_row_length;
        let classification = self.linker.classify_row(row, context, strict).await?;
        LogContext::import_progress(row_number, total, &classification.sku);

        if !classification.is_translation
            && self.options.duplicate_sku_policy == DuplicateSkuPolicy::Reject
            && self.linker.find_existing(&classification.sku).await?.is_some()
        {
            return Err(ImportError::DuplicateSku {
                sku: classification.sku.clone(),
            });
        }

        let built = self
            .builder
            .build(row, context, fields, &classification, strict)
            .await?;
        let mut draft = built.draft;

        let group_id = self
            .linker
            .original_group(&classification, &context.default_language)
            .await?;
        draft.translation_group_id = group_id;

        let product_id = self.catalog.create_product(&draft).await?;
        self.linker
            .link_product(product_id, &classification, group_id, &context.default_language)
            .await?;

        self.write_custom_fields(product_id, &draft.custom_fields).await?;

        Ok(RowOutcome::Imported {
            row_number,
            product_id,
            sku: classification.sku,
            name: draft.name().to_string(),
            language: classification.language,
            is_translation: classification.is_translation,
            omitted_fields: built.omitted_fields,
        })
    }

    async fn write_custom_fields(
        &self,
        product_id: ProductId,
        custom_fields: &BTreeMap<String, CustomFieldValue>,
    ) -> Result<(), ImportError> {
        for (name, value) in custom_fields {
            if let Err(error) = self.custom_fields.set_field(name, value, product_id).await {
                log_error!(
                    "Custom field '{}' of product {} not written: {}",
                    name,
                    product_id,
                    error
                );
                return Err(error.into());
            }
        }
        Ok(())
    }
}
