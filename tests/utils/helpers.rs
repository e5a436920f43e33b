/// Test helper functions and service builders
use catalog_importer_lib::modules::catalog::{
    InMemoryCatalogRepository, InMemoryCustomFieldRepository, InMemoryMediaRepository,
    InMemoryTaxonomyRepository, InMemoryTranslationRegistry, ProductDraft, ProductId,
};
use catalog_importer_lib::modules::data_import::{
    CsvTable, ImportCollaborators, ImportCommand, ImportOptions, ImportReport, ImportService,
    ImportSession,
};
use catalog_importer_lib::shared::application::UseCase;
use std::sync::Arc;

pub const DEFAULT_LANGUAGE: &str = "it";

pub struct TestServices {
    pub catalog: Arc<InMemoryCatalogRepository>,
    pub taxonomy: Arc<InMemoryTaxonomyRepository>,
    pub registry: Arc<InMemoryTranslationRegistry>,
    pub custom_fields: Arc<InMemoryCustomFieldRepository>,
    pub media: Arc<InMemoryMediaRepository>,
    pub service: ImportService,
}

/// Build an import service over fresh in-memory stores
pub fn build_test_services(options: ImportOptions) -> TestServices {
    build_test_services_with_media(options, InMemoryMediaRepository::new())
}

pub fn build_test_services_with_media(
    options: ImportOptions,
    media: InMemoryMediaRepository,
) -> TestServices {
    let catalog = Arc::new(InMemoryCatalogRepository::new());
    let taxonomy = Arc::new(InMemoryTaxonomyRepository::new());
    let registry = Arc::new(InMemoryTranslationRegistry::new(DEFAULT_LANGUAGE));
    let custom_fields = Arc::new(InMemoryCustomFieldRepository::new());
    let media = Arc::new(media);

    let collaborators = ImportCollaborators {
        catalog: catalog.clone(),
        taxonomy: taxonomy.clone(),
        registry: registry.clone(),
        custom_fields: custom_fields.clone(),
        media: media.clone(),
    };

    TestServices {
        catalog,
        taxonomy,
        registry,
        custom_fields,
        media,
        service: ImportService::new(collaborators, options),
    }
}

impl TestServices {
    pub async fn import(&self, table: CsvTable, session: ImportSession) -> ImportReport {
        self.service
            .execute(ImportCommand { table, session })
            .await
            .expect("import run should produce a report")
    }

    /// Oldest product stored under `sku`
    pub fn product(&self, sku: &str) -> Option<(ProductId, ProductDraft)> {
        let id = self.catalog.products_with_sku(sku).into_iter().next()?;
        self.catalog.product(id).map(|draft| (id, draft))
    }
}
