mod utils;

use async_trait::async_trait;
use catalog_importer_lib::modules::catalog::{
    CatalogRepository, ElementType, InMemoryCatalogRepository, InMemoryCustomFieldRepository,
    InMemoryMediaRepository, InMemoryTaxonomyRepository, InMemoryTranslationRegistry,
    LanguageCode, ProductAttribute, ProductDraft, ProductId, TaxonomyRepository,
    TranslationRecord, TranslationRegistry,
};
use catalog_importer_lib::modules::data_import::domain::services::import_components::TranslationLinker;
use catalog_importer_lib::modules::data_import::{
    ImportCollaborators, ImportCommand, ImportContext, ImportError, ImportOptions, ImportService,
    RowOutcome,
};
use catalog_importer_lib::shared::application::UseCase;
use catalog_importer_lib::shared::errors::{AppError, AppResult};
use mockall::mock;
use std::sync::Arc;
use utils::factories::{headers, standard_mapping, standard_session, table, ProductRowFactory};
use utils::helpers::build_test_services;

mock! {
    pub Catalog {}

    #[async_trait]
    impl CatalogRepository for Catalog {
        async fn find_product_id_by_sku(&self, sku: &str) -> AppResult<Option<ProductId>>;
        async fn create_product(&self, draft: &ProductDraft) -> AppResult<ProductId>;
        async fn get_product_attributes(&self, id: ProductId) -> AppResult<Vec<ProductAttribute>>;
    }
}

fn context() -> ImportContext {
    ImportContext::new(LanguageCode::new("it"), headers(), standard_mapping())
}

async fn seed_product(
    catalog: &InMemoryCatalogRepository,
    registry: &InMemoryTranslationRegistry,
    sku: &str,
    language: &str,
) -> ProductId {
    let id = catalog
        .create_product(&ProductDraft::new(sku, LanguageCode::new(language)))
        .await
        .unwrap();
    registry
        .register_translation(&TranslationRecord {
            element_id: id.value(),
            element_type: ElementType::Product,
            group_id: None,
            language: LanguageCode::new(language),
            source_language: None,
        })
        .await
        .unwrap();
    id
}

#[tokio::test]
async fn test_reused_sku_gets_language_suffix() {
    let catalog = Arc::new(InMemoryCatalogRepository::new());
    let registry = Arc::new(InMemoryTranslationRegistry::new("it"));
    seed_product(&catalog, &registry, "X", "en").await;
    let linker = TranslationLinker::new(catalog.clone(), registry.clone());

    let row = ProductRowFactory::new()
        .sku("X")
        .language("IT")
        .translation_of("X")
        .build();
    let classification = linker.classify_row(&row, &context(), false).await.unwrap();

    assert_eq!(classification.sku, "X-it");
    assert_eq!(classification.language, LanguageCode::new("it"));
    assert_eq!(classification.semantic_original_sku.as_deref(), Some("X"));
}

#[tokio::test]
async fn test_imported_collision_is_saved_under_suffixed_sku() {
    let services = build_test_services(ImportOptions::default());
    seed_product(&services.catalog, &services.registry, "X", "en").await;

    let rows = vec![ProductRowFactory::new()
        .sku("X")
        .language("it")
        .translation_of("X")
        .name("Sedia")
        .build()];
    let report = services.import(table(rows), standard_session()).await;

    assert_eq!(report.successful, 1);
    match &report.rows[0] {
        RowOutcome::Imported { sku, is_translation, .. } => {
            assert_eq!(sku, "X-it");
            assert!(is_translation);
        }
        other => panic!("expected an imported row, got {:?}", other),
    }
    assert_eq!(services.catalog.products_with_sku("X-it").len(), 1);
    assert_eq!(services.catalog.products_with_sku("X").len(), 1);
}

#[tokio::test]
async fn test_translation_without_original_fails() {
    let services = build_test_services(ImportOptions::default());
    let rows = vec![ProductRowFactory::new()
        .sku("P9-en")
        .language("en")
        .translation_of("P9")
        .build()];

    let report = services.import(table(rows), standard_session()).await;

    assert_eq!(report.failed, 1);
    assert!(matches!(
        &report.rows[0],
        RowOutcome::Failed {
            error: ImportError::OriginalProductNotFound { sku },
            ..
        } if sku == "P9"
    ));
}

#[tokio::test]
async fn test_product_translation_records_default_source_language() {
    let services = build_test_services(ImportOptions::default());
    let rows = vec![
        ProductRowFactory::new().sku("P1").build(),
        ProductRowFactory::new()
            .sku("P1-fr")
            .language("fr")
            .translation_of("P1")
            .build(),
    ];

    services.import(table(rows), standard_session()).await;

    let (original_id, _) = services.product("P1").unwrap();
    let (translated_id, _) = services.product("P1-fr").unwrap();
    assert_eq!(
        services
            .registry
            .source_language_of(original_id.value(), &ElementType::Product),
        None
    );
    assert_eq!(
        services
            .registry
            .source_language_of(translated_id.value(), &ElementType::Product),
        Some(LanguageCode::new("it"))
    );
    assert_eq!(
        services
            .registry
            .translation_of(original_id.value(), &ElementType::Product, &LanguageCode::new("fr"))
            .await
            .unwrap(),
        Some(translated_id.value())
    );
}

#[tokio::test]
async fn test_store_failure_fails_only_that_row() {
    let mut catalog = MockCatalog::new();
    catalog.expect_find_product_id_by_sku().returning(|_| Ok(None));
    catalog.expect_get_product_attributes().returning(|_| Ok(Vec::new()));
    catalog
        .expect_create_product()
        .returning(|draft| match draft.sku.as_str() {
            "BROKEN" => Err(AppError::StorageError("disk full".to_string())),
            _ => Ok(ProductId(draft.sku.len() as u64)),
        });

    let collaborators = ImportCollaborators {
        catalog: Arc::new(catalog),
        taxonomy: Arc::new(InMemoryTaxonomyRepository::new()),
        registry: Arc::new(InMemoryTranslationRegistry::new("it")),
        custom_fields: Arc::new(InMemoryCustomFieldRepository::new()),
        media: Arc::new(InMemoryMediaRepository::new()),
    };
    let service = ImportService::new(collaborators, ImportOptions::default());

    let rows = vec![
        ProductRowFactory::new().sku("A1").build(),
        ProductRowFactory::new().sku("BROKEN").build(),
        ProductRowFactory::new().sku("C333").build(),
    ];
    let report = service
        .execute(ImportCommand {
            table: table(rows),
            session: standard_session(),
        })
        .await
        .unwrap();

    assert_eq!(report.successful, 2);
    assert_eq!(report.failed, 1);
    assert!(matches!(
        &report.rows[1],
        RowOutcome::Failed {
            error: ImportError::Collaborator(AppError::StorageError(_)),
            ..
        }
    ));
}

#[tokio::test]
async fn test_repeated_translation_row_leaves_nothing_behind() {
    let services = build_test_services(ImportOptions::default());
    let rows = vec![
        ProductRowFactory::new().sku("P1").colors("Rosso").build(),
        ProductRowFactory::new()
            .sku("P1")
            .language("en")
            .translation_of("P1")
            .colors("Red")
            .build(),
        ProductRowFactory::new()
            .sku("P1")
            .language("en")
            .translation_of("P1")
            .colors("Crimson")
            .build(),
    ];

    let report = services.import(table(rows), standard_session()).await;

    assert_eq!(report.successful, 2);
    assert_eq!(report.failed, 1);
    assert!(matches!(
        &report.rows[2],
        RowOutcome::Failed {
            error: ImportError::TranslationExists { sku, language },
            ..
        } if sku == "P1" && language.as_str() == "en"
    ));
    assert_eq!(services.catalog.product_count(), 2);
    assert_eq!(services.catalog.products_with_sku("P1-en").len(), 1);

    // The rejected row must not rename the existing English term
    assert_eq!(services.taxonomy.term_count("pa_color"), 2);
    let (_, translated) = services.product("P1-en").unwrap();
    let term_id = translated.attribute("pa_color").unwrap().term_ids[0];
    let term = services.taxonomy.get_term(term_id, "pa_color").await.unwrap().unwrap();
    assert_eq!(term.name, "Red");
}

#[tokio::test]
async fn test_translation_in_original_language_is_rejected() {
    let services = build_test_services(ImportOptions::default());
    let rows = vec![
        ProductRowFactory::new().sku("P1").colors("Rosso").build(),
        ProductRowFactory::new()
            .sku("P1-bis")
            .language("it")
            .translation_of("P1")
            .colors("Rosso scuro")
            .build(),
    ];

    let report = services.import(table(rows), standard_session()).await;

    assert_eq!(report.successful, 1);
    assert!(matches!(
        &report.rows[1],
        RowOutcome::Failed {
            error: ImportError::TranslationExists { .. },
            ..
        }
    ));
    assert_eq!(services.catalog.product_count(), 1);

    let (_, original) = services.product("P1").unwrap();
    let term_id = original.attribute("pa_color").unwrap().term_ids[0];
    let term = services.taxonomy.get_term(term_id, "pa_color").await.unwrap().unwrap();
    assert_eq!(term.name, "Rosso");
    assert_eq!(services.taxonomy.term_count("pa_color"), 1);
}

#[tokio::test]
async fn test_translation_of_unregistered_original_joins_its_group() {
    let services = build_test_services(ImportOptions::default());
    let original_id = services
        .catalog
        .create_product(&ProductDraft::new("P1", LanguageCode::new("it")))
        .await
        .unwrap();

    let rows = vec![ProductRowFactory::new()
        .sku("P1")
        .language("en")
        .translation_of("P1")
        .build()];
    let report = services.import(table(rows), standard_session()).await;
    assert_eq!(report.successful, 1);

    let (translated_id, translated) = services.product("P1-en").unwrap();
    let original_group = services
        .registry
        .group_id_of(original_id.value(), &ElementType::Product)
        .await
        .unwrap();
    let translated_group = services
        .registry
        .group_id_of(translated_id.value(), &ElementType::Product)
        .await
        .unwrap();

    assert!(original_group.is_some());
    assert_eq!(original_group, translated_group);
    assert_eq!(translated.translation_group_id, original_group);
    assert_eq!(
        services
            .registry
            .language_of(original_id.value(), &ElementType::Product)
            .await
            .unwrap(),
        Some(LanguageCode::new("it"))
    );
}
