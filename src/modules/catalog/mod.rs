pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use domain::entities::{
    CustomFieldValue, NewTerm, ProductAttribute, ProductDraft, ScalarField, Term,
};
pub use domain::repositories::{
    CatalogRepository, CustomFieldRepository, MediaRepository, TaxonomyRepository,
    TranslationRecord, TranslationRegistry,
};
pub use domain::value_objects::{
    AttachmentId, ElementType, LanguageCode, ProductId, TermId, TranslationGroupId,
    PRODUCT_CATEGORY_TAXONOMY,
};
pub use infrastructure::{
    InMemoryCatalogRepository, InMemoryCustomFieldRepository, InMemoryMediaRepository,
    InMemoryTaxonomyRepository, InMemoryTranslationRegistry,
};
