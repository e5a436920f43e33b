pub mod persistence;

// Re-exports for convenience
pub use persistence::{
    InMemoryCatalogRepository, InMemoryCustomFieldRepository, InMemoryMediaRepository,
    InMemoryTaxonomyRepository, InMemoryTranslationRegistry,
};
