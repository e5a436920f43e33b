//! In-memory adapters for the catalog collaborators
//!
//! Used by the command-line runner (dry runs against an empty catalog)
//! and by the test suites.
mod in_memory_catalog;
mod in_memory_custom_fields;
mod in_memory_media;
mod in_memory_taxonomy;
mod in_memory_translation_registry;

pub use in_memory_catalog::InMemoryCatalogRepository;
pub use in_memory_custom_fields::InMemoryCustomFieldRepository;
pub use in_memory_media::InMemoryMediaRepository;
pub use in_memory_taxonomy::InMemoryTaxonomyRepository;
pub use in_memory_translation_registry::InMemoryTranslationRegistry;
