mod catalog_repository;
mod custom_field_repository;
mod media_repository;
mod taxonomy_repository;
mod translation_registry;

pub use catalog_repository::CatalogRepository;
pub use custom_field_repository::CustomFieldRepository;
pub use media_repository::MediaRepository;
pub use taxonomy_repository::TaxonomyRepository;
pub use translation_registry::{TranslationRecord, TranslationRegistry};

#[cfg(test)]
pub use taxonomy_repository::MockTaxonomyRepository;
