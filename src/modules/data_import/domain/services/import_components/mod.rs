pub mod draft_builder;
pub mod field_catalog;
pub mod field_mapping;
pub mod import_coordinator;
pub mod slug_normalizer;
pub mod term_reconciler;
pub mod translation_linker;
pub mod types;
pub mod value_transformer;

// Re-export main types for public API
pub use draft_builder::{BuiltDraft, DraftBuilder};
pub use field_catalog::{
    AttributeDefinition, CustomFieldDefinition, FieldCatalog, FieldHandler, ProductField,
    RegisteredField,
};
pub use field_mapping::FieldMappingResolver;
pub use import_coordinator::{ImportCollaborators, ImportCoordinator, ImportOptions};
pub use slug_normalizer::SlugNormalizer;
pub use term_reconciler::{TermReconciler, TermResolutionContext};
pub use translation_linker::TranslationLinker;
pub use types::*;
pub use value_transformer::ValueTransformer;
