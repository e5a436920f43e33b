pub mod services;

// Re-exports for easy access
pub use services::import_components::{
    DraftBuilder, FieldCatalog, FieldMappingResolver, ImportCoordinator, TermReconciler,
    TranslationLinker, ValueTransformer,
};
