pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::{ImportCommand, ImportService, ImportSession};
pub use domain::{FieldCatalog, ImportCoordinator};
pub use infrastructure::CsvSource;

// Re-export common types for shorter imports
pub use domain::services::import_components::types::{
    ColumnMapping, CsvTable, FieldSpec, FieldType, ImportContext, ImportError, ImportReport,
    MessageKind, RowOutcome,
};
pub use domain::services::import_components::{
    AttributeDefinition, CustomFieldDefinition, ImportCollaborators, ImportOptions,
};
