use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::log_info;
use crate::modules::catalog::{
    InMemoryCatalogRepository, InMemoryCustomFieldRepository, InMemoryMediaRepository,
    InMemoryTaxonomyRepository, InMemoryTranslationRegistry,
};
use crate::shared::application::UseCase;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::ImportConfig;

use super::super::domain::services::import_components::{
    AttributeDefinition, ColumnMapping, CsvTable, CustomFieldDefinition, FieldCatalog,
    ImportCollaborators, ImportContext, ImportCoordinator, ImportOptions, ImportReport,
};

/// State carried over from the column-mapping step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSession {
    pub column_mapping: ColumnMapping,
    #[serde(default)]
    pub attributes: Vec<AttributeDefinition>,
    #[serde(default)]
    pub custom_fields: Vec<CustomFieldDefinition>,
}

impl ImportSession {
    pub fn from_json(content: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::IoError(format!("Failed to read session {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Field catalog offered by this session
    pub fn field_catalog(&self) -> FieldCatalog {
        FieldCatalog::standard(&self.attributes, &self.custom_fields)
    }
}

/// Parsed spreadsheet plus the session that maps it
#[derive(Debug, Clone)]
pub struct ImportCommand {
    pub table: CsvTable,
    pub session: ImportSession,
}

/// Import service - wires the catalog collaborators into a coordinator
#[derive(Clone)]
pub struct ImportService {
    collaborators: ImportCollaborators,
    options: ImportOptions,
}

impl ImportService {
    pub fn new(collaborators: ImportCollaborators, options: ImportOptions) -> Self {
        Self {
            collaborators,
            options,
        }
    }

    /// Service over empty in-memory stores, for dry runs
    pub fn in_memory(config: &ImportConfig) -> Self {
        let collaborators = ImportCollaborators {
            catalog: Arc::new(InMemoryCatalogRepository::new()),
            taxonomy: Arc::new(InMemoryTaxonomyRepository::new()),
            registry: Arc::new(InMemoryTranslationRegistry::new(&config.default_language)),
            custom_fields: Arc::new(InMemoryCustomFieldRepository::new()),
            media: Arc::new(InMemoryMediaRepository::new()),
        };
        Self::new(collaborators, ImportOptions::from(config))
    }

    pub fn options(&self) -> ImportOptions {
        self.options
    }
}

#[async_trait]
impl UseCase<ImportCommand, ImportReport> for ImportService {
    async fn execute(&self, command: ImportCommand) -> AppResult<ImportReport> {
        let ImportCommand { table, session } = command;
        let default_language = self.collaborators.registry.default_language().await?;

        let fields = session.field_catalog();
        let context = ImportContext::new(default_language, table.headers, session.column_mapping);

        log_info!(
            "Importing {} rows with {} mapped columns",
            table.rows.len(),
            context.column_mapping.len()
        );

        let coordinator = ImportCoordinator::new(self.collaborators.clone(), self.options);
        let mut report = coordinator.run(&table.rows, &context, &fields).await;
        report.prepend_notes(fields.warnings());
        Ok(report)
    }
}
