pub mod modules;
pub mod shared;

use modules::data_import::{CsvSource, ImportCommand, ImportReport, ImportService, ImportSession};
use shared::application::UseCase;
use shared::errors::{AppError, AppResult};
use shared::infrastructure::ImportConfig;
use shared::utils::init_logger;

/// Run an import configured from the environment
pub async fn run() -> AppResult<ImportReport> {
    init_logger();
    let config = ImportConfig::from_env()?;
    run_with_config(&config).await
}

/// Load the CSV file and session named by `config` and import them into
/// in-memory catalog stores
pub async fn run_with_config(config: &ImportConfig) -> AppResult<ImportReport> {
    let csv_path = config
        .csv_path
        .as_deref()
        .ok_or_else(|| AppError::ConfigError("IMPORT_CSV_PATH is not set".to_string()))?;
    let session_path = config
        .session_path
        .as_deref()
        .ok_or_else(|| AppError::ConfigError("IMPORT_SESSION_PATH is not set".to_string()))?;

    let table = CsvSource::from_options(&config.csv).read_path(csv_path)?;
    let session = ImportSession::load(session_path)?;

    let service = ImportService::in_memory(config);
    service.execute(ImportCommand { table, session }).await
}
