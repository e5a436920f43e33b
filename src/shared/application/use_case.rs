use crate::shared::errors::AppResult;
/// Base trait for all use cases
///
/// This trait provides a standard interface for command handlers
/// following the Single Responsibility Principle.
///
/// # Example
///
/// ```ignore
/// struct ImportCommand {
///     table: CsvTable,
///     session: ImportSession,
/// }
///
/// #[async_trait]
/// impl UseCase<ImportCommand, ImportReport> for ImportService {
///     async fn execute(&self, command: ImportCommand) -> AppResult<ImportReport> {
///         // Use case logic here
///     }
/// }
/// ```
use async_trait::async_trait;

/// Base trait for use cases (command handlers)
#[async_trait]
pub trait UseCase<TCommand, TResult> {
    /// Execute the use case with the given command
    async fn execute(&self, command: TCommand) -> AppResult<TResult>;
}
