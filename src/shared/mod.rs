// Shared Kernel
// Cross-cutting concerns used by every module

pub mod application; // Shared application layer patterns
pub mod errors; // Shared error types
pub mod infrastructure; // Shared infrastructure (configuration)
pub mod utils; // Shared utilities (logging)

// Re-exports for convenience
pub use errors::{AppError, AppResult};
pub use infrastructure::config::ImportConfig;
