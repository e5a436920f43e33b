pub mod service;

pub use service::{ImportCommand, ImportService, ImportSession};
