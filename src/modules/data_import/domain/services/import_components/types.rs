use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use crate::modules::catalog::{LanguageCode, ProductId};
use crate::shared::errors::AppError;

/// Declared kind of an importable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    List,
    Attribute,
    Custom,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::Text => "text",
            FieldType::List => "list",
            FieldType::Attribute => "attribute",
            FieldType::Custom => "custom",
        };
        write!(f, "{}", name)
    }
}

/// An importable field as offered to the column-mapping step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub key: String,
    pub field_type: FieldType,
    pub label: String,
}

impl FieldSpec {
    pub fn new(key: &str, field_type: FieldType, label: &str) -> Self {
        Self {
            key: key.to_string(),
            field_type,
            label: label.to_string(),
        }
    }
}

/// Field key -> selected header name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping(HashMap<String, String>);

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field_key: &str, header: &str) -> Self {
        self.assign(field_key, header);
        self
    }

    pub fn assign(&mut self, field_key: &str, header: &str) {
        self.0.insert(field_key.to_string(), header.to_string());
    }

    pub fn unassign(&mut self, field_key: &str) {
        self.0.remove(field_key);
    }

    /// Header assigned to the field; blank assignments count as unassigned
    pub fn header_for(&self, field_key: &str) -> Option<&str> {
        self.0
            .get(field_key)
            .map(String::as_str)
            .filter(|header| !header.is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, String>> for ColumnMapping {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

/// Header row and data rows as produced by the CSV reader
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Per-run state, read-only while rows are processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportContext {
    pub default_language: LanguageCode,
    pub headers: Vec<String>,
    pub column_mapping: ColumnMapping,
}

impl ImportContext {
    pub fn new(default_language: LanguageCode, headers: Vec<String>, column_mapping: ColumnMapping) -> Self {
        Self {
            default_language,
            headers,
            column_mapping,
        }
    }
}

/// Where a field's value lives in a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnResolution {
    Mapped(usize),
    NotMapped,
}

/// Cell value converted according to its field type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedValue {
    Text(String),
    /// Comma-separated list
    List(Vec<String>),
    /// Pipe-separated, position-significant pieces
    Pieces(Vec<String>),
}

impl TypedValue {
    pub fn is_empty(&self) -> bool {
        match self {
            TypedValue::Text(text) => text.is_empty(),
            TypedValue::List(items) | TypedValue::Pieces(items) => items.is_empty(),
        }
    }

    /// Every value as a sequence; text becomes a single element
    pub fn into_items(self) -> Vec<String> {
        match self {
            TypedValue::Text(text) if text.is_empty() => Vec::new(),
            TypedValue::Text(text) => vec![text],
            TypedValue::List(items) | TypedValue::Pieces(items) => items,
        }
    }
}

/// Row- and field-level import failures
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ImportError {
    #[error("Required column not found: {field}")]
    MissingRequiredColumn { field: String },

    #[error("Required value is empty: {field}")]
    EmptyRequiredValue { field: String },

    #[error("Original product with SKU {sku} not found")]
    OriginalProductNotFound { sku: String },

    #[error("Could not create term '{term}' in {taxonomy}: {reason}")]
    TermCreationFailed {
        taxonomy: String,
        term: String,
        reason: String,
    },

    #[error("Row has {length} cells, column {column} is out of range")]
    RowTooShort { column: usize, length: usize },

    #[error("A product with SKU {sku} already exists")]
    DuplicateSku { sku: String },

    #[error("Product {sku} already has a [{language}] translation")]
    TranslationExists { sku: String, language: LanguageCode },

    #[error("{0}")]
    Collaborator(#[from] AppError),
}

/// How the linker classified a row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowClassification {
    pub language: LanguageCode,
    pub sku: String,
    pub is_translation: bool,
    pub original_product_id: Option<ProductId>,
    /// SKU before language disambiguation, when it was rewritten
    pub semantic_original_sku: Option<String>,
}

/// A field dropped from an otherwise successful row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OmittedField {
    pub field_key: String,
    pub reason: String,
}

/// Result of processing a single row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowOutcome {
    Imported {
        row_number: usize,
        product_id: ProductId,
        sku: String,
        name: String,
        language: LanguageCode,
        is_translation: bool,
        omitted_fields: Vec<OmittedField>,
    },
    Failed {
        row_number: usize,
        error: ImportError,
    },
}

impl RowOutcome {
    pub fn row_number(&self) -> usize {
        match self {
            RowOutcome::Imported { row_number, .. } | RowOutcome::Failed { row_number, .. } => {
                *row_number
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RowOutcome::Imported { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Success,
    Error,
    Info,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
            MessageKind::Info => "info",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl ReportMessage {
    pub fn new(kind: MessageKind, text: String) -> Self {
        Self { kind, text }
    }
}

/// Aggregate outcome of an import run
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub successful: usize,
    pub failed: usize,
    pub messages: Vec<ReportMessage>,
    pub rows: Vec<RowOutcome>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl ImportReport {
    pub fn new() -> Self {
        Self {
            successful: 0,
            failed: 0,
            messages: Vec::new(),
            rows: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Record a row outcome along with its human-readable messages
    pub fn record(&mut self, outcome: RowOutcome) {
        match &outcome {
            RowOutcome::Imported {
                row_number,
                sku,
                name,
                language,
                omitted_fields,
                ..
            } => {
                self.successful += 1;
                self.messages.push(ReportMessage::new(
                    MessageKind::Success,
                    format!(
                        "Successfully created product: {} (Language: {}, SKU: {})",
                        name, language, sku
                    ),
                ));
                for omitted in omitted_fields {
                    self.messages.push(ReportMessage::new(
                        MessageKind::Info,
                        format!(
                            "Row {}: field '{}' omitted ({})",
                            row_number, omitted.field_key, omitted.reason
                        ),
                    ));
                }
            }
            RowOutcome::Failed { row_number, error } => {
                self.failed += 1;
                self.messages.push(ReportMessage::new(
                    MessageKind::Error,
                    format!("Failed to create product (row {}): {}", row_number, error),
                ));
            }
        }
        self.rows.push(outcome);
    }

    /// Put configuration notes ahead of the per-row messages
    pub fn prepend_notes(&mut self, notes: &[String]) {
        let notes = notes
            .iter()
            .map(|note| ReportMessage::new(MessageKind::Info, note.clone()));
        self.messages.splice(0..0, notes);
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn summary_line(&self) -> String {
        format!(
            "Import completed: {} successful, {} failed",
            self.successful, self.failed
        )
    }

    /// Summary first, then one line per message
    pub fn render_text(&self) -> String {
        let mut lines = vec![format!("[{}] {}", MessageKind::Info, self.summary_line())];
        lines.extend(
            self.messages
                .iter()
                .map(|message| format!("[{}] {}", message.kind, message.text)),
        );
        lines.join("\n")
    }
}

impl Default for ImportReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_mapping_ignores_blank_assignment() {
        let mapping = ColumnMapping::new().with("set_name", "Title").with("set_weight", "");
        assert_eq!(mapping.header_for("set_name"), Some("Title"));
        assert_eq!(mapping.header_for("set_weight"), None);
        assert_eq!(mapping.header_for("set_sku"), None);
    }

    #[test]
    fn test_report_counts_and_render() {
        let mut report = ImportReport::new();
        report.record(RowOutcome::Imported {
            row_number: 1,
            product_id: ProductId(10),
            sku: "P1".to_string(),
            name: "Sedia".to_string(),
            language: LanguageCode::new("it"),
            is_translation: false,
            omitted_fields: vec![OmittedField {
                field_key: "color".to_string(),
                reason: "term rejected".to_string(),
            }],
        });
        report.record(RowOutcome::Failed {
            row_number: 2,
            error: ImportError::OriginalProductNotFound {
                sku: "P9".to_string(),
            },
        });
        report.finish();

        assert_eq!(report.successful, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.messages.len(), 3);
        assert!(report.finished_at.is_some());

        let text = report.render_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "[info] Import completed: 1 successful, 1 failed");
        assert_eq!(
            lines[1],
            "[success] Successfully created product: Sedia (Language: it, SKU: P1)"
        );
        assert_eq!(lines[2], "[info] Row 1: field 'color' omitted (term rejected)");
        assert_eq!(
            lines[3],
            "[error] Failed to create product (row 2): Original product with SKU P9 not found"
        );
    }

    #[test]
    fn test_notes_come_before_row_messages() {
        let mut report = ImportReport::new();
        report.record(RowOutcome::Failed {
            row_number: 1,
            error: ImportError::MissingRequiredColumn {
                field: "set_sku".to_string(),
            },
        });
        report.prepend_notes(&["Unknown product field 'set_colour' ignored".to_string()]);

        assert_eq!(report.messages[0].kind, MessageKind::Info);
        assert_eq!(report.messages[1].kind, MessageKind::Error);
        assert_eq!(report.failed, 1);
    }

    #[test]
    fn test_typed_value_items() {
        assert!(TypedValue::Text(String::new()).into_items().is_empty());
        assert_eq!(
            TypedValue::Text("a".to_string()).into_items(),
            vec!["a".to_string()]
        );
        assert!(TypedValue::Pieces(vec![]).is_empty());
    }
}
