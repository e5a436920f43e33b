use crate::log_debug;

use super::types::{ColumnMapping, ColumnResolution, ImportError};

/// Resolves mapped columns and reads cells out of rows
pub struct FieldMappingResolver;

impl FieldMappingResolver {
    /// Position of the header assigned to `field_key`
    ///
    /// Headers may repeat; the first exact match wins. A field without an
    /// assignment and a field whose header is absent both resolve to
    /// `NotMapped`.
    pub fn resolve_column(
        headers: &[String],
        mapping: &ColumnMapping,
        field_key: &str,
    ) -> ColumnResolution {
        let header = match mapping.header_for(field_key) {
            Some(header) => header,
            None => return ColumnResolution::NotMapped,
        };

        match headers.iter().position(|candidate| candidate == header) {
            Some(index) => ColumnResolution::Mapped(index),
            None => {
                log_debug!(
                    "Header '{}' assigned to '{}' is not in the file",
                    header,
                    field_key
                );
                ColumnResolution::NotMapped
            }
        }
    }

    /// Trimmed cell value; cells past the end of a short row read as empty
    pub fn extract_value(row: &[String], column_index: usize) -> String {
        match row.get(column_index) {
            Some(cell) => cell.trim().to_string(),
            None => {
                log_debug!(
                    "Row has {} cells, reading column {} as empty",
                    row.len(),
                    column_index
                );
                String::new()
            }
        }
    }

    /// Like `extract_value`, but a short row is an error
    pub fn try_extract_value(row: &[String], column_index: usize) -> Result<String, ImportError> {
        row.get(column_index)
            .map(|cell| cell.trim().to_string())
            .ok_or(ImportError::RowTooShort {
                column: column_index,
                length: row.len(),
            })
    }

    /// Read a field in one step, honouring the strict-row setting
    pub fn read_field(
        row: &[String],
        headers: &[String],
        mapping: &ColumnMapping,
        field_key: &str,
        strict: bool,
    ) -> Result<Option<String>, ImportError> {
        match Self::resolve_column(headers, mapping, field_key) {
            ColumnResolution::NotMapped => Ok(None),
            ColumnResolution::Mapped(index) if strict => {
                Self::try_extract_value(row, index).map(Some)
            }
            ColumnResolution::Mapped(index) => Ok(Some(Self::extract_value(row, index))),
        }
    }
}
