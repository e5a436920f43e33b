use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::log_info;
use crate::modules::data_import::domain::services::import_components::types::CsvTable;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::CsvOptions;

/// Reads an uploaded spreadsheet export into a header row and data rows
///
/// Rows may have different lengths; short rows are handled by the field
/// resolver, not rejected here.
#[derive(Debug, Clone)]
pub struct CsvSource {
    delimiter: u8,
    quote: u8,
    escape: Option<u8>,
    skip_blank_rows: bool,
}

impl Default for CsvSource {
    fn default() -> Self {
        Self::from_options(&CsvOptions::default())
    }
}

impl CsvSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(options: &CsvOptions) -> Self {
        Self {
            delimiter: options.delimiter,
            quote: options.quote,
            escape: options.escape,
            skip_blank_rows: true,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    pub fn with_escape(mut self, escape: Option<u8>) -> Self {
        self.escape = escape;
        self
    }

    /// Keep rows whose cells are all empty
    pub fn keep_blank_rows(mut self) -> Self {
        self.skip_blank_rows = false;
        self
    }

    pub fn read_path(&self, path: &Path) -> AppResult<CsvTable> {
        let mut file = File::open(path).map_err(|e| {
            AppError::IoError(format!("Failed to open {}: {}", path.display(), e))
        })?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;

        // Spreadsheet exports are not always valid UTF-8
        let content = String::from_utf8_lossy(&buffer);
        let table = self.read_str(&content)?;

        log_info!(
            "Loaded {} rows with {} columns from {}",
            table.rows.len(),
            table.headers.len(),
            path.display()
        );
        Ok(table)
    }

    pub fn read_str(&self, content: &str) -> AppResult<CsvTable> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let mut builder = ReaderBuilder::new();
        builder
            .delimiter(self.delimiter)
            .quote(self.quote)
            .flexible(true)
            .has_headers(true);
        // Doubled quotes stay enabled alongside the escape character
        if let Some(escape) = self.escape.filter(|escape| *escape != self.quote) {
            builder.escape(Some(escape));
        }
        let mut reader = builder.from_reader(content.as_bytes());

        let headers = Self::record_to_cells(reader.headers()?);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let cells = Self::record_to_cells(&record);
            if self.skip_blank_rows && cells.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            rows.push(cells);
        }

        Ok(CsvTable { headers, rows })
    }

    fn record_to_cells(record: &StringRecord) -> Vec<String> {
        record.iter().map(str::to_string).collect()
    }
}
