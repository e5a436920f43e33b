use crate::log_info;
use crate::shared::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_LANGUAGE: &str = "it";

/// What happens to a row when a taxonomy term cannot be created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermFailurePolicy {
    /// Drop the affected attribute/category field, keep importing the row
    #[default]
    OmitField,
    /// Fail the whole row
    AbortRow,
}

impl FromStr for TermFailurePolicy {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "omit" | "omit_field" => Ok(Self::OmitField),
            "abort" | "abort_row" => Ok(Self::AbortRow),
            other => Err(AppError::InvalidInput(format!(
                "Unknown term failure policy '{}', expected 'omit' or 'abort'",
                other
            ))),
        }
    }
}

/// How a non-translation row whose SKU already exists is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateSkuPolicy {
    /// Create another product with the same SKU
    #[default]
    Allow,
    /// Fail the row
    Reject,
}

impl FromStr for DuplicateSkuPolicy {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "allow" => Ok(Self::Allow),
            "reject" => Ok(Self::Reject),
            other => Err(AppError::InvalidInput(format!(
                "Unknown duplicate SKU policy '{}', expected 'allow' or 'reject'",
                other
            ))),
        }
    }
}

/// Dialect of the uploaded CSV file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvOptions {
    pub delimiter: u8,
    pub quote: u8,
    pub escape: Option<u8>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            escape: Some(b'\\'),
        }
    }
}

/// Import run configuration, read from the environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportConfig {
    pub csv_path: Option<PathBuf>,
    pub session_path: Option<PathBuf>,
    pub default_language: String,
    pub csv: CsvOptions,
    pub term_failure_policy: TermFailurePolicy,
    pub duplicate_sku_policy: DuplicateSkuPolicy,
    pub strict_row_length: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            csv_path: None,
            session_path: None,
            default_language: DEFAULT_LANGUAGE.to_string(),
            csv: CsvOptions::default(),
            term_failure_policy: TermFailurePolicy::default(),
            duplicate_sku_policy: DuplicateSkuPolicy::default(),
            strict_row_length: false,
        }
    }
}

impl ImportConfig {
    /// Load configuration from process environment (and `.env` if present)
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let csv = CsvOptions {
            delimiter: match read("IMPORT_CSV_DELIMITER") {
                Some(value) => parse_byte("IMPORT_CSV_DELIMITER", &value)?,
                None => defaults.csv.delimiter,
            },
            quote: match read("IMPORT_CSV_QUOTE") {
                Some(value) => parse_byte("IMPORT_CSV_QUOTE", &value)?,
                None => defaults.csv.quote,
            },
            escape: match read("IMPORT_CSV_ESCAPE") {
                Some(value) if value.eq_ignore_ascii_case("none") => None,
                Some(value) => Some(parse_byte("IMPORT_CSV_ESCAPE", &value)?),
                None => defaults.csv.escape,
            },
        };

        let config = Self {
            csv_path: read("IMPORT_CSV_PATH").map(PathBuf::from),
            session_path: read("IMPORT_SESSION_PATH").map(PathBuf::from),
            default_language: read("IMPORT_DEFAULT_LANGUAGE")
                .map(|value| value.trim().to_lowercase())
                .unwrap_or(defaults.default_language),
            csv,
            term_failure_policy: match read("IMPORT_TERM_FAILURE_POLICY") {
                Some(value) => value.parse()?,
                None => defaults.term_failure_policy,
            },
            duplicate_sku_policy: match read("IMPORT_DUPLICATE_SKU_POLICY") {
                Some(value) => value.parse()?,
                None => defaults.duplicate_sku_policy,
            },
            strict_row_length: match read("IMPORT_STRICT_ROWS") {
                Some(value) => parse_bool("IMPORT_STRICT_ROWS", &value)?,
                None => defaults.strict_row_length,
            },
        };

        log_info!(
            "Import configuration loaded: default language '{}', term failures {:?}, duplicate SKUs {:?}",
            config.default_language,
            config.term_failure_policy,
            config.duplicate_sku_policy
        );

        Ok(config)
    }
}

fn parse_byte(name: &str, value: &str) -> AppResult<u8> {
    match value {
        "\\t" | "tab" => return Ok(b'\t'),
        _ => {}
    }

    let mut bytes = value.bytes();
    match (bytes.next(), bytes.next()) {
        (Some(byte), None) if byte.is_ascii() => Ok(byte),
        _ => Err(AppError::InvalidInput(format!(
            "{} must be a single ASCII character, got '{}'",
            name, value
        ))),
    }
}

fn parse_bool(name: &str, value: &str) -> AppResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::InvalidInput(format!(
            "{} must be a boolean, got '{}'",
            name, other
        ))),
    }
}
