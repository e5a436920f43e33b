use super::types::{FieldType, TypedValue};

const LIST_SEPARATOR: char = ',';
const PIECE_SEPARATOR: char = '|';

/// Converts raw cell strings into typed values
pub struct ValueTransformer;

impl ValueTransformer {
    pub fn transform(raw: &str, field_type: FieldType) -> TypedValue {
        match field_type {
            FieldType::Text => TypedValue::Text(raw.trim().to_string()),
            FieldType::List => TypedValue::List(Self::split(raw, LIST_SEPARATOR)),
            FieldType::Attribute | FieldType::Custom => {
                TypedValue::Pieces(Self::split_positional(raw, PIECE_SEPARATOR))
            }
        }
    }

    /// Split, trim and drop empty elements, preserving order
    fn split(raw: &str, separator: char) -> Vec<String> {
        raw.split(separator)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Split and trim; interior empty pieces keep their slot so that
    /// piece `i` still lines up with term `i` of the original product
    fn split_positional(raw: &str, separator: char) -> Vec<String> {
        let mut pieces: Vec<String> = raw
            .split(separator)
            .map(|piece| piece.trim().to_string())
            .collect();
        while pieces.last().is_some_and(|piece| piece.is_empty()) {
            pieces.pop();
        }
        pieces
    }
}
