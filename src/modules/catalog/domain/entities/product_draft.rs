use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::modules::catalog::domain::value_objects::{
    AttachmentId, LanguageCode, ProductId, TermId, TranslationGroupId,
};

/// Plain product properties written verbatim from a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarField {
    Name,
    Description,
    ShortDescription,
    Weight,
    RegularPrice,
    SalePrice,
    StockQuantity,
}

impl fmt::Display for ScalarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarField::Name => "name",
            ScalarField::Description => "description",
            ScalarField::ShortDescription => "short_description",
            ScalarField::Weight => "weight",
            ScalarField::RegularPrice => "regular_price",
            ScalarField::SalePrice => "sale_price",
            ScalarField::StockQuantity => "stock_quantity",
        };
        write!(f, "{}", name)
    }
}

/// Taxonomy attribute attached to a product; term order is significant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttribute {
    pub taxonomy: String,
    pub term_ids: Vec<TermId>,
    pub visible: bool,
    pub variation: bool,
}

impl ProductAttribute {
    pub fn new(taxonomy: &str, term_ids: Vec<TermId>) -> Self {
        Self {
            taxonomy: taxonomy.to_string(),
            term_ids,
            visible: true,
            variation: false,
        }
    }
}

/// Value written to a custom product field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomFieldValue {
    Text(String),
    List(Vec<String>),
}

impl CustomFieldValue {
    /// One piece is stored as text, several as a list
    pub fn from_pieces(mut pieces: Vec<String>) -> Option<Self> {
        match pieces.len() {
            0 => None,
            1 => pieces.pop().map(CustomFieldValue::Text),
            _ => Some(CustomFieldValue::List(pieces)),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            CustomFieldValue::Text(text) => serde_json::Value::String(text.clone()),
            CustomFieldValue::List(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|item| serde_json::Value::String(item.clone()))
                    .collect(),
            ),
        }
    }
}

/// Product being assembled from one spreadsheet row
///
/// Built incrementally by the field loop, handed whole to the catalog
/// store and then discarded. Custom fields are written after the product
/// exists, since they need its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub sku: String,
    pub scalar_fields: BTreeMap<ScalarField, String>,
    pub image_id: Option<AttachmentId>,
    pub gallery_image_ids: Vec<AttachmentId>,
    pub category_ids: Vec<TermId>,
    pub attributes: Vec<ProductAttribute>,
    pub custom_fields: BTreeMap<String, CustomFieldValue>,
    pub language: LanguageCode,
    pub is_translation: bool,
    pub original_product_id: Option<ProductId>,
    pub translation_group_id: Option<TranslationGroupId>,
}

impl ProductDraft {
    pub fn new(sku: &str, language: LanguageCode) -> Self {
        Self {
            sku: sku.to_string(),
            scalar_fields: BTreeMap::new(),
            image_id: None,
            gallery_image_ids: Vec::new(),
            category_ids: Vec::new(),
            attributes: Vec::new(),
            custom_fields: BTreeMap::new(),
            language,
            is_translation: false,
            original_product_id: None,
            translation_group_id: None,
        }
    }

    /// Mark the draft as the translation of an existing product
    pub fn as_translation_of(mut self, original_product_id: ProductId) -> Self {
        self.is_translation = true;
        self.original_product_id = Some(original_product_id);
        self
    }

    pub fn set_scalar(&mut self, field: ScalarField, value: &str) {
        self.scalar_fields.insert(field, value.to_string());
    }

    pub fn scalar(&self, field: ScalarField) -> Option<&str> {
        self.scalar_fields.get(&field).map(String::as_str)
    }

    pub fn name(&self) -> &str {
        self.scalar(ScalarField::Name).unwrap_or_default()
    }

    pub fn set_image_id(&mut self, image_id: AttachmentId) {
        self.image_id = Some(image_id);
    }

    pub fn set_gallery_image_ids(&mut self, ids: Vec<AttachmentId>) {
        self.gallery_image_ids = ids;
    }

    pub fn set_category_ids(&mut self, ids: Vec<TermId>) {
        self.category_ids = ids;
    }

    pub fn add_attribute(&mut self, attribute: ProductAttribute) {
        self.attributes.push(attribute);
    }

    pub fn attribute(&self, taxonomy: &str) -> Option<&ProductAttribute> {
        self.attributes
            .iter()
            .find(|attribute| attribute.taxonomy == taxonomy)
    }

    pub fn set_custom_field(&mut self, name: &str, value: CustomFieldValue) {
        self.custom_fields.insert(name.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_field_value_from_pieces() {
        assert_eq!(CustomFieldValue::from_pieces(vec![]), None);
        assert_eq!(
            CustomFieldValue::from_pieces(vec!["cotton".to_string()]),
            Some(CustomFieldValue::Text("cotton".to_string()))
        );
        let list = CustomFieldValue::from_pieces(vec!["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(list.to_json(), serde_json::json!(["a", "b"]));
    }

    #[test]
    fn test_translation_draft() {
        let draft = ProductDraft::new("P1-en", LanguageCode::new("en")).as_translation_of(ProductId(7));
        assert!(draft.is_translation);
        assert_eq!(draft.original_product_id, Some(ProductId(7)));
        assert_eq!(draft.name(), "");
    }
}
