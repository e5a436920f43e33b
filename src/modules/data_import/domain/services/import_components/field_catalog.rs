use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::log_warn;
use crate::modules::catalog::{ElementType, ScalarField};

use super::types::{FieldSpec, FieldType};

/// Prefix marking custom-field keys in the column mapping
pub const CUSTOM_FIELD_PREFIX: &str = "custom_";

/// Built-in product fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductField {
    Name,
    Sku,
    Description,
    ShortDescription,
    CategoryIds,
    ImageId,
    GalleryImageIds,
    Weight,
    RegularPrice,
    SalePrice,
    StockQuantity,
    LanguageCode,
    OriginalProductSku,
}

impl ProductField {
    /// Declaration order used for the built-in part of the catalog
    pub const ALL: [ProductField; 13] = [
        ProductField::Name,
        ProductField::Sku,
        ProductField::Description,
        ProductField::ShortDescription,
        ProductField::CategoryIds,
        ProductField::ImageId,
        ProductField::GalleryImageIds,
        ProductField::Weight,
        ProductField::RegularPrice,
        ProductField::SalePrice,
        ProductField::StockQuantity,
        ProductField::LanguageCode,
        ProductField::OriginalProductSku,
    ];

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.key() == key)
    }

    pub fn key(&self) -> &'static str {
        match self {
            ProductField::Name => "set_name",
            ProductField::Sku => "set_sku",
            ProductField::Description => "set_description",
            ProductField::ShortDescription => "set_short_description",
            ProductField::CategoryIds => "set_category_ids",
            ProductField::ImageId => "set_image_id",
            ProductField::GalleryImageIds => "set_gallery_image_ids",
            ProductField::Weight => "set_weight",
            ProductField::RegularPrice => "set_regular_price",
            ProductField::SalePrice => "set_sale_price",
            ProductField::StockQuantity => "set_stock_quantity",
            ProductField::LanguageCode => "language_code",
            ProductField::OriginalProductSku => "original_product_sku",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductField::Name => "Product Name",
            ProductField::Sku => "SKU",
            ProductField::Description => "Description",
            ProductField::ShortDescription => "Short Description",
            ProductField::CategoryIds => "Categories",
            ProductField::ImageId => "Main Image",
            ProductField::GalleryImageIds => "Gallery Images",
            ProductField::Weight => "Weight",
            ProductField::RegularPrice => "Regular Price",
            ProductField::SalePrice => "Sale Price",
            ProductField::StockQuantity => "Stock Quantity",
            ProductField::LanguageCode => "Language Code",
            ProductField::OriginalProductSku => "Original Product SKU",
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            ProductField::CategoryIds | ProductField::GalleryImageIds => FieldType::List,
            _ => FieldType::Text,
        }
    }

    /// Fields read by the translation linker rather than the field loop
    pub fn is_control(&self) -> bool {
        matches!(
            self,
            ProductField::Sku | ProductField::LanguageCode | ProductField::OriginalProductSku
        )
    }

    fn handler(&self) -> FieldHandler {
        match self {
            ProductField::Sku | ProductField::LanguageCode | ProductField::OriginalProductSku => {
                FieldHandler::Control
            }
            ProductField::Name => FieldHandler::Scalar(ScalarField::Name),
            ProductField::Description => FieldHandler::Scalar(ScalarField::Description),
            ProductField::ShortDescription => FieldHandler::Scalar(ScalarField::ShortDescription),
            ProductField::Weight => FieldHandler::Scalar(ScalarField::Weight),
            ProductField::RegularPrice => FieldHandler::Scalar(ScalarField::RegularPrice),
            ProductField::SalePrice => FieldHandler::Scalar(ScalarField::SalePrice),
            ProductField::StockQuantity => FieldHandler::Scalar(ScalarField::StockQuantity),
            ProductField::ImageId => FieldHandler::Image,
            ProductField::GalleryImageIds => FieldHandler::Gallery,
            ProductField::CategoryIds => FieldHandler::Categories,
        }
    }
}

/// What the field loop does with a field's value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldHandler {
    /// Consumed by row classification, skipped by the field loop
    Control,
    Scalar(ScalarField),
    Image,
    Gallery,
    Categories,
    Attribute { taxonomy: String },
    Custom { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredField {
    pub spec: FieldSpec,
    pub handler: FieldHandler,
}

/// Attribute taxonomy offered for mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// Custom product field offered for mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFieldDefinition {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// Field specs registered once per import session
///
/// Built-in fields come first, then attribute taxonomies, then custom
/// fields. Specs that cannot be dispatched are left out and reported as
/// configuration warnings instead of failing rows later.
#[derive(Debug, Clone, Default)]
pub struct FieldCatalog {
    fields: Vec<RegisteredField>,
    keys: HashSet<String>,
    warnings: Vec<String>,
}

impl FieldCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with built-ins, attributes and custom fields, in that order
    pub fn standard(
        attributes: &[AttributeDefinition],
        custom_fields: &[CustomFieldDefinition],
    ) -> Self {
        let mut catalog = Self::new().with_builtin_fields();
        for attribute in attributes {
            catalog = catalog.with_attribute(&attribute.name, attribute.label.as_deref());
        }
        for custom in custom_fields {
            catalog = catalog.with_custom_field(&custom.name, custom.label.as_deref());
        }
        catalog
    }

    pub fn with_builtin_fields(mut self) -> Self {
        for field in ProductField::ALL {
            self.register(FieldSpec::new(field.key(), field.field_type(), field.label()));
        }
        self
    }

    pub fn with_attribute(mut self, name: &str, label: Option<&str>) -> Self {
        let label = format!("Attr: {}", label.unwrap_or(name));
        self.register(FieldSpec::new(name, FieldType::Attribute, &label));
        self
    }

    pub fn with_custom_field(mut self, name: &str, label: Option<&str>) -> Self {
        let key = format!("{}{}", CUSTOM_FIELD_PREFIX, name);
        let label = format!("Custom: {}", label.unwrap_or(name));
        self.register(FieldSpec::new(&key, FieldType::Custom, &label));
        self
    }

    pub fn with_field(mut self, spec: FieldSpec) -> Self {
        self.register(spec);
        self
    }

    fn register(&mut self, spec: FieldSpec) {
        if self.keys.contains(&spec.key) {
            self.warn(format!("Field '{}' is declared more than once", spec.key));
            return;
        }

        match Self::handler_for(&spec) {
            Ok(handler) => {
                self.keys.insert(spec.key.clone());
                self.fields.push(RegisteredField { spec, handler });
            }
            Err(warning) => self.warn(warning),
        }
    }

    fn handler_for(spec: &FieldSpec) -> Result<FieldHandler, String> {
        if spec.key.trim().is_empty() {
            return Err("Field with an empty key ignored".to_string());
        }

        match spec.field_type {
            FieldType::Text | FieldType::List => {
                let field = ProductField::from_key(&spec.key).ok_or_else(|| {
                    format!("Unknown product field '{}' ignored", spec.key)
                })?;
                if field.field_type() != spec.field_type {
                    return Err(format!(
                        "Field '{}' declared as {} but handled as {}",
                        spec.key,
                        spec.field_type,
                        field.field_type()
                    ));
                }
                Ok(field.handler())
            }
            FieldType::Attribute => Ok(FieldHandler::Attribute {
                taxonomy: ElementType::attribute_taxonomy_name(&spec.key),
            }),
            FieldType::Custom => {
                let name = spec
                    .key
                    .strip_prefix(CUSTOM_FIELD_PREFIX)
                    .unwrap_or(&spec.key);
                if name.is_empty() {
                    return Err(format!("Custom field '{}' has no name", spec.key));
                }
                Ok(FieldHandler::Custom {
                    name: name.to_string(),
                })
            }
        }
    }

    fn warn(&mut self, warning: String) {
        log_warn!("Field catalog: {}", warning);
        self.warnings.push(warning);
    }

    pub fn fields(&self) -> &[RegisteredField] {
        &self.fields
    }

    pub fn specs(&self) -> Vec<FieldSpec> {
        self.fields.iter().map(|field| field.spec.clone()).collect()
    }

    pub fn get(&self, key: &str) -> Option<&RegisteredField> {
        self.fields.iter().find(|field| field.spec.key == key)
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
