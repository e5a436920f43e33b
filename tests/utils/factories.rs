/// Test data factories using builder pattern
///
/// Provides spreadsheet rows, tables and sessions with sensible defaults
use catalog_importer_lib::modules::data_import::{
    AttributeDefinition, ColumnMapping, CsvTable, CustomFieldDefinition, ImportSession,
};

/// Header row shared by the standard fixtures
pub const HEADERS: [&str; 10] = [
    "SKU",
    "Language",
    "Original SKU",
    "Name",
    "Price",
    "Categories",
    "Colors",
    "Material",
    "Image",
    "Gallery",
];

pub struct ProductRowFactory {
    sku: String,
    language: String,
    original_sku: String,
    name: String,
    price: String,
    categories: String,
    colors: String,
    material: String,
    image: String,
    gallery: String,
}

impl Default for ProductRowFactory {
    fn default() -> Self {
        Self {
            sku: "P1".to_string(),
            language: "it".to_string(),
            original_sku: String::new(),
            name: "Sedia".to_string(),
            price: "49.90".to_string(),
            categories: String::new(),
            colors: String::new(),
            material: String::new(),
            image: String::new(),
            gallery: String::new(),
        }
    }
}

impl ProductRowFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sku(mut self, sku: &str) -> Self {
        self.sku = sku.to_string();
        self
    }

    pub fn language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    /// Mark the row as a translation of the product with `sku`
    pub fn translation_of(mut self, sku: &str) -> Self {
        self.original_sku = sku.to_string();
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn price(mut self, price: &str) -> Self {
        self.price = price.to_string();
        self
    }

    pub fn categories(mut self, categories: &str) -> Self {
        self.categories = categories.to_string();
        self
    }

    pub fn colors(mut self, colors: &str) -> Self {
        self.colors = colors.to_string();
        self
    }

    pub fn material(mut self, material: &str) -> Self {
        self.material = material.to_string();
        self
    }

    pub fn image(mut self, url: &str) -> Self {
        self.image = url.to_string();
        self
    }

    pub fn gallery(mut self, urls: &str) -> Self {
        self.gallery = urls.to_string();
        self
    }

    pub fn build(self) -> Vec<String> {
        vec![
            self.sku,
            self.language,
            self.original_sku,
            self.name,
            self.price,
            self.categories,
            self.colors,
            self.material,
            self.image,
            self.gallery,
        ]
    }
}

pub fn headers() -> Vec<String> {
    HEADERS.iter().map(|header| header.to_string()).collect()
}

pub fn table(rows: Vec<Vec<String>>) -> CsvTable {
    CsvTable {
        headers: headers(),
        rows,
    }
}

/// Every standard header mapped to its field
pub fn standard_mapping() -> ColumnMapping {
    ColumnMapping::new()
        .with("set_sku", "SKU")
        .with("language_code", "Language")
        .with("original_product_sku", "Original SKU")
        .with("set_name", "Name")
        .with("set_regular_price", "Price")
        .with("set_category_ids", "Categories")
        .with("color", "Colors")
        .with("custom_material", "Material")
        .with("set_image_id", "Image")
        .with("set_gallery_image_ids", "Gallery")
}

/// Session offering the `color` attribute and the `material` custom field
pub fn standard_session() -> ImportSession {
    session_with_mapping(standard_mapping())
}

pub fn session_with_mapping(column_mapping: ColumnMapping) -> ImportSession {
    ImportSession {
        column_mapping,
        attributes: vec![AttributeDefinition {
            name: "color".to_string(),
            label: Some("Color".to_string()),
        }],
        custom_fields: vec![CustomFieldDefinition {
            name: "material".to_string(),
            label: Some("Material".to_string()),
        }],
    }
}
