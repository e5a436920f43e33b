use serde::{Deserialize, Serialize};
use std::fmt;

/// Taxonomy holding product categories
pub const PRODUCT_CATEGORY_TAXONOMY: &str = "product_cat";

/// Kind of element a translation group belongs to
///
/// Groups are scoped per element type: a product group and a term group
/// may share the same numeric id without being related.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "taxonomy", rename_all = "snake_case")]
pub enum ElementType {
    Product,
    Taxonomy(String),
}

impl ElementType {
    pub fn taxonomy(name: &str) -> Self {
        Self::Taxonomy(name.to_string())
    }

    /// Attribute taxonomies are namespaced with a `pa_` prefix
    pub fn attribute_taxonomy_name(attribute_key: &str) -> String {
        format!("pa_{}", attribute_key)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::Product => write!(f, "post_product"),
            ElementType::Taxonomy(taxonomy) => write!(f, "tax_{}", taxonomy),
        }
    }
}
