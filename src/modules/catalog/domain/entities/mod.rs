mod product_draft;
mod term;

pub use product_draft::{CustomFieldValue, ProductAttribute, ProductDraft, ScalarField};
pub use term::{NewTerm, Term};
