mod element_type;
mod identifiers;
mod language_code;

pub use element_type::{ElementType, PRODUCT_CATEGORY_TAXONOMY};
pub use identifiers::{AttachmentId, ProductId, TermId, TranslationGroupId};
pub use language_code::LanguageCode;
