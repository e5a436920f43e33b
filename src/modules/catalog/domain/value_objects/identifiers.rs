use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! catalog_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

catalog_id!(
    /// Identifier of a product in the catalog store
    ProductId
);
catalog_id!(
    /// Identifier of a taxonomy term
    TermId
);
catalog_id!(
    /// Translation group id (trid) shared by all language variants of one element
    TranslationGroupId
);
catalog_id!(
    /// Identifier of a media library attachment
    AttachmentId
);
