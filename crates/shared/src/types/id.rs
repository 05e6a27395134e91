//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `SourceLineId` where a
//! `SourceDocumentId` is expected when building ledger rows.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(TenantId, "Unique identifier for a tenant (bookkeeping organization).");
typed_id!(
    LegalEntityId,
    "Unique identifier for a legal entity filing under a tenant."
);
typed_id!(
    SourceDocumentId,
    "Unique identifier for a posted sales, purchase or adjustment document."
);
typed_id!(SourceLineId, "Unique identifier for a line of a source document.");
typed_id!(
    LedgerEntryId,
    "Unique identifier for a reverse-charge ledger entry."
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_typed_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = TenantId::from_uuid(uuid);
        assert_eq!(id.into_inner(), uuid);
        assert_eq!(id.to_string(), uuid.to_string());
    }

    #[test]
    fn test_typed_id_is_time_ordered() {
        let first = LedgerEntryId::new();
        let second = LedgerEntryId::new();
        assert!(first <= second);
    }

    #[test]
    fn test_typed_id_from_str() {
        let uuid = Uuid::new_v4();
        let parsed = SourceDocumentId::from_str(&uuid.to_string()).unwrap();
        assert_eq!(parsed, SourceDocumentId::from_uuid(uuid));
        assert!(SourceLineId::from_str("not-a-uuid").is_err());
    }
}
