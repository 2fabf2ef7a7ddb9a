//! Typed IDs for type-safe entity references.
//!
//! Rows are keyed by database-assigned serial integers. Wrapping them prevents accidentally
//! passing a `ClientId` where a `BusinessUnitId` is expected.

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i32);

        impl $name {
            /// Wraps a raw database identifier.
            #[must_use]
            pub const fn new(raw: i32) -> Self {
                Self(raw)
            }

            /// Returns the raw database identifier.
            #[must_use]
            pub const fn into_inner(self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(raw: i32) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }
    };
}

typed_id!(BusinessVerticalId, "Unique identifier for a business vertical.");
typed_id!(BusinessUnitId, "Unique identifier for a business unit.");
typed_id!(ClientId, "Unique identifier for a client.");
typed_id!(
    WorkTypeOriginId,
    "Unique identifier for a work type origin."
);
typed_id!(WorkTypeId, "Unique identifier for a work type.");
typed_id!(ForecastId, "Unique identifier for a forecast.");
