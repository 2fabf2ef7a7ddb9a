//! Lookup records: business verticals, business units, clients, work types
//! and work type origins.
//!
//! Every lookup kind comes in three shapes:
//!
//! - the stored record, carrying its database-assigned id;
//! - a draft (`New*`) used for creation and full replacement;
//! - a sparse change set (`*Changes`) where an absent field means unchanged.

pub mod types;


pub use types::{
    BusinessUnit, BusinessUnitChanges, BusinessVertical, BusinessVerticalChanges, Client,
    ClientChanges, NewBusinessUnit, NewBusinessVertical, NewClient, NewWorkType,
    NewWorkTypeOrigin, WorkType, WorkTypeChanges, WorkTypeOrigin, WorkTypeOriginChanges,
};

use crate::validation::ValidationError;

/// Input for creating a record.
pub trait Draft: Sized {
    /// Normalizes and validates the draft.
    ///
    /// # Errors
    ///
    /// Returns the first rule the draft violates.
    fn validated(self) -> Result<Self, ValidationError>;
}

/// Sparse update applied to an existing record.
pub trait ChangeSet<R>: Sized {
    /// Returns `true` when no field is present.
    fn is_empty(&self) -> bool;

    /// Normalizes and validates the change set against the row it will
    /// be merged into.
    ///
    /// # Errors
    ///
    /// Returns the first rule the merged row would violate.
    fn validated_against(self, current: &R) -> Result<Self, ValidationError>;
}
