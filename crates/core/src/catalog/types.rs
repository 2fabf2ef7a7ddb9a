//! Lookup record types.
//!
//! Field names on the wire follow the table columns (`business_unit_name`,
//! `client_start_date`, ...), so every field is renamed explicitly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use workcast_shared::types::{
    BusinessUnitId, BusinessVerticalId, ClientId, WorkTypeId, WorkTypeOriginId,
};

use super::{ChangeSet, Draft};
use crate::validation::{ValidationError, check_date_range, normalize_name};

fn normalize_opt(
    field: &'static str,
    name: Option<String>,
) -> Result<Option<String>, ValidationError> {
    name.map(|n| normalize_name(field, &n)).transpose()
}

const fn default_active() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Business verticals
// ---------------------------------------------------------------------------

/// A business vertical: top-level business grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessVertical {
    /// Vertical ID.
    #[serde(rename = "business_vertical_id")]
    pub id: BusinessVerticalId,
    /// Unique display name.
    #[serde(rename = "business_vertical_name")]
    pub name: String,
}

/// Input for creating or replacing a business vertical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBusinessVertical {
    /// Display name.
    #[serde(rename = "business_vertical_name")]
    pub name: String,
}

/// Changed fields of a business vertical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessVerticalChanges {
    /// New display name.
    #[serde(
        rename = "business_vertical_name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
}

impl Draft for NewBusinessVertical {
    fn validated(self) -> Result<Self, ValidationError> {
        Ok(Self {
            name: normalize_name("business_vertical_name", &self.name)?,
        })
    }
}

impl ChangeSet<BusinessVertical> for BusinessVerticalChanges {
    fn is_empty(&self) -> bool {
        self.name.is_none()
    }

    fn validated_against(self, _current: &BusinessVertical) -> Result<Self, ValidationError> {
        Ok(Self {
            name: normalize_opt("business_vertical_name", self.name)?,
        })
    }
}

impl From<NewBusinessVertical> for BusinessVerticalChanges {
    fn from(draft: NewBusinessVertical) -> Self {
        Self {
            name: Some(draft.name),
        }
    }
}

// ---------------------------------------------------------------------------
// Business units
// ---------------------------------------------------------------------------

/// A business unit nested under a vertical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessUnit {
    /// Unit ID.
    #[serde(rename = "business_unit_id")]
    pub id: BusinessUnitId,
    /// Unique display name.
    #[serde(rename = "business_unit_name")]
    pub name: String,
    /// Owning vertical.
    #[serde(rename = "business_vertical_id")]
    pub vertical_id: BusinessVerticalId,
}

/// Input for creating or replacing a business unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBusinessUnit {
    /// Display name.
    #[serde(rename = "business_unit_name")]
    pub name: String,
    /// Owning vertical.
    #[serde(rename = "business_vertical_id")]
    pub vertical_id: BusinessVerticalId,
}

/// Changed fields of a business unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessUnitChanges {
    /// New display name.
    #[serde(
        rename = "business_unit_name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    /// New owning vertical.
    #[serde(
        rename = "business_vertical_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub vertical_id: Option<BusinessVerticalId>,
}

impl Draft for NewBusinessUnit {
    fn validated(self) -> Result<Self, ValidationError> {
        Ok(Self {
            name: normalize_name("business_unit_name", &self.name)?,
            ..self
        })
    }
}

impl ChangeSet<BusinessUnit> for BusinessUnitChanges {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.vertical_id.is_none()
    }

    fn validated_against(self, _current: &BusinessUnit) -> Result<Self, ValidationError> {
        Ok(Self {
            name: normalize_opt("business_unit_name", self.name)?,
            ..self
        })
    }
}

impl From<NewBusinessUnit> for BusinessUnitChanges {
    fn from(draft: NewBusinessUnit) -> Self {
        Self {
            name: Some(draft.name),
            vertical_id: Some(draft.vertical_id),
        }
    }
}

// ---------------------------------------------------------------------------
// Clients
// ---------------------------------------------------------------------------

/// A customer owned by one business unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Client ID.
    #[serde(rename = "client_id")]
    pub id: ClientId,
    /// Unique display name.
    #[serde(rename = "client_name")]
    pub name: String,
    /// Whether the client is active.
    #[serde(rename = "client_active")]
    pub active: bool,
    /// Engagement start.
    #[serde(rename = "client_start_date")]
    pub start_date: NaiveDate,
    /// Engagement end, if any.
    #[serde(rename = "client_end_date", default)]
    pub end_date: Option<NaiveDate>,
    /// Owning business unit.
    #[serde(rename = "business_unit_id")]
    pub unit_id: BusinessUnitId,
}

/// Input for creating or replacing a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    /// Display name.
    #[serde(rename = "client_name")]
    pub name: String,
    /// Whether the client is active. Defaults to `true`.
    #[serde(rename = "client_active", default = "default_active")]
    pub active: bool,
    /// Engagement start.
    #[serde(rename = "client_start_date")]
    pub start_date: NaiveDate,
    /// Engagement end, if any.
    #[serde(rename = "client_end_date", default)]
    pub end_date: Option<NaiveDate>,
    /// Owning business unit.
    #[serde(rename = "business_unit_id")]
    pub unit_id: BusinessUnitId,
}

/// Changed fields of a client.
///
/// `end_date` is doubly optional: `None` leaves it unchanged, `Some(None)`
/// clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientChanges {
    /// New display name.
    #[serde(
        rename = "client_name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    /// New active flag.
    #[serde(
        rename = "client_active",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub active: Option<bool>,
    /// New engagement start.
    #[serde(
        rename = "client_start_date",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<NaiveDate>,
    /// New engagement end.
    #[serde(
        rename = "client_end_date",
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub end_date: Option<Option<NaiveDate>>,
    /// New owning business unit.
    #[serde(
        rename = "business_unit_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub unit_id: Option<BusinessUnitId>,
}

impl Draft for NewClient {
    fn validated(self) -> Result<Self, ValidationError> {
        check_date_range(self.start_date, self.end_date)?;
        Ok(Self {
            name: normalize_name("client_name", &self.name)?,
            ..self
        })
    }
}

impl ChangeSet<Client> for ClientChanges {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.active.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.unit_id.is_none()
    }

    fn validated_against(self, current: &Client) -> Result<Self, ValidationError> {
        let start = self.start_date.unwrap_or(current.start_date);
        let end = self.end_date.unwrap_or(current.end_date);
        check_date_range(start, end)?;
        Ok(Self {
            name: normalize_opt("client_name", self.name)?,
            ..self
        })
    }
}

impl From<NewClient> for ClientChanges {
    fn from(draft: NewClient) -> Self {
        Self {
            name: Some(draft.name),
            active: Some(draft.active),
            start_date: Some(draft.start_date),
            end_date: Some(draft.end_date),
            unit_id: Some(draft.unit_id),
        }
    }
}

// ---------------------------------------------------------------------------
// Work type origins
// ---------------------------------------------------------------------------

/// How work is sourced (internal vs. client-driven).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkTypeOrigin {
    /// Origin ID.
    #[serde(rename = "work_type_origin_type_id")]
    pub id: WorkTypeOriginId,
    /// Unique display name.
    #[serde(rename = "work_type_origin_type_name")]
    pub name: String,
}

/// Input for creating or replacing a work type origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWorkTypeOrigin {
    /// Display name.
    #[serde(rename = "work_type_origin_type_name")]
    pub name: String,
}

/// Changed fields of a work type origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkTypeOriginChanges {
    /// New display name.
    #[serde(
        rename = "work_type_origin_type_name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
}

impl Draft for NewWorkTypeOrigin {
    fn validated(self) -> Result<Self, ValidationError> {
        Ok(Self {
            name: normalize_name("work_type_origin_type_name", &self.name)?,
        })
    }
}

impl ChangeSet<WorkTypeOrigin> for WorkTypeOriginChanges {
    fn is_empty(&self) -> bool {
        self.name.is_none()
    }

    fn validated_against(self, _current: &WorkTypeOrigin) -> Result<Self, ValidationError> {
        Ok(Self {
            name: normalize_opt("work_type_origin_type_name", self.name)?,
        })
    }
}

impl From<NewWorkTypeOrigin> for WorkTypeOriginChanges {
    fn from(draft: NewWorkTypeOrigin) -> Self {
        Self {
            name: Some(draft.name),
        }
    }
}

// ---------------------------------------------------------------------------
// Work types
// ---------------------------------------------------------------------------

/// A category of trackable work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkType {
    /// Work type ID.
    #[serde(rename = "work_type_id")]
    pub id: WorkTypeId,
    /// Unique display name.
    #[serde(rename = "work_type_name")]
    pub name: String,
    /// Origin tag.
    #[serde(rename = "work_type_origin_type_id")]
    pub origin_id: WorkTypeOriginId,
}

/// Input for creating or replacing a work type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWorkType {
    /// Display name.
    #[serde(rename = "work_type_name")]
    pub name: String,
    /// Origin tag.
    #[serde(rename = "work_type_origin_type_id")]
    pub origin_id: WorkTypeOriginId,
}

/// Changed fields of a work type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkTypeChanges {
    /// New display name.
    #[serde(
        rename = "work_type_name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    /// New origin tag.
    #[serde(
        rename = "work_type_origin_type_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub origin_id: Option<WorkTypeOriginId>,
}

impl Draft for NewWorkType {
    fn validated(self) -> Result<Self, ValidationError> {
        Ok(Self {
            name: normalize_name("work_type_name", &self.name)?,
            ..self
        })
    }
}

impl ChangeSet<WorkType> for WorkTypeChanges {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.origin_id.is_none()
    }

    fn validated_against(self, _current: &WorkType) -> Result<Self, ValidationError> {
        Ok(Self {
            name: normalize_opt("work_type_name", self.name)?,
            ..self
        })
    }
}

impl From<NewWorkType> for WorkTypeChanges {
    fn from(draft: NewWorkType) -> Self {
        Self {
            name: Some(draft.name),
            origin_id: Some(draft.origin_id),
        }
    }
}
