//! Lookup kinds: business verticals, business units, clients, work type
//! origins and work types.

use sea_orm::{NotSet, Set};
use workcast_core::catalog::{
    BusinessUnit, BusinessUnitChanges, BusinessVertical, BusinessVerticalChanges, Client,
    ClientChanges, NewBusinessUnit, NewBusinessVertical, NewClient, NewWorkType,
    NewWorkTypeOrigin, WorkType, WorkTypeChanges, WorkTypeOrigin, WorkTypeOriginChanges,
};
use workcast_shared::types::{
    BusinessUnitId, BusinessVerticalId, ClientId, WorkTypeId, WorkTypeOriginId,
};

use super::lookup::{Lookup, LookupRepository};
use crate::entities::{business_unit, business_vertical, clients, work_type, work_type_origin_type};

/// Business verticals.
#[derive(Debug, Clone, Copy)]
pub struct Verticals;

/// Business units.
#[derive(Debug, Clone, Copy)]
pub struct Units;

/// Clients.
#[derive(Debug, Clone, Copy)]
pub struct Clients;

/// Work type origins.
#[derive(Debug, Clone, Copy)]
pub struct Origins;

/// Work types.
#[derive(Debug, Clone, Copy)]
pub struct WorkTypes;

/// Store for business verticals.
pub type VerticalRepository = LookupRepository<Verticals>;
/// Store for business units.
pub type UnitRepository = LookupRepository<Units>;
/// Store for clients.
pub type ClientRepository = LookupRepository<Clients>;
/// Store for work type origins.
pub type OriginRepository = LookupRepository<Origins>;
/// Store for work types.
pub type WorkTypeRepository = LookupRepository<WorkTypes>;

impl Lookup for Verticals {
    type Entity = business_vertical::Entity;
    type Model = business_vertical::Model;
    type Active = business_vertical::ActiveModel;
    type Id = BusinessVerticalId;
    type Record = BusinessVertical;
    type Draft = NewBusinessVertical;
    type Changes = BusinessVerticalChanges;

    const LABEL: &'static str = "business vertical";
    const PARENTS: &'static str = "parent";
    const CHILDREN: &'static str = "business units";

    fn id_column() -> business_vertical::Column {
        business_vertical::Column::BusinessVerticalId
    }

    fn new_active(draft: NewBusinessVertical) -> business_vertical::ActiveModel {
        business_vertical::ActiveModel {
            business_vertical_id: NotSet,
            business_vertical_name: Set(draft.name),
        }
    }

    fn apply_changes(active: &mut business_vertical::ActiveModel, changes: BusinessVerticalChanges) {
        if let Some(name) = changes.name {
            active.business_vertical_name = Set(name);
        }
    }

    fn to_record(model: business_vertical::Model) -> BusinessVertical {
        BusinessVertical {
            id: model.business_vertical_id.into(),
            name: model.business_vertical_name,
        }
    }
}

impl Lookup for Units {
    type Entity = business_unit::Entity;
    type Model = business_unit::Model;
    type Active = business_unit::ActiveModel;
    type Id = BusinessUnitId;
    type Record = BusinessUnit;
    type Draft = NewBusinessUnit;
    type Changes = BusinessUnitChanges;

    const LABEL: &'static str = "business unit";
    const PARENTS: &'static str = "business vertical";
    const CHILDREN: &'static str = "clients or forecasts";

    fn id_column() -> business_unit::Column {
        business_unit::Column::BusinessUnitId
    }

    fn new_active(draft: NewBusinessUnit) -> business_unit::ActiveModel {
        business_unit::ActiveModel {
            business_unit_id: NotSet,
            business_unit_name: Set(draft.name),
            business_vertical_id: Set(draft.vertical_id.into()),
        }
    }

    fn apply_changes(active: &mut business_unit::ActiveModel, changes: BusinessUnitChanges) {
        if let Some(name) = changes.name {
            active.business_unit_name = Set(name);
        }
        if let Some(vertical_id) = changes.vertical_id {
            active.business_vertical_id = Set(vertical_id.into());
        }
    }

    fn to_record(model: business_unit::Model) -> BusinessUnit {
        BusinessUnit {
            id: model.business_unit_id.into(),
            name: model.business_unit_name,
            vertical_id: model.business_vertical_id.into(),
        }
    }
}

impl Lookup for Clients {
    type Entity = clients::Entity;
    type Model = clients::Model;
    type Active = clients::ActiveModel;
    type Id = ClientId;
    type Record = Client;
    type Draft = NewClient;
    type Changes = ClientChanges;

    const LABEL: &'static str = "client";
    const PARENTS: &'static str = "business unit";
    const CHILDREN: &'static str = "forecasts";

    fn id_column() -> clients::Column {
        clients::Column::ClientId
    }

    fn new_active(draft: NewClient) -> clients::ActiveModel {
        clients::ActiveModel {
            client_id: NotSet,
            client_name: Set(draft.name),
            client_active: Set(draft.active),
            client_start_date: Set(draft.start_date),
            client_end_date: Set(draft.end_date),
            business_unit_id: Set(draft.unit_id.into()),
        }
    }

    fn apply_changes(active: &mut clients::ActiveModel, changes: ClientChanges) {
        if let Some(name) = changes.name {
            active.client_name = Set(name);
        }
        if let Some(flag) = changes.active {
            active.client_active = Set(flag);
        }
        if let Some(start) = changes.start_date {
            active.client_start_date = Set(start);
        }
        if let Some(end) = changes.end_date {
            active.client_end_date = Set(end);
        }
        if let Some(unit_id) = changes.unit_id {
            active.business_unit_id = Set(unit_id.into());
        }
    }

    fn to_record(model: clients::Model) -> Client {
        Client {
            id: model.client_id.into(),
            name: model.client_name,
            active: model.client_active,
            start_date: model.client_start_date,
            end_date: model.client_end_date,
            unit_id: model.business_unit_id.into(),
        }
    }
}

impl Lookup for Origins {
    type Entity = work_type_origin_type::Entity;
    type Model = work_type_origin_type::Model;
    type Active = work_type_origin_type::ActiveModel;
    type Id = WorkTypeOriginId;
    type Record = WorkTypeOrigin;
    type Draft = NewWorkTypeOrigin;
    type Changes = WorkTypeOriginChanges;

    const LABEL: &'static str = "work type origin";
    const PARENTS: &'static str = "parent";
    const CHILDREN: &'static str = "work types";

    fn id_column() -> work_type_origin_type::Column {
        work_type_origin_type::Column::WorkTypeOriginTypeId
    }

    fn new_active(draft: NewWorkTypeOrigin) -> work_type_origin_type::ActiveModel {
        work_type_origin_type::ActiveModel {
            work_type_origin_type_id: NotSet,
            work_type_origin_type_name: Set(draft.name),
        }
    }

    fn apply_changes(active: &mut work_type_origin_type::ActiveModel, changes: WorkTypeOriginChanges) {
        if let Some(name) = changes.name {
            active.work_type_origin_type_name = Set(name);
        }
    }

    fn to_record(model: work_type_origin_type::Model) -> WorkTypeOrigin {
        WorkTypeOrigin {
            id: model.work_type_origin_type_id.into(),
            name: model.work_type_origin_type_name,
        }
    }
}

impl Lookup for WorkTypes {
    type Entity = work_type::Entity;
    type Model = work_type::Model;
    type Active = work_type::ActiveModel;
    type Id = WorkTypeId;
    type Record = WorkType;
    type Draft = NewWorkType;
    type Changes = WorkTypeChanges;

    const LABEL: &'static str = "work type";
    const PARENTS: &'static str = "work type origin";
    const CHILDREN: &'static str = "forecasts";

    fn id_column() -> work_type::Column {
        work_type::Column::WorkTypeId
    }

    fn new_active(draft: NewWorkType) -> work_type::ActiveModel {
        work_type::ActiveModel {
            work_type_id: NotSet,
            work_type_name: Set(draft.name),
            work_type_origin_type_id: Set(draft.origin_id.into()),
        }
    }

    fn apply_changes(active: &mut work_type::ActiveModel, changes: WorkTypeChanges) {
        if let Some(name) = changes.name {
            active.work_type_name = Set(name);
        }
        if let Some(origin_id) = changes.origin_id {
            active.work_type_origin_type_id = Set(origin_id.into());
        }
    }

    fn to_record(model: work_type::Model) -> WorkType {
        WorkType {
            id: model.work_type_id.into(),
            name: model.work_type_name,
            origin_id: model.work_type_origin_type_id.into(),
        }
    }
}
