//! [`Reconcile`] for every editable table.

use workcast_shared::types::{
    BusinessUnitId, BusinessVerticalId, ClientId, ForecastId, WorkTypeId, WorkTypeOriginId,
};

use super::plan::Reconcile;
use crate::catalog::{
    BusinessUnit, BusinessUnitChanges, BusinessVertical, BusinessVerticalChanges, ChangeSet,
    Client, ClientChanges, WorkType, WorkTypeChanges, WorkTypeOrigin, WorkTypeOriginChanges,
};
use crate::forecast::{AmountUpdate, ForecastDetail};

/// New value of a field when it differs from the original.
fn changed<T: PartialEq + Clone>(after: &T, before: &T) -> Option<T> {
    (after != before).then(|| after.clone())
}

fn non_empty<C: ChangeSet<R>, R>(changes: C) -> Option<C> {
    (!changes.is_empty()).then_some(changes)
}

impl Reconcile for ForecastDetail {
    type Id = ForecastId;
    type Changes = AmountUpdate;

    fn id(&self) -> ForecastId {
        self.id
    }

    // Display names come from the joined lookups and are never written back.
    fn changes_since(&self, original: &Self) -> Option<AmountUpdate> {
        changed(&self.amount, &original.amount).map(|amount| AmountUpdate { amount })
    }
}

impl Reconcile for BusinessVertical {
    type Id = BusinessVerticalId;
    type Changes = BusinessVerticalChanges;

    fn id(&self) -> BusinessVerticalId {
        self.id
    }

    fn changes_since(&self, original: &Self) -> Option<BusinessVerticalChanges> {
        non_empty::<_, Self>(BusinessVerticalChanges {
            name: changed(&self.name, &original.name),
        })
    }
}

impl Reconcile for BusinessUnit {
    type Id = BusinessUnitId;
    type Changes = BusinessUnitChanges;

    fn id(&self) -> BusinessUnitId {
        self.id
    }

    fn changes_since(&self, original: &Self) -> Option<BusinessUnitChanges> {
        non_empty::<_, Self>(BusinessUnitChanges {
            name: changed(&self.name, &original.name),
            vertical_id: changed(&self.vertical_id, &original.vertical_id),
        })
    }
}

impl Reconcile for Client {
    type Id = ClientId;
    type Changes = ClientChanges;

    fn id(&self) -> ClientId {
        self.id
    }

    fn changes_since(&self, original: &Self) -> Option<ClientChanges> {
        non_empty::<_, Self>(ClientChanges {
            name: changed(&self.name, &original.name),
            active: changed(&self.active, &original.active),
            start_date: changed(&self.start_date, &original.start_date),
            end_date: changed(&self.end_date, &original.end_date),
            unit_id: changed(&self.unit_id, &original.unit_id),
        })
    }
}

impl Reconcile for WorkTypeOrigin {
    type Id = WorkTypeOriginId;
    type Changes = WorkTypeOriginChanges;

    fn id(&self) -> WorkTypeOriginId {
        self.id
    }

    fn changes_since(&self, original: &Self) -> Option<WorkTypeOriginChanges> {
        non_empty::<_, Self>(WorkTypeOriginChanges {
            name: changed(&self.name, &original.name),
        })
    }
}

impl Reconcile for WorkType {
    type Id = WorkTypeId;
    type Changes = WorkTypeChanges;

    fn id(&self) -> WorkTypeId {
        self.id
    }

    fn changes_since(&self, original: &Self) -> Option<WorkTypeChanges> {
        non_empty::<_, Self>(WorkTypeChanges {
            name: changed(&self.name, &original.name),
            origin_id: changed(&self.origin_id, &original.origin_id),
        })
    }
}
