//! Best-effort dispatch of a reconciliation plan.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use super::plan::{Operation, OperationKind, PlanFor, Reconcile};

/// Errors that carry a stable, machine-readable code.
pub trait FailureCode: fmt::Display {
    /// Stable error code, e.g. `NOT_FOUND`.
    fn failure_code(&self) -> &'static str;
}

/// Storage that reconciliation operations are applied to.
#[async_trait]
pub trait ReconcileTarget: Send + Sync {
    /// Row type being reconciled.
    type Row: Reconcile;

    /// Error returned by a single operation.
    type Error: FailureCode + Send;

    /// Writes the changed fields of one row.
    async fn apply_update(
        &self,
        id: <Self::Row as Reconcile>::Id,
        changes: <Self::Row as Reconcile>::Changes,
    ) -> Result<(), Self::Error>;

    /// Deletes one row.
    async fn apply_delete(&self, id: <Self::Row as Reconcile>::Id) -> Result<(), Self::Error>;
}

/// Overall result of applying a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileOutcome {
    /// The plan was empty.
    NoChanges,
    /// Every operation succeeded.
    Applied,
    /// Some operations succeeded and some failed.
    Partial,
    /// Every operation failed.
    Failed,
}

/// One operation that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationFailure<I> {
    /// Target row id.
    pub id: I,
    /// What was attempted.
    pub operation: OperationKind,
    /// Stable error code.
    pub code: String,
    /// Human-readable reason.
    pub message: String,
}

/// Per-operation results of applying a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileReport<I> {
    /// Overall result.
    pub outcome: ReconcileOutcome,
    /// Successful updates.
    pub updated: usize,
    /// Successful deletes.
    pub deleted: usize,
    /// Failed operations, in dispatch order.
    pub failures: Vec<OperationFailure<I>>,
    /// Ids present only in the edited snapshot. Not applied.
    pub ignored_new_rows: Vec<I>,
}

impl<I> ReconcileReport<I> {
    /// Report for an empty plan.
    #[must_use]
    pub fn no_changes(ignored_new_rows: Vec<I>) -> Self {
        Self {
            outcome: ReconcileOutcome::NoChanges,
            updated: 0,
            deleted: 0,
            failures: Vec::new(),
            ignored_new_rows,
        }
    }

    /// Number of successful operations.
    pub const fn succeeded(&self) -> usize {
        self.updated + self.deleted
    }
}

/// Applies every operation of `plan` to `target`.
///
/// Operations run sequentially, updates before deletes. A failing operation
/// is recorded and the remaining ones still run. Nothing is rolled back.
pub async fn apply<T>(
    plan: PlanFor<T::Row>,
    target: &T,
) -> ReconcileReport<<T::Row as Reconcile>::Id>
where
    T: ReconcileTarget + ?Sized,
{
    let (operations, ignored_new_rows) = plan.into_parts();
    if operations.is_empty() {
        return ReconcileReport::no_changes(ignored_new_rows);
    }

    let mut updated = 0;
    let mut deleted = 0;
    let mut failures = Vec::new();

    for operation in operations {
        let id = operation.id();
        let kind = operation.kind();
        let result = match operation {
            Operation::Update { id, changes } => target.apply_update(id, changes).await,
            Operation::Delete { id } => target.apply_delete(id).await,
        };
        match (result, kind) {
            (Ok(()), OperationKind::Update) => updated += 1,
            (Ok(()), OperationKind::Delete) => deleted += 1,
            (Err(err), operation) => failures.push(OperationFailure {
                id,
                operation,
                code: err.failure_code().to_string(),
                message: err.to_string(),
            }),
        }
    }

    let outcome = match (updated + deleted, failures.is_empty()) {
        (_, true) => ReconcileOutcome::Applied,
        (0, false) => ReconcileOutcome::Failed,
        _ => ReconcileOutcome::Partial,
    };

    ReconcileReport {
        outcome,
        updated,
        deleted,
        failures,
        ignored_new_rows,
    }
}
