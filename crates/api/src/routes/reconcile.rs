//! Server-side reconciliation of bulk edits.
//!
//! The client posts the snapshot it fetched and the snapshot the user ended
//! up with. The server diffs them, applies the difference and returns the
//! per-operation report.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use workcast_core::reconcile::{Reconcile, ReconcileReport, ReconcileTarget, apply, plan};

/// Body of `POST /{resource}/reconcile`.
#[derive(Debug, Deserialize)]
#[serde(bound = "R: DeserializeOwned")]
pub struct ReconcileRequest<R> {
    /// Rows as last fetched.
    pub original: Vec<R>,
    /// Rows after editing.
    pub edited: Vec<R>,
}

/// Plans and applies one reconciliation against `target`.
pub(crate) async fn run<T>(
    resource: &'static str,
    target: &T,
    request: ReconcileRequest<T::Row>,
) -> ReconcileReport<<T::Row as Reconcile>::Id>
where
    T: ReconcileTarget,
{
    let plan = plan(&request.original, &request.edited);

    for id in plan.new_rows() {
        warn!(resource, %id, "edited row has no original; not created");
    }

    let report = apply(plan, target).await;
    info!(
        resource,
        outcome = ?report.outcome,
        updated = report.updated,
        deleted = report.deleted,
        failed = report.failures.len(),
        "reconciliation finished"
    );
    for failure in &report.failures {
        warn!(
            resource,
            id = %failure.id,
            operation = %failure.operation,
            code = %failure.code,
            "reconciliation operation failed"
        );
    }

    report
}
