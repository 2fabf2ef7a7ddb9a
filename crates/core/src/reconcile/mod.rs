//! Reconciliation of an edited table against the snapshot it was loaded from.
//!
//! Planning is pure: [`plan`] compares two row sets by primary id and yields
//! the updates and deletes needed to make storage match the edited copy.
//! Dispatch is separate: [`apply`] runs a plan against any
//! [`ReconcileTarget`], one operation at a time, and collects a per-row
//! report instead of failing on the first error.
//!
//! Rows present only in the edited copy are never turned into creates. They
//! are surfaced in the plan so callers can warn about them.

pub mod apply;
pub mod plan;
mod rows;


pub use apply::{
    FailureCode, OperationFailure, ReconcileOutcome, ReconcileReport, ReconcileTarget, apply,
};
pub use plan::{Operation, OperationKind, PlanFor, Reconcile, ReconcilePlan, plan};
