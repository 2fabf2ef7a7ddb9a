//! Diffing two snapshots into update and delete operations.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// A row that can be matched across snapshots by a stable id.
pub trait Reconcile {
    /// Primary id. Never diffed.
    type Id: Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// New values of the mutable fields that differ.
    type Changes: fmt::Debug + Clone + PartialEq + Send + Sync + 'static;

    /// Returns the row's primary id.
    fn id(&self) -> Self::Id;

    /// Compares mutable fields against `original`, returning only the
    /// changed ones, or `None` when the rows are equal.
    fn changes_since(&self, original: &Self) -> Option<Self::Changes>;
}

/// Kind of a planned operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Write changed fields.
    Update,
    /// Remove the row.
    Delete,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// A single planned operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation<I, C> {
    /// Apply `changes` to the row with `id`.
    Update {
        /// Row id.
        id: I,
        /// Changed fields only.
        changes: C,
    },
    /// Delete the row with `id`.
    Delete {
        /// Row id.
        id: I,
    },
}

impl<I: Copy, C> Operation<I, C> {
    /// Returns the target row id.
    pub fn id(&self) -> I {
        match self {
            Self::Update { id, .. } | Self::Delete { id } => *id,
        }
    }

    /// Returns the operation kind.
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Update { .. } => OperationKind::Update,
            Self::Delete { .. } => OperationKind::Delete,
        }
    }
}

/// Operations needed to turn the original snapshot into the edited one.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcilePlan<I, C> {
    updates: Vec<(I, C)>,
    deletes: Vec<I>,
    new_rows: Vec<I>,
}

/// Plan type for a given row type.
pub type PlanFor<R> = ReconcilePlan<<R as Reconcile>::Id, <R as Reconcile>::Changes>;

impl<I, C> ReconcilePlan<I, C> {
    /// Planned updates, in original row order.
    pub fn updates(&self) -> &[(I, C)] {
        &self.updates
    }

    /// Planned deletes, in original row order.
    pub fn deletes(&self) -> &[I] {
        &self.deletes
    }

    /// Ids found only in the edited snapshot. No operation is planned for them.
    pub fn new_rows(&self) -> &[I] {
        &self.new_rows
    }

    /// Returns `true` when there is nothing to apply.
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.deletes.is_empty()
    }

    /// Number of planned operations.
    pub fn len(&self) -> usize {
        self.updates.len() + self.deletes.len()
    }

    /// Consumes the plan into its operations (all updates, then all
    /// deletes) and the ignored new-row ids.
    pub fn into_parts(self) -> (Vec<Operation<I, C>>, Vec<I>) {
        let operations = self
            .updates
            .into_iter()
            .map(|(id, changes)| Operation::Update { id, changes })
            .chain(self.deletes.into_iter().map(|id| Operation::Delete { id }))
            .collect();
        (operations, self.new_rows)
    }
}

/// Computes the operations that turn `original` into `edited`.
///
/// Rows are matched by [`Reconcile::id`]. When an id repeats, the last row
/// wins in `edited` and the first row wins in `original`.
pub fn plan<R: Reconcile>(original: &[R], edited: &[R]) -> PlanFor<R> {
    let mut edited_by_id: HashMap<R::Id, &R> = HashMap::with_capacity(edited.len());
    for row in edited {
        edited_by_id.insert(row.id(), row);
    }

    let mut seen = HashSet::with_capacity(original.len());
    let mut updates = Vec::new();
    let mut deletes = Vec::new();

    for before in original {
        let id = before.id();
        if !seen.insert(id) {
            continue;
        }
        match edited_by_id.get(&id) {
            Some(after) => {
                if let Some(changes) = after.changes_since(before) {
                    updates.push((id, changes));
                }
            }
            None => deletes.push(id),
        }
    }

    let mut new_seen = HashSet::new();
    let new_rows = edited
        .iter()
        .map(|row| row.id())
        .filter(|id| !seen.contains(id) && new_seen.insert(*id))
        .collect();

    ReconcilePlan {
        updates,
        deletes,
        new_rows,
    }
}
