//! Depth-first parent-chain walk.
//!
//! # Invariants
//!
//! - No ancestor of a record, followed transitively, has the record's
//!   identity triple.
//! - Validation only reads; it never writes to the store.
//! - Dangling parent keys are skipped, the referenced record may be gone.

use std::collections::HashSet;

use tracing::{debug, warn};

use distreg_store::DistributiveStore;
use distreg_types::{Identity, RecordKey};

use crate::error::{LineageError, LineageResult};

/// Validates candidate parent sets against the lineage stored in `S`.
///
/// Ancestors are read as of validation time. A concurrent writer changing an
/// ancestor's parents during the walk is not observed.
pub struct LineageValidator<'a, S: DistributiveStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: DistributiveStore + ?Sized> LineageValidator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Check that giving `subject` the parent set `parents` creates no loop.
    ///
    /// `subject` is compared by identity triple, not by key, so the check
    /// also works for a record that has not been stored yet.
    pub fn validate(&self, subject: &Identity, parents: &[RecordKey]) -> LineageResult<()> {
        let mut expanded = HashSet::new();
        self.visit(subject, subject, parents, &mut expanded)
    }

    fn visit(
        &self,
        subject: &Identity,
        child: &Identity,
        parents: &[RecordKey],
        expanded: &mut HashSet<RecordKey>,
    ) -> LineageResult<()> {
        for key in parents {
            let Some(parent) = self.store.get(key)? else {
                debug!(parent = %key.short_id(), "skipping dangling parent reference");
                continue;
            };

            if parent.identity == *subject {
                warn!(%subject, via = %child, "parent loop detected");
                return Err(LineageError::Cycle {
                    subject: subject.clone(),
                    via: child.clone(),
                });
            }

            // Each ancestor is expanded once; a foreign loop further up the
            // chain must not spin forever.
            if expanded.insert(*key) {
                self.visit(subject, &parent.identity, &parent.parents, expanded)?;
            }
        }
        Ok(())
    }
}
