//! Deliverability folding over a record and its immediate parents.

use tracing::debug;

use distreg_store::DistributiveStore;

use crate::error::{RegistryError, RegistryResult};
use crate::request::Reference;
use crate::resolver::{describe, Resolver};

/// `true` iff the referenced record and each of its immediate parents are
/// flagged deliverable.
///
/// Inactive records count. A reference that matches nothing, or more than
/// one record, is reported deliverable. Grandparents are not consulted.
pub fn evaluate<S: DistributiveStore + ?Sized>(
    store: &S,
    reference: &Reference,
) -> RegistryResult<bool> {
    let record = match Resolver::new(store).resolve(reference, false) {
        Ok(record) => record,
        Err(e @ (RegistryError::NotFound(_) | RegistryError::Conflict(_))) => {
            debug!(reference = %describe(reference), error = %e, "treating unresolved reference as deliverable");
            return Ok(true);
        }
        Err(e) => return Err(e),
    };

    if !record.deliverable {
        debug!(subject = %record.identity, "not deliverable by own flag");
        return Ok(false);
    }

    for parent in store.get_batch(&record.parents)?.into_iter().flatten() {
        if !parent.deliverable {
            debug!(subject = %record.identity, parent = %parent.identity, "not deliverable by parent");
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Doubling;
    use distreg_store::InMemoryStore;
    use distreg_types::{Distributive, Identity, RecordKey};

    fn put(store: &InMemoryStore, version: &str, deliverable: bool, parents: Vec<RecordKey>) -> Distributive {
        let mut d = Distributive::new(
            Identity::new("APP", version, None).unwrap(),
            format!("p-{version}"),
            format!("c-{version}"),
            deliverable,
            "x",
        );
        d.set_parents(parents);
        store.insert(&d).unwrap();
        d
    }

    fn check(store: &InMemoryStore, version: &str) -> bool {
        evaluate(store, &Reference::identity("APP", version, None)).unwrap()
    }

    #[test]
    fn own_flag_decides_without_parents() {
        let store = InMemoryStore::new();
        put(&store, "1", true, vec![]);
        put(&store, "2", false, vec![]);
        assert!(check(&store, "1"));
        assert!(!check(&store, "2"));
    }

    #[test]
    fn immediate_parent_flag_counts() {
        let store = InMemoryStore::new();
        let bad = put(&store, "1", false, vec![]);
        let good = put(&store, "2", true, vec![]);
        put(&store, "3", true, vec![good.key, bad.key]);
        put(&store, "4", true, vec![good.key]);
        assert!(!check(&store, "3"));
        assert!(check(&store, "4"));
    }

    #[test]
    fn grandparents_are_not_consulted() {
        let store = InMemoryStore::new();
        let root = put(&store, "1", false, vec![]);
        let mid = put(&store, "2", true, vec![root.key]);
        put(&store, "3", true, vec![mid.key]);
        assert!(!check(&store, "2"));
        assert!(check(&store, "3"));
    }

    #[test]
    fn unresolved_reference_is_deliverable() {
        let store = InMemoryStore::new();
        assert!(check(&store, "9.9.9"));
    }

    #[test]
    fn ambiguous_reference_is_deliverable() {
        let inner = InMemoryStore::new();
        put(&inner, "1", false, vec![]);
        let store = Doubling(inner);

        let reference = Reference::identity("APP", "1", None);
        assert!(matches!(
            Resolver::new(&store).resolve(&reference, false),
            Err(RegistryError::Conflict(_))
        ));
        assert!(evaluate(&store, &reference).unwrap());
    }

    #[test]
    fn inactive_record_still_evaluated() {
        let store = InMemoryStore::new();
        let mut d = put(&store, "1", false, vec![]);
        d.remove_location(None);
        store.save(&d).unwrap();
        assert!(!check(&store, "1"));
    }

    #[test]
    fn dangling_parent_is_skipped() {
        let store = InMemoryStore::new();
        put(&store, "1", true, vec![RecordKey::new()]);
        assert!(check(&store, "1"));
    }

    #[test]
    fn malformed_reference_is_rejected() {
        let store = InMemoryStore::new();
        let r = Reference {
            kind: Some("APP".into()),
            ..Reference::default()
        };
        assert!(matches!(evaluate(&store, &r), Err(RegistryError::Validation(_))));
    }
}
