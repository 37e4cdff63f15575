//! Store-backed authorization.

use recordgate_core::{Height, PermissionLabel, Principal, RecordId};
use recordgate_perms::evaluate;
use recordgate_store::{Result, Store};

/// Decide whether `accessor` may act on `owner`'s record with `required`.
///
/// The owner short-circuits before any lookup. Read-only: never touches the
/// access log.
pub async fn decide<S: Store + ?Sized>(
    store: &S,
    owner: &Principal,
    record_id: &RecordId,
    accessor: &Principal,
    required: PermissionLabel,
    now: Height,
) -> Result<bool> {
    if accessor == owner {
        return Ok(true);
    }

    let grant = store.get_grant(owner, record_id, accessor).await?;
    Ok(evaluate(owner, accessor, grant.as_ref(), required, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use recordgate_core::Keypair;
    use recordgate_perms::Grant;
    use recordgate_store::MemoryStore;

    fn principal(seed: u8) -> Principal {
        Keypair::from_seed(&[seed; 32]).principal()
    }

    #[tokio::test]
    async fn test_owner_needs_no_grant() {
        let store = MemoryStore::new();
        let owner = principal(1);
        let id = RecordId::new("id1");

        for label in PermissionLabel::ALL {
            assert!(decide(&store, &owner, &id, &owner, label, Height(9)).await.unwrap());
        }
    }

    #[tokio::test]
    async fn test_grant_is_looked_up_per_accessor() {
        let store = MemoryStore::new();
        let (owner, reader, stranger) = (principal(1), principal(2), principal(3));
        let id = RecordId::new("id1");

        store
            .put_grant(&Grant::new(owner, id.clone(), reader, PermissionLabel::Read).expires_at(100))
            .await
            .unwrap();

        assert!(decide(&store, &owner, &id, &reader, PermissionLabel::Read, Height(99)).await.unwrap());
        assert!(!decide(&store, &owner, &id, &reader, PermissionLabel::Read, Height(100)).await.unwrap());
        assert!(!decide(&store, &owner, &id, &reader, PermissionLabel::Write, Height(1)).await.unwrap());
        assert!(!decide(&store, &owner, &id, &stranger, PermissionLabel::Read, Height(1)).await.unwrap());
    }
}
