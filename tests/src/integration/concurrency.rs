//! # Racing Requests
//!
//! The properties that only hold (or break) under interleaving: racing
//! proposals for one slot, racing attestations with conflicting spans,
//! and concurrent registration of overlapping key sets.

#[cfg(test)]
mod tests {
    use crate::integration::long_key;
    use signguard_engine::{
        InMemoryStore, SlashingProtection, SlashingProtectionService, TransactionalStore,
        UnitOfWork, ValidatorRegistry,
    };
    use signguard_types::{PublicKey, SigningRoot, ValidatorId};

    fn registered_service(
        pk: &PublicKey,
    ) -> (SlashingProtectionService<InMemoryStore>, InMemoryStore) {
        let store = InMemoryStore::new();
        let service = SlashingProtectionService::with_defaults(store.clone());
        service.register_validators(&[pk.clone()]).unwrap();
        (service, store)
    }

    fn resolved_id(store: &InMemoryStore, pk: &PublicKey) -> ValidatorId {
        let mut uow = store.begin().unwrap();
        ValidatorRegistry::new(&mut uow)
            .resolve_one(pk)
            .unwrap()
            .unwrap()
            .id
    }

    #[test]
    fn test_racing_proposals_exactly_one_root_wins() {
        crate::integration::init_logging();

        const WRITERS: usize = 8;
        let pk = long_key(0xA7);
        let (service, store) = registered_service(&pk);

        let roots: Vec<SigningRoot> = (0..WRITERS)
            .map(|i| {
                let mut root = [0u8; 32];
                root[0] = i as u8 + 1;
                root
            })
            .collect();

        let approvals: Vec<bool> = std::thread::scope(|scope| {
            let handles: Vec<_> = roots
                .iter()
                .map(|root| {
                    let service = &service;
                    let pk = pk.clone();
                    scope.spawn(move || {
                        service.may_sign_block(&pk, root, 42).unwrap().is_approved()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let winners: Vec<usize> = approvals
            .iter()
            .enumerate()
            .filter_map(|(i, approved)| approved.then_some(i))
            .collect();
        assert_eq!(winners.len(), 1, "exactly one root may win slot 42");

        // The durable root is the winner's root.
        let id = resolved_id(&store, &pk);
        let mut uow = store.begin().unwrap();
        let stored = uow.find_block(id, 42).unwrap().unwrap();
        assert_eq!(stored.signing_root, roots[winners[0]]);
    }

    #[test]
    fn test_racing_identical_proposals_all_approved_one_record() {
        const WRITERS: usize = 8;
        let pk = long_key(0xB8);
        let (service, store) = registered_service(&pk);
        let root: SigningRoot = [0x5A; 32];

        let approvals: Vec<bool> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..WRITERS)
                .map(|_| {
                    let service = &service;
                    let pk = pk.clone();
                    scope.spawn(move || {
                        service.may_sign_block(&pk, &root, 7).unwrap().is_approved()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        // Identical content never equivocates, no matter the interleaving.
        assert!(approvals.iter().all(|&a| a));

        let id = resolved_id(&store, &pk);
        let mut uow = store.begin().unwrap();
        assert_eq!(
            uow.find_block(id, 7).unwrap().unwrap().signing_root,
            root
        );
    }

    #[test]
    fn test_racing_conflicting_attestation_spans_at_most_one_wins() {
        let pk = long_key(0xC9);
        let (service, store) = registered_service(&pk);

        // 2->3 and 1->4 mutually surround; both can never be recorded.
        let spans = [(2u64, 3u64), (1, 4)];

        let approvals: Vec<bool> = std::thread::scope(|scope| {
            let handles: Vec<_> = spans
                .iter()
                .map(|&(source, target)| {
                    let service = &service;
                    let pk = pk.clone();
                    scope.spawn(move || {
                        let root: SigningRoot = [target as u8; 32];
                        service
                            .may_sign_attestation(&pk, &root, source, target)
                            .unwrap()
                            .is_approved()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(
            approvals.iter().filter(|&&a| a).count(),
            1,
            "conflicting spans must not both be approved"
        );

        let id = resolved_id(&store, &pk);
        let mut uow = store.begin().unwrap();
        assert_eq!(uow.find_attestations(id, 0).unwrap().len(), 1);
    }

    #[test]
    fn test_concurrent_overlapping_registration_never_duplicates() {
        let store = InMemoryStore::new();
        let service = SlashingProtectionService::with_defaults(store.clone());

        let batches: Vec<Vec<PublicKey>> = (0..4)
            .map(|i| (i..i + 5).map(|b| long_key(b as u8)).collect())
            .collect();

        std::thread::scope(|scope| {
            for batch in &batches {
                let service = &service;
                scope.spawn(move || service.register_validators(batch).unwrap());
            }
        });

        // Windows 0..5 through 3..8 overlap into eight distinct keys,
        // each with exactly one identity.
        let all_keys: Vec<PublicKey> = (0..8).map(|b| long_key(b as u8)).collect();
        let mut uow = store.begin().unwrap();
        let resolved = ValidatorRegistry::new(&mut uow).resolve(&all_keys).unwrap();
        assert_eq!(resolved.len(), 8);

        let mut ids: Vec<u64> = resolved.values().map(|v| v.id.as_u64()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 8, "no id may be assigned twice");
        assert_eq!(*ids.last().unwrap(), 8, "ids stay dense under races");
    }
}
