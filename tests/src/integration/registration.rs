//! # Registry Batch Semantics
//!
//! Registration order, idempotence, and lookup behavior through the
//! engine API and the registry component.

#[cfg(test)]
mod tests {
    use crate::integration::key;
    use signguard_engine::{
        InMemoryStore, SlashingProtection, SlashingProtectionService, TransactionalStore,
        ValidatorRegistry,
    };

    #[test]
    fn test_batch_registration_assigns_sequential_ids_in_input_order() {
        let store = InMemoryStore::new();
        let service = SlashingProtectionService::with_defaults(store.clone());

        service
            .register_validators(&[key(100), key(101), key(102)])
            .unwrap();

        let mut uow = store.begin().unwrap();
        let resolved = ValidatorRegistry::new(&mut uow)
            .resolve(&[key(100), key(101), key(102)])
            .unwrap();
        assert_eq!(resolved.len(), 3);
        assert_eq!(resolved[&key(100)].id.as_u64(), 1);
        assert_eq!(resolved[&key(101)].id.as_u64(), 2);
        assert_eq!(resolved[&key(102)].id.as_u64(), 3);
    }

    #[test]
    fn test_overlapping_batches_leave_exactly_three_identities() {
        let store = InMemoryStore::new();
        let service = SlashingProtectionService::with_defaults(store.clone());

        service.register_validators(&[key(1), key(2)]).unwrap();
        service.register_validators(&[key(2), key(3)]).unwrap();

        let mut uow = store.begin().unwrap();
        let resolved = ValidatorRegistry::new(&mut uow)
            .resolve(&[key(1), key(2), key(3)])
            .unwrap();
        assert_eq!(resolved.len(), 3);

        // Ids are stable across the two calls.
        assert_eq!(resolved[&key(1)].id.as_u64(), 1);
        assert_eq!(resolved[&key(2)].id.as_u64(), 2);
        assert_eq!(resolved[&key(3)].id.as_u64(), 3);
    }

    #[test]
    fn test_resolve_omits_unknown_keys() {
        let store = InMemoryStore::new();
        let service = SlashingProtectionService::with_defaults(store.clone());

        service.register_validators(&[key(101), key(102)]).unwrap();

        let mut uow = store.begin().unwrap();
        let resolved = ValidatorRegistry::new(&mut uow)
            .resolve(&[key(101), key(102), key(103)])
            .unwrap();
        assert_eq!(resolved.len(), 2);
        assert!(!resolved.contains_key(&key(103)));
    }

    #[test]
    fn test_registering_empty_batch_is_a_no_op() {
        let store = InMemoryStore::new();
        let service = SlashingProtectionService::with_defaults(store.clone());

        service.register_validators(&[]).unwrap();
        service.register_validators(&[key(7)]).unwrap();

        let mut uow = store.begin().unwrap();
        let resolved = ValidatorRegistry::new(&mut uow).resolve(&[key(7)]).unwrap();
        // The empty batch consumed no ids.
        assert_eq!(resolved[&key(7)].id.as_u64(), 1);
    }
}
