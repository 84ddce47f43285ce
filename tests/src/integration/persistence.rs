//! # History Across Restarts
//!
//! A signer that forgets its history on restart is not a slashing
//! protection. These scenarios restart the file-backed store between
//! requests and check the engine still refuses what it refused before.

#[cfg(test)]
mod tests {
    use crate::integration::long_key;
    use signguard_engine::{
        FileBackedStore, SlashingProtection, SlashingProtectionService, StoreError,
    };
    use signguard_types::SigningRoot;

    #[test]
    fn test_double_proposal_still_denied_after_restart() {
        let dir = tempfile::tempdir().unwrap();
        let pk = long_key(0x11);
        let first_root: SigningRoot = rand::random();
        let second_root: SigningRoot = rand::random();

        {
            let store = FileBackedStore::open(dir.path()).unwrap();
            let service = SlashingProtectionService::with_defaults(store);
            service.register_validators(&[pk.clone()]).unwrap();
            assert!(service
                .may_sign_block(&pk, &first_root, 5)
                .unwrap()
                .is_approved());
        }

        let store = FileBackedStore::open(dir.path()).unwrap();
        let service = SlashingProtectionService::with_defaults(store);

        // The identity and the record both survived the restart.
        assert!(service
            .may_sign_block(&pk, &first_root, 5)
            .unwrap()
            .is_approved());
        assert!(!service
            .may_sign_block(&pk, &second_root, 5)
            .unwrap()
            .is_approved());
    }

    #[test]
    fn test_surround_protection_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let pk = long_key(0x22);
        let root: SigningRoot = rand::random();

        {
            let store = FileBackedStore::open(dir.path()).unwrap();
            let service = SlashingProtectionService::with_defaults(store);
            service.register_validators(&[pk.clone()]).unwrap();
            assert!(service
                .may_sign_attestation(&pk, &root, 2, 3)
                .unwrap()
                .is_approved());
        }

        let store = FileBackedStore::open(dir.path()).unwrap();
        let service = SlashingProtectionService::with_defaults(store);
        let other: SigningRoot = rand::random();
        assert!(!service
            .may_sign_attestation(&pk, &other, 1, 4)
            .unwrap()
            .is_approved());
    }

    #[test]
    fn test_two_signers_cannot_share_a_history_directory() {
        let dir = tempfile::tempdir().unwrap();

        let _running = FileBackedStore::open(dir.path()).unwrap();
        match FileBackedStore::open(dir.path()) {
            Err(StoreError::Locked { .. }) => {}
            other => panic!("expected Locked, got {:?}", other.map(|_| ())),
        }
    }
}
