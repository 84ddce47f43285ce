//! # End-to-End Signing Scenarios
//!
//! The canonical request sequences a signer sees in production: first
//! proposals, rebroadcasts, client retries, equivocation attempts, and
//! validators that were never registered.

#[cfg(test)]
mod tests {
    use crate::integration::{key, long_key};
    use signguard_engine::{
        DenialReason, InMemoryStore, SlashingProtection, SlashingProtectionService, Verdict,
    };
    use signguard_types::SigningRoot;

    const ROOT_1: SigningRoot = [0x11; 32];
    const ROOT_2: SigningRoot = [0x22; 32];

    fn make_service() -> SlashingProtectionService<InMemoryStore> {
        SlashingProtectionService::with_defaults(InMemoryStore::new())
    }

    #[test]
    fn test_proposal_lifecycle_first_rebroadcast_equivocation() {
        let service = make_service();
        let pk = long_key(0xA1);
        service.register_validators(&[pk.clone()]).unwrap();

        // First proposal at the slot.
        assert!(service.may_sign_block(&pk, &ROOT_1, 5).unwrap().is_approved());
        // Rebroadcast of the identical content.
        assert!(service.may_sign_block(&pk, &ROOT_1, 5).unwrap().is_approved());
        // Different content at the same slot: double proposal.
        assert!(!service.may_sign_block(&pk, &ROOT_2, 5).unwrap().is_approved());
        // The denial did not poison the slot for the recorded content.
        assert!(service.may_sign_block(&pk, &ROOT_1, 5).unwrap().is_approved());
    }

    #[test]
    fn test_unregistered_validator_denied_then_unlocked_by_registration() {
        let service = make_service();
        let pk = key(0xB2);

        let verdict = service.may_sign_block(&pk, &ROOT_1, 6).unwrap();
        assert_eq!(verdict, Verdict::Denied(DenialReason::UnknownValidator));

        service.register_validators(&[pk.clone()]).unwrap();
        assert!(service.may_sign_block(&pk, &ROOT_1, 6).unwrap().is_approved());
    }

    #[test]
    fn test_attestation_lifecycle_with_surround_and_repeat() {
        let service = make_service();
        let pk = long_key(0xC3);
        service.register_validators(&[pk.clone()]).unwrap();

        // First vote 1->2.
        assert!(service
            .may_sign_attestation(&pk, &ROOT_1, 1, 2)
            .unwrap()
            .is_approved());

        // Exact repeat stays allowed.
        assert!(service
            .may_sign_attestation(&pk, &ROOT_1, 1, 2)
            .unwrap()
            .is_approved());

        // A vote surrounding the recorded one is refused.
        let verdict = service.may_sign_attestation(&pk, &ROOT_2, 0, 3).unwrap();
        assert_eq!(
            verdict,
            Verdict::Denied(DenialReason::SurroundsPriorVote {
                prior_source: 1,
                prior_target: 2
            })
        );

        // A disjoint later vote proceeds.
        assert!(service
            .may_sign_attestation(&pk, &ROOT_2, 2, 3)
            .unwrap()
            .is_approved());
    }

    #[test]
    fn test_attestation_double_vote_denied_across_roots() {
        let service = make_service();
        let pk = long_key(0xD4);
        service.register_validators(&[pk.clone()]).unwrap();

        assert!(service
            .may_sign_attestation(&pk, &ROOT_1, 3, 4)
            .unwrap()
            .is_approved());

        let verdict = service.may_sign_attestation(&pk, &ROOT_2, 3, 4).unwrap();
        assert_eq!(
            verdict,
            Verdict::Denied(DenialReason::DoubleVote {
                target_epoch: 4,
                existing_root: ROOT_1
            })
        );
    }

    #[test]
    fn test_slots_and_validators_are_independent() {
        let service = make_service();
        let alice = long_key(0xE5);
        let bob = long_key(0xF6);
        service
            .register_validators(&[alice.clone(), bob.clone()])
            .unwrap();

        // Same root at different slots: fine.
        assert!(service.may_sign_block(&alice, &ROOT_1, 1).unwrap().is_approved());
        assert!(service.may_sign_block(&alice, &ROOT_1, 2).unwrap().is_approved());

        // Alice's history never binds Bob.
        assert!(service.may_sign_block(&alice, &ROOT_1, 3).unwrap().is_approved());
        assert!(service.may_sign_block(&bob, &ROOT_2, 3).unwrap().is_approved());
    }

    #[test]
    fn test_hex_ingested_key_matches_raw_key() {
        let service = make_service();
        let raw = signguard_types::PublicKey::from_bytes(vec![0xAB, 0xCD]).unwrap();
        let hexed = signguard_types::PublicKey::from_hex("0xabcd").unwrap();

        service.register_validators(&[raw]).unwrap();
        // The hex-parsed form resolves to the same identity.
        assert!(service.may_sign_block(&hexed, &ROOT_1, 9).unwrap().is_approved());
    }
}
