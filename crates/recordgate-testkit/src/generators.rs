//! Proptest generators for property-based testing.

use proptest::prelude::*;

use recordgate_core::{Keypair, PermissionLabel, Principal};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a random principal.
pub fn principal() -> impl Strategy<Value = Principal> {
    any::<[u8; 32]>().prop_map(Principal::from_bytes)
}

/// Generate any permission label, `none` included.
pub fn label() -> impl Strategy<Value = PermissionLabel> {
    prop_oneof![
        Just(PermissionLabel::Read),
        Just(PermissionLabel::Write),
        Just(PermissionLabel::Admin),
        Just(PermissionLabel::None),
    ]
}

/// Generate a label an operation can require; `admin` is only ever held.
pub fn required_label() -> impl Strategy<Value = PermissionLabel> {
    prop_oneof![Just(PermissionLabel::Read), Just(PermissionLabel::Write)]
}

/// Generate a record id that passes validation.
pub fn record_id() -> impl Strategy<Value = String> {
    "[a-z0-9][a-z0-9-]{0,35}".prop_map(String::from)
}

/// Generate a record id longer than the default ceiling.
pub fn oversized_record_id() -> impl Strategy<Value = String> {
    "[a-z]{37,64}".prop_map(String::from)
}

/// Generate non-empty content within the default ceiling.
pub fn content() -> impl Strategy<Value = String> {
    "[ -~]{1,256}".prop_map(String::from)
}

/// Generate a content type.
pub fn content_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("note".to_string()),
        Just("text/plain".to_string()),
        "[a-z]{1,16}/[a-z]{1,16}".prop_map(String::from),
    ]
}

/// Parameters for a grant made at height `at`.
///
/// `expiration` is always accepted at `at`: zero, or strictly above it.
#[derive(Debug, Clone)]
pub struct GrantParams {
    pub label: PermissionLabel,
    pub at: u64,
    pub expiration: u64,
    pub revocable: bool,
}

impl Arbitrary for GrantParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            label(),
            1u64..=10_000,                   // at
            prop::option::of(1u64..=10_000), // lifetime, None = never expires
            any::<bool>(),
        )
            .prop_map(|(label, at, lifetime, revocable)| GrantParams {
                label,
                at,
                expiration: lifetime.map_or(0, |l| at + l),
                revocable,
            })
            .boxed()
    }
}
