use std::cell::Cell;
use std::path::PathBuf;

use prompt_glyph::flags::{FeatureFlag, FeatureFlags, FlagCodecError};
use prompt_glyph::handshake::{
    HandshakeConfig, HandshakeError, HandshakeManager, KeyProvider, KeyProvisionError,
    ProvisionedKey,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

struct FakeKeys {
    reusable_requested: Cell<Option<bool>>,
}

impl FakeKeys {
    fn new() -> Self {
        Self {
            reusable_requested: Cell::new(None),
        }
    }
}

impl KeyProvider for FakeKeys {
    fn provision(&self, key_type: &str, reusable: bool) -> Result<ProvisionedKey, KeyProvisionError> {
        assert_eq!(key_type, "ed25519");
        self.reusable_requested.set(Some(reusable));
        Ok(ProvisionedKey {
            public_key: "ssh-ed25519 AAAACfakekey".to_string(),
            private_key_path: PathBuf::from("/tmp/keys/session"),
        })
    }
}

struct MissingTool;

impl KeyProvider for MissingTool {
    fn provision(&self, _key_type: &str, _reusable: bool) -> Result<ProvisionedKey, KeyProvisionError> {
        Err(KeyProvisionError::ToolMissing("ssh-keygen".to_string()))
    }
}

fn manager(flags: FeatureFlags) -> HandshakeManager {
    let config = HandshakeConfig {
        tokenizer_fingerprint: "unit-test-tokenizer".to_string(),
        ..HandshakeConfig::default()
    };
    HandshakeManager::new(config, flags)
}

#[test]
fn packet_round_trip() {
    let flags = FeatureFlags::with_flags([
        FeatureFlag::CoreAscii,
        FeatureFlag::DynamicPacks,
        FeatureFlag::ChecksumBlocks,
    ]);
    let manager = manager(flags.clone());
    let keys = FakeKeys::new();

    let artifacts = manager.prepare(&keys).unwrap();
    assert_eq!(artifacts.feature_payload, "~a~p~c");
    assert_eq!(artifacts.private_key_path, PathBuf::from("/tmp/keys/session"));
    assert_eq!(keys.reusable_requested.get(), Some(false));

    let packet = manager.build_packet(&artifacts);
    assert_eq!(
        packet,
        format!(
            "v=1.0|tok=unit-test-tokenizer|feat=~a~p~c|nonce={}|pub=ssh-ed25519 AAAACfakekey",
            artifacts.nonce
        )
    );

    let remote = manager.parse_packet(&packet).unwrap();
    assert_eq!(remote.protocol_version, "1.0");
    assert_eq!(remote.tokenizer, "unit-test-tokenizer");
    assert_eq!(remote.flags, flags);
}

#[test]
fn same_key_and_flags_never_share_a_nonce() {
    let manager = manager(FeatureFlags::with_flags([FeatureFlag::CoreAscii, FeatureFlag::ReusableKeys]));
    let keys = FakeKeys::new();

    let a = manager.prepare(&keys).unwrap();
    let b = manager.prepare(&keys).unwrap();

    assert_eq!(a.public_key, b.public_key);
    assert_eq!(a.feature_payload, b.feature_payload);
    assert_ne!(a.nonce, b.nonce);
    assert_eq!(a.nonce.len(), 24);
    assert!(a.nonce.chars().all(|ch| ch.is_ascii_hexdigit()));
}

#[test]
fn seeded_rng_gives_reproducible_nonce() {
    let manager = manager(FeatureFlags::default());
    let keys = FakeKeys::new();

    let a = manager.prepare_with_rng(&keys, &mut StdRng::seed_from_u64(7)).unwrap();
    let b = manager.prepare_with_rng(&keys, &mut StdRng::seed_from_u64(7)).unwrap();
    let c = manager.prepare_with_rng(&keys, &mut StdRng::seed_from_u64(8)).unwrap();

    assert_eq!(a.nonce, b.nonce);
    assert_ne!(a.nonce, c.nonce);
    assert!(b.issued_at >= a.issued_at);
}

#[test]
fn reusable_keys_flag_reaches_provider() {
    let manager = manager(FeatureFlags::with_flags([FeatureFlag::CoreAscii, FeatureFlag::ReusableKeys]));
    let keys = FakeKeys::new();
    manager.prepare(&keys).unwrap();
    assert_eq!(keys.reusable_requested.get(), Some(true));
}

#[test]
fn provider_failure_is_reported_separately() {
    let manager = manager(FeatureFlags::default());
    match manager.prepare(&MissingTool) {
        Err(HandshakeError::KeyProvisioning(KeyProvisionError::ToolMissing(tool))) => {
            assert_eq!(tool, "ssh-keygen");
        }
        other => panic!("expected key provisioning error, got {other:?}"),
    }
}

#[test]
fn corrupt_flag_field_propagates_codec_error() {
    let manager = manager(FeatureFlags::default());
    match manager.parse_packet("v=1.0|tok=x|feat=~a~z|nonce=00") {
        Err(HandshakeError::Flags(FlagCodecError::MalformedFlagPayload { remainder })) => {
            assert_eq!(remainder, "~z");
        }
        other => panic!("expected flag codec error, got {other:?}"),
    }
}

#[test]
fn missing_fields() {
    let manager = manager(FeatureFlags::default());

    match manager.parse_packet("v=1.0|tok=x") {
        Err(HandshakeError::MissingField(name)) => assert_eq!(name, "feat"),
        other => panic!("expected missing field error, got {other:?}"),
    }

    let remote = manager.parse_packet("garbage|feat=~r").unwrap();
    assert_eq!(remote.protocol_version, "");
    assert_eq!(remote.tokenizer, "");
    assert!(remote.flags.contains(FeatureFlag::RelationalContext));
}
