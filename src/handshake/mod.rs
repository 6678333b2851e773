//! Session handshake packets.
//!
//! A handshake advertises the protocol version, the tokenizer both ends
//! count against, the negotiated feature flags, a nonce, and the session
//! public key. Key generation itself is delegated to a [`KeyProvider`].

pub mod keys;
mod packet;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flags::{FeatureFlags, FlagCodecError};
pub use keys::{KeyProvider, KeyProvisionError, ProvisionedKey};

const NONCE_BYTES: usize = 12;

#[derive(Debug, Error)]
pub enum HandshakeError {
    #[error("Key provisioning failed: {0}")]
    KeyProvisioning(#[from] KeyProvisionError),
    #[error("Feature flag payload rejected: {0}")]
    Flags(#[from] FlagCodecError),
    #[error("Handshake packet is missing field {0:?}")]
    MissingField(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandshakeConfig {
    pub protocol_version: String,
    pub tokenizer_fingerprint: String,
    pub key_type: String,
}

impl Default for HandshakeConfig {
    fn default() -> Self {
        Self {
            protocol_version: "1.0".into(),
            tokenizer_fingerprint: "gpt-4o-mini".into(),
            key_type: "ed25519".into(),
        }
    }
}

/// Everything needed to emit one handshake packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandshakeArtifacts {
    pub public_key: String,
    pub private_key_path: PathBuf,
    pub feature_payload: String,
    pub nonce: String,
    pub issued_at: DateTime<Utc>,
}

/// What a peer announced in its packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteHandshake {
    pub protocol_version: String,
    pub tokenizer: String,
    pub flags: FeatureFlags,
}

pub struct HandshakeManager {
    config: HandshakeConfig,
    feature_flags: FeatureFlags,
}

impl HandshakeManager {
    pub fn new(config: HandshakeConfig, feature_flags: FeatureFlags) -> Self {
        Self {
            config,
            feature_flags,
        }
    }

    pub fn config(&self) -> &HandshakeConfig {
        &self.config
    }

    pub fn feature_flags(&self) -> &FeatureFlags {
        &self.feature_flags
    }

    /// Provisions a key pair and draws a fresh nonce from the thread RNG.
    pub fn prepare(&self, provider: &dyn KeyProvider) -> Result<HandshakeArtifacts, HandshakeError> {
        self.prepare_with_rng(provider, &mut rand::thread_rng())
    }

    /// As [`prepare`](Self::prepare), drawing the nonce from `rng`.
    pub fn prepare_with_rng<R: RngCore + ?Sized>(
        &self,
        provider: &dyn KeyProvider,
        rng: &mut R,
    ) -> Result<HandshakeArtifacts, HandshakeError> {
        let reusable = self.feature_flags.wants_reusable_keys();
        let key = provider.provision(&self.config.key_type, reusable)?;
        let feature_payload = self.feature_flags.as_payload();
        let nonce = draw_nonce(rng);

        tracing::debug!(key_type = %self.config.key_type, reusable, "prepared handshake");

        Ok(HandshakeArtifacts {
            public_key: key.public_key,
            private_key_path: key.private_key_path,
            feature_payload,
            nonce,
            issued_at: Utc::now(),
        })
    }

    /// `v=..|tok=..|feat=..|nonce=..|pub=..`
    pub fn build_packet(&self, artifacts: &HandshakeArtifacts) -> String {
        packet::join_fields(&[
            (packet::VERSION_FIELD, self.config.protocol_version.as_str()),
            (packet::TOKENIZER_FIELD, self.config.tokenizer_fingerprint.as_str()),
            (packet::FEATURES_FIELD, artifacts.feature_payload.as_str()),
            (packet::NONCE_FIELD, artifacts.nonce.as_str()),
            (packet::PUBLIC_KEY_FIELD, artifacts.public_key.as_str()),
        ])
    }

    /// Reads a peer packet. Flags are decoded with the local token alphabet.
    pub fn parse_packet(&self, raw: &str) -> Result<RemoteHandshake, HandshakeError> {
        let fields = packet::split_fields(raw);
        let feature_payload = fields
            .get(packet::FEATURES_FIELD)
            .ok_or(HandshakeError::MissingField(packet::FEATURES_FIELD))?;
        let flags = FeatureFlags::from_payload(feature_payload, self.feature_flags.tokens().clone())?;

        Ok(RemoteHandshake {
            protocol_version: fields.get(packet::VERSION_FIELD).unwrap_or(&"").to_string(),
            tokenizer: fields.get(packet::TOKENIZER_FIELD).unwrap_or(&"").to_string(),
            flags,
        })
    }
}

fn draw_nonce<R: RngCore + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0u8; NONCE_BYTES];
    rng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
