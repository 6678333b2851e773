use std::path::PathBuf;

use thiserror::Error;

/// Failures of the key-provisioning collaborator. Kept apart from codec
/// errors so a missing tool is never mistaken for a corrupt payload.
#[derive(Debug, Error)]
pub enum KeyProvisionError {
    #[error("Key generation tool is not available: {0}")]
    ToolMissing(String),
    #[error("Key generation failed: {0}")]
    GenerationFailed(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A provisioned key pair: the public half travels in the handshake packet,
/// the private half stays behind a path handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedKey {
    pub public_key: String,
    pub private_key_path: PathBuf,
}

/// External key-pair facility.
///
/// `reusable` asks for a long-lived key that may be returned again on later
/// calls; otherwise a fresh per-session key is expected.
pub trait KeyProvider {
    fn provision(&self, key_type: &str, reusable: bool) -> Result<ProvisionedKey, KeyProvisionError>;
}
