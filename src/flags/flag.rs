use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::flags::tokens::{FeatureTokenSet, FlagCodecError};

/// Protocol capabilities negotiated per session.
///
/// Declaration order is the wire order of the flag codec. New flags go at
/// the end; variants are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureFlag {
    CoreAscii,
    UnicodeOverlay,
    Serialization,
    DynamicPacks,
    RelationalContext,
    ChecksumBlocks,
    ToolIntegration,
    ReusableKeys,
}

impl FeatureFlag {
    pub const ALL: [FeatureFlag; 8] = [
        FeatureFlag::CoreAscii,
        FeatureFlag::UnicodeOverlay,
        FeatureFlag::Serialization,
        FeatureFlag::DynamicPacks,
        FeatureFlag::RelationalContext,
        FeatureFlag::ChecksumBlocks,
        FeatureFlag::ToolIntegration,
        FeatureFlag::ReusableKeys,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureFlag::CoreAscii => "core-ascii",
            FeatureFlag::UnicodeOverlay => "unicode-overlay",
            FeatureFlag::Serialization => "serialization",
            FeatureFlag::DynamicPacks => "dynamic-packs",
            FeatureFlag::RelationalContext => "relational-context",
            FeatureFlag::ChecksumBlocks => "checksum-blocks",
            FeatureFlag::ToolIntegration => "tool-integration",
            FeatureFlag::ReusableKeys => "reusable-keys",
        }
    }
}

impl fmt::Display for FeatureFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean switches a session request can set.
///
/// Core ASCII is always on and has no switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureToggles {
    pub allow_reusable_keys: bool,
    pub preload_unicode_overlay: bool,
    pub preload_serialization: bool,
    pub enable_dynamic_packs: bool,
    pub enable_relational_context: bool,
    pub enable_checksums: bool,
    pub enable_tool_integration: bool,
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self {
            allow_reusable_keys: false,
            preload_unicode_overlay: false,
            preload_serialization: false,
            enable_dynamic_packs: true,
            enable_relational_context: true,
            enable_checksums: true,
            enable_tool_integration: false,
        }
    }
}

/// An enabled flag set bound to the token alphabet used to transmit it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureFlags {
    enabled: BTreeSet<FeatureFlag>,
    tokens: FeatureTokenSet,
}

impl FeatureFlags {
    pub fn new(enabled: impl IntoIterator<Item = FeatureFlag>, tokens: FeatureTokenSet) -> Self {
        Self {
            enabled: enabled.into_iter().collect(),
            tokens,
        }
    }

    /// A set with the reference token alphabet.
    pub fn with_flags(enabled: impl IntoIterator<Item = FeatureFlag>) -> Self {
        Self::new(enabled, FeatureTokenSet::reference())
    }

    pub fn from_toggles(toggles: &FeatureToggles) -> Self {
        let switches = [
            (toggles.enable_dynamic_packs, FeatureFlag::DynamicPacks),
            (toggles.enable_relational_context, FeatureFlag::RelationalContext),
            (toggles.enable_checksums, FeatureFlag::ChecksumBlocks),
            (toggles.preload_unicode_overlay, FeatureFlag::UnicodeOverlay),
            (toggles.preload_serialization, FeatureFlag::Serialization),
            (toggles.allow_reusable_keys, FeatureFlag::ReusableKeys),
            (toggles.enable_tool_integration, FeatureFlag::ToolIntegration),
        ];

        let mut flags = Self::default();
        for (on, flag) in switches {
            if on {
                flags.enable(flag);
            }
        }
        flags
    }

    pub fn from_payload(payload: &str, tokens: FeatureTokenSet) -> Result<Self, FlagCodecError> {
        let enabled = tokens.decode(payload)?;
        Ok(Self { enabled, tokens })
    }

    pub fn enable(&mut self, flag: FeatureFlag) {
        self.enabled.insert(flag);
    }

    pub fn disable(&mut self, flag: FeatureFlag) {
        self.enabled.remove(&flag);
    }

    pub fn contains(&self, flag: FeatureFlag) -> bool {
        self.enabled.contains(&flag)
    }

    pub fn enabled(&self) -> &BTreeSet<FeatureFlag> {
        &self.enabled
    }

    pub fn tokens(&self) -> &FeatureTokenSet {
        &self.tokens
    }

    /// The codec string for the enabled set.
    pub fn as_payload(&self) -> String {
        self.tokens.encode(&self.enabled)
    }

    pub fn requires_unicode_support(&self) -> bool {
        self.contains(FeatureFlag::UnicodeOverlay)
    }

    pub fn requires_serialization(&self) -> bool {
        self.contains(FeatureFlag::Serialization)
    }

    pub fn wants_reusable_keys(&self) -> bool {
        self.contains(FeatureFlag::ReusableKeys)
    }

    /// Every defined flag and whether it is on.
    pub fn summary(&self) -> BTreeMap<String, bool> {
        FeatureFlag::ALL
            .iter()
            .map(|flag| (flag.as_str().to_string(), self.contains(*flag)))
            .collect()
    }
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self::with_flags([FeatureFlag::CoreAscii])
    }
}
