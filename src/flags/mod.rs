//! Feature-flag codec: named capability toggles packed into a short string.

pub mod flag;
pub mod tokens;

pub use flag::{FeatureFlag, FeatureFlags, FeatureToggles};
pub use tokens::{FeatureTokenSet, FlagCodecError, TokenSetError};
