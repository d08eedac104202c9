//! Typed, sectioned settings backed by a single RON delta file.
//!
//! Each section is a plain struct implementing [`Settings`]. The store keeps the
//! effective value (defaults merged with the on-disk delta) and writes back only
//! the fields that differ from the defaults.

mod errors;
mod store;

pub use errors::SettingsError;
pub use store::{SettingsStore, SettingsStoreBuilder};

use serde::{de::DeserializeOwned, Serialize};

/// A settings section.
pub trait Settings: Default + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Top-level key of this section inside the settings file.
    const SECTION: &'static str;

    fn name() -> &'static str {
        Self::SECTION
    }
}
