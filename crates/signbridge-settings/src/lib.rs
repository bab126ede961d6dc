//! # signbridge-settings
//!
//! Configuration for the SignBridge server.
//!
//! Settings are loaded from layered sources (in priority order):
//! 1. **Compiled defaults**: [`SignBridgeSettings::default()`]
//! 2. **Settings file**: `signbridge.json` (deep-merged over defaults)
//! 3. **Environment variables**: `SIGNBRIDGE_*` overrides
//!
//! Command-line flags are applied on top by the binary.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{DEFAULT_SETTINGS_FILE, deep_merge, load_settings, load_settings_from_path};
pub use types::*;
