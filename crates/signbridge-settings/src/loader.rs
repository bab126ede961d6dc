//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`SignBridgeSettings::default()`]
//! 2. If the settings file exists, deep-merge its values over defaults
//! 3. Apply `SIGNBRIDGE_*` environment variable overrides
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::SignBridgeSettings;

/// Settings file looked up in the working directory when none is given.
pub const DEFAULT_SETTINGS_FILE: &str = "signbridge.json";

/// Load settings from [`DEFAULT_SETTINGS_FILE`] with env var overrides.
pub fn load_settings() -> Result<SignBridgeSettings> {
    load_settings_from_path(Path::new(DEFAULT_SETTINGS_FILE))
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<SignBridgeSettings> {
    let mut settings = read_settings_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Defaults merged with the file at `path`, without env overrides.
pub fn read_settings_file(path: &Path) -> Result<SignBridgeSettings> {
    let defaults = serde_json::to_value(SignBridgeSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    Ok(serde_json::from_value(merged)?)
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply environment variable overrides to loaded settings.
///
/// Invalid values are ignored with a warning.
pub fn apply_env_overrides(settings: &mut SignBridgeSettings) {
    apply_overrides(settings, |name| std::env::var(name).ok());
}

/// Apply overrides read through `lookup`, so tests can supply variables
/// without touching the process environment.
pub fn apply_overrides<F>(settings: &mut SignBridgeSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    // ── Server ──────────────────────────────────────────────────────
    if let Some(v) = read_string(&lookup, "SIGNBRIDGE_HOST") {
        settings.server.host = v;
    }
    if let Some(v) = read_parsed(&lookup, "SIGNBRIDGE_PORT", |v| v.parse::<u16>().ok()) {
        settings.server.port = v;
    }
    if let Some(v) = read_parsed(&lookup, "SIGNBRIDGE_MAX_MESSAGE_SIZE", |v| {
        parse_usize_range(v, 1024, 64 * 1024 * 1024)
    }) {
        settings.server.max_message_size = v;
    }

    // ── Data ────────────────────────────────────────────────────────
    if let Some(v) = read_string(&lookup, "SIGNBRIDGE_DATA_DIR") {
        settings.data.dir = PathBuf::from(v);
    }

    // ── Quiz ────────────────────────────────────────────────────────
    if let Some(v) = read_parsed(&lookup, "SIGNBRIDGE_QUIZ_SEED", |v| v.parse::<u64>().ok()) {
        settings.quiz.seed = Some(v);
    }

    // ── Logging ─────────────────────────────────────────────────────
    if let Some(v) = read_parsed(&lookup, "SIGNBRIDGE_LOG_LEVEL", parse_level) {
        settings.logging.level = v.to_string();
    }
    if let Some(v) = read_parsed(&lookup, "SIGNBRIDGE_LOG_JSON", parse_bool) {
        settings.logging.json = v;
    }
}

// ── Env var readers (thin wrappers) ─────────────────────────────────────────

fn read_string<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|v| !v.is_empty())
}

fn read_parsed<F, T>(lookup: &F, name: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
{
    let val = lookup(name)?;
    let result = parse(&val);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid env var, ignoring");
    }
    result
}

// ── Pure parsing functions ──────────────────────────────────────────────────

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a string as a `usize` within a range.
pub fn parse_usize_range(val: &str, min: usize, max: usize) -> Option<usize> {
    let n: usize = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

/// Validate a log level name.
pub fn parse_level(val: &str) -> Option<&'static str> {
    match val.to_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" => Some("warn"),
        "error" => Some("error"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SettingsError;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    // ── deep_merge ──────────────────────────────────────────────────

    #[test]
    fn merge_nested_override() {
        let target = serde_json::json!({"server": {"port": 8000, "host": "0.0.0.0"}});
        let source = serde_json::json!({"server": {"port": 9090}});
        let merged = deep_merge(target, source);
        assert_eq!(merged["server"]["port"], 9090);
        assert_eq!(merged["server"]["host"], "0.0.0.0");
    }

    #[test]
    fn merge_null_preserves_target() {
        let target = serde_json::json!({"a": 1, "b": 2});
        let source = serde_json::json!({"a": null});
        let merged = deep_merge(target, source);
        assert_eq!(merged["a"], 1);
        assert_eq!(merged["b"], 2);
    }

    #[test]
    fn merge_primitive_replaces_object() {
        let target = serde_json::json!({"a": {"nested": true}});
        let source = serde_json::json!({"a": 42});
        assert_eq!(deep_merge(target, source)["a"], 42);
    }

    // ── read_settings_file ──────────────────────────────────────────

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let s = read_settings_file(&dir.path().join("absent.json")).unwrap();
        assert_eq!(s, SignBridgeSettings::default());
    }

    #[test]
    fn file_values_merge_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signbridge.json");
        std::fs::write(
            &path,
            r#"{"server":{"port":9999},"data":{"dir":"/srv/signs"},"logging":{"json":false}}"#,
        )
        .unwrap();
        let s = read_settings_file(&path).unwrap();
        assert_eq!(s.server.port, 9999);
        assert_eq!(s.server.host, "0.0.0.0");
        assert_eq!(s.data.dir, PathBuf::from("/srv/signs"));
        assert!(!s.logging.json);
        assert_eq!(s.logging.level, "info");
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signbridge.json");
        std::fs::write(&path, "{nope").unwrap();
        let err = read_settings_file(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
    }

    // ── overrides ───────────────────────────────────────────────────

    #[test]
    fn env_overrides_apply() {
        let mut s = SignBridgeSettings::default();
        apply_overrides(
            &mut s,
            env(&[
                ("SIGNBRIDGE_HOST", "127.0.0.1"),
                ("SIGNBRIDGE_PORT", "3000"),
                ("SIGNBRIDGE_DATA_DIR", "/data"),
                ("SIGNBRIDGE_QUIZ_SEED", "12"),
                ("SIGNBRIDGE_LOG_LEVEL", "DEBUG"),
                ("SIGNBRIDGE_LOG_JSON", "off"),
                ("SIGNBRIDGE_MAX_MESSAGE_SIZE", "4096"),
            ]),
        );
        assert_eq!(s.server.host, "127.0.0.1");
        assert_eq!(s.server.port, 3000);
        assert_eq!(s.server.max_message_size, 4096);
        assert_eq!(s.data.dir, PathBuf::from("/data"));
        assert_eq!(s.quiz.seed, Some(12));
        assert_eq!(s.logging.level, "debug");
        assert!(!s.logging.json);
    }

    #[test]
    fn invalid_env_values_are_ignored() {
        let mut s = SignBridgeSettings::default();
        apply_overrides(
            &mut s,
            env(&[
                ("SIGNBRIDGE_PORT", "99999"),
                ("SIGNBRIDGE_QUIZ_SEED", "-1"),
                ("SIGNBRIDGE_LOG_LEVEL", "loud"),
                ("SIGNBRIDGE_LOG_JSON", "maybe"),
                ("SIGNBRIDGE_MAX_MESSAGE_SIZE", "1"),
                ("SIGNBRIDGE_HOST", ""),
            ]),
        );
        assert_eq!(s, SignBridgeSettings::default());
    }

    #[test]
    fn no_env_leaves_settings_untouched() {
        let mut s = SignBridgeSettings::default();
        apply_overrides(&mut s, |_| None);
        assert_eq!(s, SignBridgeSettings::default());
    }

    // ── parsers ─────────────────────────────────────────────────────

    #[test]
    fn parse_bool_variants() {
        for v in ["true", "1", "YES", "On"] {
            assert_eq!(parse_bool(v), Some(true));
        }
        for v in ["false", "0", "no", "OFF"] {
            assert_eq!(parse_bool(v), Some(false));
        }
        assert_eq!(parse_bool("2"), None);
    }

    #[test]
    fn parse_usize_range_bounds() {
        assert_eq!(parse_usize_range("10", 1, 10), Some(10));
        assert_eq!(parse_usize_range("11", 1, 10), None);
        assert_eq!(parse_usize_range("x", 1, 10), None);
    }

    #[test]
    fn parse_level_names() {
        assert_eq!(parse_level("Warn"), Some("warn"));
        assert_eq!(parse_level("verbose"), None);
    }
}
