//! `/health` endpoint body.

use std::time::Instant;

use serde::Serialize;
use signbridge_core::Dictionaries;

/// Entry counts for the loaded dictionaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DictionaryCounts {
    /// Word entries.
    pub words: usize,
    /// Alphabet entries.
    pub alphabet: usize,
    /// Number entries.
    pub numbers: usize,
}

impl From<&Dictionaries> for DictionaryCounts {
    fn from(dicts: &Dictionaries) -> Self {
        Self {
            words: dicts.words.len(),
            alphabet: dicts.alphabet.len(),
            numbers: dicts.numbers.len(),
        }
    }
}

/// Health check response body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the server is running.
    pub status: String,
    /// Seconds since the server started.
    pub uptime_secs: u64,
    /// Current `WebSocket` connection count.
    pub connections: usize,
    /// Loaded dictionary sizes.
    pub dictionary: DictionaryCounts,
}

/// Build a health response from live counters.
pub fn health_check(
    start_time: Instant,
    connections: usize,
    dictionary: DictionaryCounts,
) -> HealthResponse {
    HealthResponse {
        status: "ok".into(),
        uptime_secs: start_time.elapsed().as_secs(),
        connections,
        dictionary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts() -> DictionaryCounts {
        DictionaryCounts::from(&Dictionaries::new(
            [("a", "1"), ("b", "2")].into_iter().collect(),
            [("x", "3")].into_iter().collect(),
            signbridge_core::Dictionary::new(),
        ))
    }

    #[test]
    fn status_is_ok() {
        let resp = health_check(Instant::now(), 0, counts());
        assert_eq!(resp.status, "ok");
        assert!(resp.uptime_secs < 2);
    }

    #[test]
    fn uptime_increases() {
        let start = Instant::now()
            .checked_sub(std::time::Duration::from_secs(60))
            .unwrap();
        let resp = health_check(start, 0, counts());
        assert!(resp.uptime_secs >= 59);
    }

    #[test]
    fn serialization() {
        let resp = health_check(Instant::now(), 3, counts());
        let parsed = serde_json::to_value(&resp).unwrap();
        assert_eq!(parsed["status"], "ok");
        assert_eq!(parsed["connections"], 3);
        assert_eq!(parsed["dictionary"]["words"], 2);
        assert_eq!(parsed["dictionary"]["alphabet"], 1);
        assert_eq!(parsed["dictionary"]["numbers"], 0);
        assert!(parsed["uptime_secs"].is_number());
    }
}
