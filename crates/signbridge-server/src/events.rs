//! Outbound `WebSocket` events.

use serde::{Deserialize, Serialize};
use signbridge_core::{Dictionaries, translate};

/// One JSON frame sent to a session client: `{"type": ..., "data": ...}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum SessionEvent {
    /// Echo of the received transcript, for subtitles.
    Transcript(String),
    /// One video URL to play.
    Video(String),
}

impl SessionEvent {
    /// Serialize to the wire JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Events produced for one inbound transcript, in send order.
///
/// The transcript echo (skipped for empty text) always precedes the video
/// events, which follow resolver order.
pub fn events_for_message(dicts: &Dictionaries, text: &str) -> Vec<SessionEvent> {
    let translation = translate(dicts, text);
    let mut events = Vec::with_capacity(translation.len() + 1);
    if !text.is_empty() {
        events.push(SessionEvent::Transcript(text.to_owned()));
    }
    events.extend(translation.urls.into_iter().map(SessionEvent::Video));
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dicts() -> Dictionaries {
        Dictionaries::new(
            [("hello", "uH")].into_iter().collect(),
            [("h", "uh"), ("i", "ui")].into_iter().collect(),
            [("123", "u123")].into_iter().collect(),
        )
    }

    #[test]
    fn wire_format() {
        let json = SessionEvent::Transcript("Hi".into()).to_json().unwrap();
        assert_eq!(json, r#"{"type":"transcript","data":"Hi"}"#);
        let json = SessionEvent::Video("u1".into()).to_json().unwrap();
        assert_eq!(json, r#"{"type":"video","data":"u1"}"#);
    }

    #[test]
    fn transcript_precedes_videos() {
        let events = events_for_message(&dicts(), "Hello 123 hi");
        assert_eq!(
            events,
            vec![
                SessionEvent::Transcript("Hello 123 hi".into()),
                SessionEvent::Video("uH".into()),
                SessionEvent::Video("u123".into()),
                SessionEvent::Video("uh".into()),
                SessionEvent::Video("ui".into()),
            ]
        );
    }

    #[test]
    fn empty_message_emits_nothing() {
        assert!(events_for_message(&dicts(), "").is_empty());
    }

    #[test]
    fn unresolvable_text_still_echoes() {
        let events = events_for_message(&dicts(), "zzz");
        assert_eq!(events, vec![SessionEvent::Transcript("zzz".into())]);
    }

    #[test]
    fn transcript_is_sent_verbatim() {
        let events = events_for_message(&dicts(), "  HELLO!  ");
        assert_eq!(events[0], SessionEvent::Transcript("  HELLO!  ".into()));
        assert_eq!(events[1], SessionEvent::Video("uH".into()));
    }
}
