//! Wire types for the sender/receiver media-control protocol
//!
//! Inbound command messages and outbound `MEDIA_STATUS` pushes are plain JSON
//! objects with camelCase field names. Decoding is deliberately forgiving:
//! anything unparseable or unrecognized maps to `None` and is dropped by the
//! dispatcher without a response.

use serde::{Deserialize, Serialize};

/// Command kinds tracked by the sequence ledger
///
/// PING is absent: it carries no sequence bookkeeping and produces no reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Load,
    Pause,
    Play,
    SetVolume,
    Seek,
    GetStatus,
}

/// A decoded inbound command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load { seq: u64, media: MediaDescriptor },
    Pause { seq: u64 },
    Play { seq: u64 },
    SetVolume { seq: u64, level: f64 },
    Seek { seq: u64, current_time: f64 },
    Ping,
    GetStatus { seq: u64 },
}

/// Raw inbound envelope; per-type payload fields are all optional so a
/// single pass can pick out whichever the command kind needs.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    seq: u64,
    #[serde(default)]
    media: Option<MediaDescriptor>,
    #[serde(default)]
    volume: Option<VolumeLevel>,
    #[serde(default, rename = "currentTime")]
    current_time: Option<f64>,
}

impl Command {
    /// Decode a raw inbound message.
    ///
    /// Returns `None` for unparseable JSON, an unrecognized `type`, or a
    /// recognized type missing its required payload. All three cases are
    /// silent drops at the protocol level.
    pub fn decode(raw: &str) -> Option<Command> {
        let env: Envelope = serde_json::from_str(raw).ok()?;
        match env.kind.as_str() {
            "LOAD" => Some(Command::Load {
                seq: env.seq,
                media: env.media?,
            }),
            "PAUSE" => Some(Command::Pause { seq: env.seq }),
            "PLAY" => Some(Command::Play { seq: env.seq }),
            "SET_VOLUME" => Some(Command::SetVolume {
                seq: env.seq,
                level: env.volume?.level,
            }),
            "SEEK" => Some(Command::Seek {
                seq: env.seq,
                current_time: env.current_time?,
            }),
            "PING" => Some(Command::Ping),
            "GET_STATUS" => Some(Command::GetStatus { seq: env.seq }),
            _ => None,
        }
    }

    /// The ledger kind for this command, if it participates in sequencing
    pub fn kind(&self) -> Option<CommandKind> {
        match self {
            Command::Load { .. } => Some(CommandKind::Load),
            Command::Pause { .. } => Some(CommandKind::Pause),
            Command::Play { .. } => Some(CommandKind::Play),
            Command::SetVolume { .. } => Some(CommandKind::SetVolume),
            Command::Seek { .. } => Some(CommandKind::Seek),
            Command::GetStatus { .. } => Some(CommandKind::GetStatus),
            Command::Ping => None,
        }
    }

    /// The sequence number carried by this command (0 when absent)
    pub fn seq(&self) -> u64 {
        match self {
            Command::Load { seq, .. }
            | Command::Pause { seq }
            | Command::Play { seq }
            | Command::SetVolume { seq, .. }
            | Command::Seek { seq, .. }
            | Command::GetStatus { seq } => *seq,
            Command::Ping => 0,
        }
    }
}

/// Describes the currently loaded content
///
/// Replaced wholesale by each LOAD; `duration` is re-sampled from the element
/// whenever the descriptor is echoed in an outbound status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDescriptor {
    pub content_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_type: Option<String>,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub metadata: MediaMetadata,
}

/// Presentation metadata attached to a media descriptor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_type: Option<i64>,
}

/// SET_VOLUME payload
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct VolumeLevel {
    pub level: f64,
}

/// Player state as reported on the wire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerState {
    #[default]
    Idle,
    Playing,
    Paused,
    Buffering,
}

/// Why the player went idle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdleReason {
    None,
    Finished,
    Error,
    Interrupted,
}

/// Outbound `MEDIA_STATUS` message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaStatus {
    #[serde(rename = "type")]
    pub kind: String,
    pub status: Vec<StatusEntry>,
    pub seq: u64,
}

impl MediaStatus {
    pub fn new(seq: u64, entry: StatusEntry) -> Self {
        MediaStatus {
            kind: "MEDIA_STATUS".to_string(),
            status: vec![entry],
            seq,
        }
    }

    /// Serialize for the wire
    pub fn encode(&self) -> crate::error::Result<String> {
        serde_json::to_string(self).map_err(Into::into)
    }
}

/// One status snapshot inside a `MEDIA_STATUS` message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEntry {
    pub media_session_id: u32,
    pub playback_rate: f64,
    pub current_time: f64,
    pub duration: f64,
    pub supported_media_commands: u32,
    pub volume: VolumeStatus,
    pub player_state: PlayerState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_reason: Option<IdleReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaDescriptor>,
}

/// Volume as reported on the wire
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VolumeStatus {
    pub level: f64,
    pub muted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_load_command() {
        let raw = r#"{"type":"LOAD","seq":5,"media":{"contentId":"a.mp4",
            "contentType":"video/mp4","streamType":"BUFFERED",
            "metadata":{"title":"T","subtitle":"S"}}}"#;
        let cmd = Command::decode(raw).unwrap();
        match cmd {
            Command::Load { seq, media } => {
                assert_eq!(seq, 5);
                assert_eq!(media.content_id, "a.mp4");
                assert_eq!(media.metadata.title.as_deref(), Some("T"));
            }
            other => panic!("expected LOAD, got {:?}", other),
        }
    }

    #[test]
    fn decode_seek_and_volume_payloads() {
        let seek = Command::decode(r#"{"type":"SEEK","seq":9,"currentTime":150}"#).unwrap();
        assert_eq!(
            seek,
            Command::Seek {
                seq: 9,
                current_time: 150.0
            }
        );

        let vol =
            Command::decode(r#"{"type":"SET_VOLUME","seq":3,"volume":{"level":0.5}}"#).unwrap();
        assert_eq!(vol, Command::SetVolume { seq: 3, level: 0.5 });
    }

    #[test]
    fn decode_rejects_junk_silently() {
        assert_eq!(Command::decode("not json"), None);
        assert_eq!(Command::decode(r#"{"seq":1}"#), None);
        assert_eq!(Command::decode(r#"{"type":"DANCE","seq":1}"#), None);
        // Recognized type but missing payload
        assert_eq!(Command::decode(r#"{"type":"LOAD","seq":1}"#), None);
        assert_eq!(Command::decode(r#"{"type":"SEEK","seq":1}"#), None);
    }

    #[test]
    fn missing_seq_defaults_to_zero() {
        let cmd = Command::decode(r#"{"type":"PLAY"}"#).unwrap();
        assert_eq!(cmd.seq(), 0);
        assert_eq!(cmd.kind(), Some(CommandKind::Play));
    }

    #[test]
    fn status_serializes_wire_field_names() {
        let entry = StatusEntry {
            media_session_id: 1,
            playback_rate: 1.0,
            current_time: 2.5,
            duration: 10.0,
            supported_media_commands: 15,
            volume: VolumeStatus {
                level: 0.7,
                muted: false,
            },
            player_state: PlayerState::Playing,
            idle_reason: None,
            media: None,
        };
        let msg = MediaStatus::new(5, entry);
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "MEDIA_STATUS");
        assert_eq!(json["seq"], 5);
        assert_eq!(json["status"][0]["mediaSessionId"], 1);
        assert_eq!(json["status"][0]["supportedMediaCommands"], 15);
        assert_eq!(json["status"][0]["playerState"], "PLAYING");
        // Absent optionals must not appear on the wire
        assert!(json["status"][0].get("idleReason").is_none());
        assert!(json["status"][0].get("media").is_none());
    }

    #[test]
    fn idle_reason_spelling() {
        assert_eq!(
            serde_json::to_string(&IdleReason::Interrupted).unwrap(),
            "\"INTERRUPTED\""
        );
        assert_eq!(serde_json::to_string(&IdleReason::None).unwrap(), "\"NONE\"");
    }
}
