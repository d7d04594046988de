//! Castbridge
//!
//! A receiver-side media-control bridge: remote senders issue JSON commands
//! (load, play, pause, seek, set-volume, status query) over a message
//! channel, and the bridge executes them against a playback element and
//! reports the resulting state transitions back with correlated sequence
//! numbers.
//!
//! The core is a synchronous state machine ([`MediaPlayer`]); transport and
//! playback backends plug in behind the [`MessageChannel`] and
//! [`PlaybackElement`] traits. An async driver ([`driver::run`]) pumps
//! events through the player and polls the ready gate.
//!
//! # Example
//!
//! ```
//! use castbridge::{MediaPlayer, PlayerConfig, RecordingChannel, SimElement};
//!
//! let mut player = MediaPlayer::new(
//!     SimElement::new(),
//!     RecordingChannel::new(),
//!     PlayerConfig::default(),
//! );
//!
//! player.handle_message(
//!     "sender-1",
//!     r#"{"type":"LOAD","seq":1,"media":{"contentId":"a.mp4"}}"#,
//! );
//! assert_eq!(player.element().src(), Some("a.mp4"));
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod channel;
pub mod driver;
pub mod element;
pub mod gate;
pub mod message;
pub mod player;
pub mod report;
pub mod session;

pub use channel::{ChannelEvent, MessageChannel, RecordingChannel};
pub use element::{ElementEvent, PlaybackElement, SimElement};
pub use message::{Command, CommandKind, IdleReason, MediaDescriptor, MediaStatus, PlayerState};
pub use player::MediaPlayer;
pub use session::{Session, SessionStatus};

/// Configuration for a [`MediaPlayer`]
///
/// Defaults preserve the protocol constants senders expect: one media
/// session per element and the fixed capability bitmask 15
/// (pause | seek | stream-volume | stream-mute).
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    /// Interval of the ready gate's polling retry, in milliseconds
    pub gate_poll_ms: u64,
    /// Capability bitmask reported in every status entry
    pub supported_media_commands: u32,
    /// Session id reported in every status entry
    pub media_session_id: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            gate_poll_ms: 50,
            supported_media_commands: 15,
            media_session_id: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlayerConfig::default();
        assert_eq!(config.gate_poll_ms, 50);
        assert_eq!(config.supported_media_commands, 15);
        assert_eq!(config.media_session_id, 1);
    }
}
