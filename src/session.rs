//! Session state for one playback element
//!
//! A [`Session`] lives as long as the player instance. It is the only shared
//! mutable state in the bridge, and every mutation happens synchronously
//! inside a message or element-event handler (single-writer assumption).

use crate::message::{CommandKind, MediaDescriptor, PlayerState};

/// Load progress of the session
///
/// Transitions Idle -> Loading -> Ready only; a fresh LOAD restarts at
/// Loading. There is no other back-transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Idle,
    Loading,
    Ready,
}

/// Last-seen request sequence number per command kind
///
/// Best-effort correlation: a counter holds the most recent non-zero `seq`
/// of its kind, and the matching status push echoes it. Two in-flight
/// commands of the same kind collide on one counter; that is a protocol
/// property, not something the ledger tries to repair.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceLedger {
    load: u64,
    pause: u64,
    play: u64,
    set_volume: u64,
    seek: u64,
    get_status: u64,
}

impl SequenceLedger {
    /// Store `seq` for `kind`. A zero sequence value is not recorded.
    pub fn record(&mut self, kind: CommandKind, seq: u64) {
        if seq == 0 {
            return;
        }
        match kind {
            CommandKind::Load => self.load = seq,
            CommandKind::Pause => self.pause = seq,
            CommandKind::Play => self.play = seq,
            CommandKind::SetVolume => self.set_volume = seq,
            CommandKind::Seek => self.seek = seq,
            CommandKind::GetStatus => self.get_status = seq,
        }
    }

    /// Last stored sequence number for `kind` (0 = none yet)
    pub fn get(&self, kind: CommandKind) -> u64 {
        match kind {
            CommandKind::Load => self.load,
            CommandKind::Pause => self.pause,
            CommandKind::Play => self.play,
            CommandKind::SetVolume => self.set_volume,
            CommandKind::Seek => self.seek,
            CommandKind::GetStatus => self.get_status,
        }
    }
}

/// Live player/communication state for one playback element
#[derive(Debug, Default)]
pub struct Session {
    pub status: SessionStatus,
    pub player_state: PlayerState,
    pub title: String,
    pub subtitle: String,
    /// Current media descriptor; replaced wholesale on each LOAD
    pub media: Option<MediaDescriptor>,
    /// Volume observed at the last volume-changed element event
    pub last_known_volume: f64,
    pub seq: SequenceLedger,
    /// Currently addressed sender, last connect wins
    pub sender: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    /// Begin a fresh load: replace the media descriptor and restart the
    /// status at Loading. Title/subtitle are cached from the metadata.
    pub fn begin_load(&mut self, media: MediaDescriptor) {
        self.title = media.metadata.title.clone().unwrap_or_default();
        self.subtitle = media.metadata.subtitle.clone().unwrap_or_default();
        self.media = Some(media);
        self.status = SessionStatus::Loading;
    }
}
