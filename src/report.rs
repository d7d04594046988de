//! Status reporter: builds outbound `MEDIA_STATUS` payloads
//!
//! One builder per status shape, all derived from a common base record. Every
//! builder samples the element live at call time (currentTime, playbackRate,
//! volume, muted, duration); nothing is cached. The `playing` and `paused`
//! shapes additionally store the new player state on the session, matching
//! the element events that trigger them.

use crate::element::PlaybackElement;
use crate::message::{
    CommandKind, IdleReason, MediaDescriptor, MediaStatus, PlayerState, StatusEntry, VolumeStatus,
};
use crate::session::Session;
use crate::PlayerConfig;

/// Which element event caused a generic sync push
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncCause {
    Seeked,
    VolumeChanged,
}

fn base_entry<E: PlaybackElement + ?Sized>(cfg: &PlayerConfig, element: &E) -> StatusEntry {
    StatusEntry {
        media_session_id: cfg.media_session_id,
        playback_rate: element.playback_rate(),
        current_time: element.current_time(),
        duration: element.duration(),
        supported_media_commands: cfg.supported_media_commands,
        volume: VolumeStatus {
            level: element.volume(),
            muted: element.muted(),
        },
        player_state: PlayerState::Idle,
        idle_reason: None,
        media: None,
    }
}

/// The session's descriptor with `duration` re-sampled from the element
fn live_media<E: PlaybackElement + ?Sized>(session: &Session, element: &E) -> Option<MediaDescriptor> {
    session.media.clone().map(|mut media| {
        media.duration = element.duration();
        media
    })
}

/// Unsolicited idle notification. Sequence is always 0.
pub fn idle<E: PlaybackElement + ?Sized>(
    cfg: &PlayerConfig,
    _session: &Session,
    element: &E,
    reason: IdleReason,
) -> MediaStatus {
    let mut entry = base_entry(cfg, element);
    entry.player_state = PlayerState::Idle;
    entry.idle_reason = Some(reason);
    MediaStatus::new(0, entry)
}

/// Ack for a completed load; echoes the LOAD counter and attaches the
/// full media descriptor.
pub fn load_metadata<E: PlaybackElement + ?Sized>(
    cfg: &PlayerConfig,
    session: &Session,
    element: &E,
) -> MediaStatus {
    let mut entry = base_entry(cfg, element);
    entry.player_state = PlayerState::Playing;
    entry.media = live_media(session, element);
    MediaStatus::new(session.seq.get(CommandKind::Load), entry)
}

/// Playback started or resumed; stores and reports PLAYING.
pub fn playing<E: PlaybackElement + ?Sized>(
    cfg: &PlayerConfig,
    session: &mut Session,
    element: &E,
) -> MediaStatus {
    session.player_state = PlayerState::Playing;
    let mut entry = base_entry(cfg, element);
    entry.player_state = PlayerState::Playing;
    MediaStatus::new(session.seq.get(CommandKind::Play), entry)
}

/// Playback paused; stores and reports PAUSED.
pub fn paused<E: PlaybackElement + ?Sized>(
    cfg: &PlayerConfig,
    session: &mut Session,
    element: &E,
) -> MediaStatus {
    session.player_state = PlayerState::Paused;
    let mut entry = base_entry(cfg, element);
    entry.player_state = PlayerState::Paused;
    MediaStatus::new(session.seq.get(CommandKind::Pause), entry)
}

/// Unsolicited buffering notification. Reports BUFFERING without touching
/// the stored player state.
pub fn buffering<E: PlaybackElement + ?Sized>(
    cfg: &PlayerConfig,
    _session: &Session,
    element: &E,
) -> MediaStatus {
    let mut entry = base_entry(cfg, element);
    entry.player_state = PlayerState::Buffering;
    MediaStatus::new(0, entry)
}

/// Generic status push reporting the stored player state.
///
/// The echoed sequence depends on what caused the push: a completed seek
/// correlates with the SEEK counter, a volume change with SET_VOLUME,
/// anything else is unsolicited (0). Includes the media descriptor once
/// something has been loaded.
pub fn sync_player_state<E: PlaybackElement + ?Sized>(
    cfg: &PlayerConfig,
    session: &Session,
    element: &E,
    cause: Option<SyncCause>,
) -> MediaStatus {
    let seq = match cause {
        Some(SyncCause::Seeked) => session.seq.get(CommandKind::Seek),
        Some(SyncCause::VolumeChanged) => session.seq.get(CommandKind::SetVolume),
        None => 0,
    };
    let mut entry = base_entry(cfg, element);
    entry.player_state = session.player_state;
    entry.media = live_media(session, element);
    MediaStatus::new(seq, entry)
}
