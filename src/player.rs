//! Command dispatcher / state machine
//!
//! [`MediaPlayer`] owns the session, the playback element, and the outbound
//! channel. Inbound messages update the sequence ledger before dispatch;
//! control commands go through the ready gate; element lifecycle events map
//! to status pushes through the reporter.

use crate::channel::{ChannelEvent, MessageChannel};
use crate::element::{ElementEvent, PlaybackElement};
use crate::gate::{GatedAction, ReadyGate};
use crate::message::{Command, IdleReason, MediaStatus};
use crate::report::{self, SyncCause};
use crate::session::{Session, SessionStatus};
use crate::PlayerConfig;

/// Receiver-side media player bridging one playback element to one
/// message channel.
pub struct MediaPlayer<E: PlaybackElement, C: MessageChannel> {
    config: PlayerConfig,
    element: E,
    channel: C,
    session: Session,
    gate: ReadyGate,
}

impl<E: PlaybackElement, C: MessageChannel> MediaPlayer<E, C> {
    pub fn new(element: E, channel: C, config: PlayerConfig) -> Self {
        MediaPlayer {
            config,
            element,
            channel,
            session: Session::new(),
            gate: ReadyGate::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut E {
        &mut self.element
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Handle a transport notification
    pub fn handle_channel_event(&mut self, event: ChannelEvent) {
        match event {
            ChannelEvent::SenderConnected(id) => {
                log::info!("sender connected: {}", id);
                self.session.sender = Some(id);
            }
            ChannelEvent::SenderDisconnected(id) => {
                log::info!("sender disconnected: {}", id);
                if self.session.sender.as_deref() == Some(id.as_str()) {
                    self.session.sender = None;
                }
            }
            ChannelEvent::Message { sender, payload } => {
                self.handle_message(&sender, &payload);
            }
        }
    }

    /// Handle one serialized inbound message.
    ///
    /// Unparseable or unrecognized messages are dropped without a response.
    pub fn handle_message(&mut self, sender: &str, raw: &str) {
        log::debug!("message from {}: {}", sender, raw);
        let Some(command) = Command::decode(raw) else {
            log::debug!("ignoring unrecognized message from {}", sender);
            return;
        };

        // Ledger update happens before dispatch; zero sequences are skipped.
        if let Some(kind) = command.kind() {
            self.session.seq.record(kind, command.seq());
        }

        match command {
            Command::Load { media, .. } => {
                self.session.begin_load(media.clone());
                self.element.set_autoplay(true);
                self.element.set_controls(false);
                self.element.set_visible(true);
                self.element
                    .load(&media.content_id, media.content_type.as_deref());
            }
            Command::Play { .. } => self.gated(GatedAction::Play),
            Command::Pause { .. } => self.gated(GatedAction::Pause),
            Command::Seek { current_time, .. } => self.gated(GatedAction::Seek(current_time)),
            Command::SetVolume { level, .. } => self.gated(GatedAction::SetVolume(level)),
            Command::GetStatus { .. } => self.gated(GatedAction::GetStatus),
            Command::Ping => {}
        }
    }

    /// Handle a playback element lifecycle event
    pub fn handle_element_event(&mut self, event: ElementEvent) {
        match event {
            ElementEvent::Emptied => {
                let msg = report::idle(&self.config, &self.session, &self.element, IdleReason::None);
                self.push(msg);
            }
            ElementEvent::LoadedMetadata => {
                self.session.status = SessionStatus::Ready;
                self.element.set_visible(true);
                let msg = report::load_metadata(&self.config, &self.session, &self.element);
                self.push(msg);
            }
            ElementEvent::Playing => {
                let msg = report::playing(&self.config, &mut self.session, &self.element);
                self.push(msg);
            }
            ElementEvent::Waiting => {
                let msg = report::buffering(&self.config, &self.session, &self.element);
                self.push(msg);
            }
            ElementEvent::Paused => {
                let msg = report::paused(&self.config, &mut self.session, &self.element);
                self.push(msg);
            }
            ElementEvent::Ended => {
                let msg =
                    report::idle(&self.config, &self.session, &self.element, IdleReason::Finished);
                self.push(msg);
                self.element.set_visible(false);
            }
            ElementEvent::VolumeChanged => {
                self.session.last_known_volume = self.element.volume();
                let msg = report::sync_player_state(
                    &self.config,
                    &self.session,
                    &self.element,
                    Some(SyncCause::VolumeChanged),
                );
                self.push(msg);
            }
            ElementEvent::Seeked => {
                let msg = report::sync_player_state(
                    &self.config,
                    &self.session,
                    &self.element,
                    Some(SyncCause::Seeked),
                );
                self.push(msg);
            }
            ElementEvent::CanPlay => {
                let msg = report::sync_player_state(&self.config, &self.session, &self.element, None);
                self.push(msg);
            }
            ElementEvent::Error => {
                let msg =
                    report::idle(&self.config, &self.session, &self.element, IdleReason::Error);
                self.push(msg);
            }
            ElementEvent::Abort => {
                let msg = report::idle(
                    &self.config,
                    &self.session,
                    &self.element,
                    IdleReason::Interrupted,
                );
                self.push(msg);
            }
        }
    }

    /// Run deferred gated actions if the session has become ready.
    ///
    /// Called on a fixed interval by the driver; a session observed idle
    /// abandons everything pending.
    pub fn poll_gate(&mut self) {
        match self.session.status {
            SessionStatus::Ready => {
                for action in self.gate.drain() {
                    self.execute(action);
                }
            }
            SessionStatus::Idle => self.gate.invalidate(),
            SessionStatus::Loading => {}
        }
    }

    /// Whether any gated action is still waiting on readiness
    pub fn has_pending_actions(&self) -> bool {
        !self.gate.is_empty()
    }

    fn gated(&mut self, action: GatedAction) {
        match self.session.status {
            SessionStatus::Ready => self.execute(action),
            SessionStatus::Loading => self.gate.defer(action),
            SessionStatus::Idle => {
                log::debug!("dropping {:?}: session is idle", action);
            }
        }
    }

    fn execute(&mut self, action: GatedAction) {
        match action {
            GatedAction::Play => self.element.play(),
            GatedAction::Pause => self.element.pause(),
            GatedAction::Seek(time) => {
                if time < 0.0 || time > self.element.duration() {
                    log::debug!("rejecting seek to {}: out of range", time);
                    return;
                }
                self.element.seek(time);
            }
            GatedAction::SetVolume(level) => {
                self.element.set_volume(level);
                // A same-value write fires no volume-changed event, so the
                // sender would never get its ack; push the sync directly.
                if (level - self.session.last_known_volume).abs() < f64::EPSILON {
                    let msg = report::sync_player_state(
                        &self.config,
                        &self.session,
                        &self.element,
                        Some(SyncCause::VolumeChanged),
                    );
                    self.push(msg);
                }
            }
            GatedAction::GetStatus => {
                let msg = report::sync_player_state(&self.config, &self.session, &self.element, None);
                self.push(msg);
            }
        }
    }

    fn push(&mut self, msg: MediaStatus) {
        let payload = match msg.encode() {
            Ok(payload) => payload,
            Err(err) => {
                log::warn!("failed to serialize status: {}", err);
                return;
            }
        };
        if let Err(err) = self.channel.send(&payload, self.session.sender.as_deref()) {
            log::warn!("failed to send status: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::RecordingChannel;
    use crate::element::SimElement;
    use crate::message::CommandKind;

    fn player() -> MediaPlayer<SimElement, RecordingChannel> {
        MediaPlayer::new(
            SimElement::new(),
            RecordingChannel::new(),
            PlayerConfig::default(),
        )
    }

    /// Feed queued element events back into the player until quiescent
    fn pump(player: &mut MediaPlayer<SimElement, RecordingChannel>) {
        loop {
            let events = player.element_mut().take_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                player.handle_element_event(event);
            }
        }
    }

    #[test]
    fn connect_sets_sender_and_matching_disconnect_clears_it() {
        let mut p = player();
        p.handle_channel_event(ChannelEvent::SenderConnected("s1".into()));
        assert_eq!(p.session().sender.as_deref(), Some("s1"));
        p.handle_channel_event(ChannelEvent::SenderConnected("s2".into()));
        assert_eq!(p.session().sender.as_deref(), Some("s2"));
        // Stale disconnect for a replaced sender is ignored
        p.handle_channel_event(ChannelEvent::SenderDisconnected("s1".into()));
        assert_eq!(p.session().sender.as_deref(), Some("s2"));
        p.handle_channel_event(ChannelEvent::SenderDisconnected("s2".into()));
        assert_eq!(p.session().sender, None);
    }

    #[test]
    fn ledger_updates_before_dispatch_and_skips_zero() {
        let mut p = player();
        p.handle_message("s", r#"{"type":"PLAY","seq":4}"#);
        assert_eq!(p.session().seq.get(CommandKind::Play), 4);
        p.handle_message("s", r#"{"type":"PLAY"}"#);
        assert_eq!(p.session().seq.get(CommandKind::Play), 4);
    }

    #[test]
    fn ping_and_unknown_produce_no_output() {
        let mut p = player();
        p.handle_message("s", r#"{"type":"PING","seq":2}"#);
        p.handle_message("s", r#"{"type":"EXPLODE","seq":2}"#);
        p.handle_message("s", "garbage");
        assert_eq!(p.channel().sent_count(), 0);
    }

    #[test]
    fn load_configures_element_and_enters_loading() {
        let mut p = player();
        p.handle_message(
            "s",
            r#"{"type":"LOAD","seq":5,"media":{"contentId":"a.mp4","contentType":"video/mp4"}}"#,
        );
        assert_eq!(p.session().status, SessionStatus::Loading);
        assert_eq!(p.element().src(), Some("a.mp4"));
        assert_eq!(p.element().mime_type(), Some("video/mp4"));
        assert!(p.element().autoplay());
        assert!(!p.element().controls());
        assert!(p.element().visible());
    }

    #[test]
    fn gated_command_while_idle_is_dropped_not_queued() {
        let mut p = player();
        p.handle_message("s", r#"{"type":"PLAY","seq":1}"#);
        assert!(!p.has_pending_actions());

        // A later load must not resurrect the dropped command
        p.handle_message(
            "s",
            r#"{"type":"LOAD","seq":2,"media":{"contentId":"a.mp4"}}"#,
        );
        p.element_mut().take_events();
        p.element_mut().set_autoplay(false);
        p.element_mut().complete_load(60.0);
        pump(&mut p);
        p.poll_gate();
        assert!(p.element().paused());
    }

    #[test]
    fn gated_command_while_loading_runs_once_on_ready() {
        let mut p = player();
        p.handle_message(
            "s",
            r#"{"type":"LOAD","seq":1,"media":{"contentId":"a.mp4"}}"#,
        );
        p.element_mut().take_events();
        p.element_mut().set_autoplay(false);
        p.handle_message("s", r#"{"type":"PLAY","seq":2}"#);
        assert!(p.has_pending_actions());
        assert!(p.element().paused());

        p.poll_gate(); // still loading, nothing runs
        assert!(p.has_pending_actions());

        p.element_mut().complete_load(60.0);
        pump(&mut p);
        p.poll_gate();
        assert!(!p.element().paused());
        assert!(!p.has_pending_actions());
        p.poll_gate(); // no double execution
    }

    #[test]
    fn out_of_range_seek_is_silently_rejected() {
        let mut p = player();
        p.handle_message(
            "s",
            r#"{"type":"LOAD","seq":1,"media":{"contentId":"a.mp4"}}"#,
        );
        p.element_mut().set_autoplay(false);
        p.element_mut().complete_load(100.0);
        pump(&mut p);
        let sent_before = p.channel().sent_count();

        p.handle_message("s", r#"{"type":"SEEK","seq":9,"currentTime":150}"#);
        assert_eq!(p.element().current_time(), 0.0);
        assert_eq!(p.channel().sent_count(), sent_before);

        p.handle_message("s", r#"{"type":"SEEK","seq":10,"currentTime":-1}"#);
        assert_eq!(p.element().current_time(), 0.0);
        assert_eq!(p.channel().sent_count(), sent_before);
    }

    #[test]
    fn finished_hides_element_but_error_does_not() {
        let mut p = player();
        p.handle_message(
            "s",
            r#"{"type":"LOAD","seq":1,"media":{"contentId":"a.mp4"}}"#,
        );
        p.element_mut().complete_load(10.0);
        pump(&mut p);
        assert!(p.element().visible());

        p.handle_element_event(ElementEvent::Error);
        assert!(p.element().visible());
        p.handle_element_event(ElementEvent::Abort);
        assert!(p.element().visible());

        p.handle_element_event(ElementEvent::Ended);
        assert!(!p.element().visible());
    }
}
