//! Playback element boundary
//!
//! The bridge never talks to a real media element directly; it goes through
//! the [`PlaybackElement`] trait so backends can be swapped and tests can run
//! against the deterministic in-memory [`SimElement`].

/// Lifecycle events emitted by a playback element
///
/// Events are live-only: a listener attached after an event fires never sees
/// it, and the element performs no buffering or replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementEvent {
    /// Source was reset and the element emptied its buffers
    Emptied,
    /// Metadata (duration, dimensions) became available
    LoadedMetadata,
    /// Playback started or resumed
    Playing,
    /// Playback stalled waiting for data
    Waiting,
    /// Playback was paused
    Paused,
    /// Playback reached the end of the media
    Ended,
    /// The effective volume or mute flag changed
    VolumeChanged,
    /// A seek operation completed
    Seeked,
    /// Enough data is buffered to begin playback
    CanPlay,
    /// A fatal element error occurred
    Error,
    /// Loading was aborted
    Abort,
}

/// Facade over an external media element
///
/// Getters are sampled live each time a status message is built; the trait
/// must report current values, never cached ones. `duration` reports 0 until
/// the real duration is known.
pub trait PlaybackElement {
    /// Replace the element source and begin loading
    fn load(&mut self, url: &str, mime_type: Option<&str>);

    fn play(&mut self);
    fn pause(&mut self);

    /// Move the playhead. Bounds checking happens above this trait; an
    /// implementation may assume `time` is within [0, duration].
    fn seek(&mut self, time: f64);

    /// Set the output volume, 0.0..=1.0. A same-value write must not emit
    /// a volume-changed event (HTML media semantics).
    fn set_volume(&mut self, level: f64);

    fn current_time(&self) -> f64;
    fn duration(&self) -> f64;
    fn playback_rate(&self) -> f64;
    fn volume(&self) -> f64;
    fn muted(&self) -> bool;

    fn set_autoplay(&mut self, autoplay: bool);
    fn set_controls(&mut self, controls: bool);

    fn set_visible(&mut self, visible: bool);
    fn visible(&self) -> bool;
}

/// In-memory playback element for tests and the demo bin
///
/// Operations queue the lifecycle events a real element would fire; the
/// harness drains them with [`SimElement::take_events`] and feeds them back
/// to the player. Inherent helpers (`complete_load`, `finish`, `fail`,
/// `stall`, `abort`) simulate the element-driven transitions no command
/// triggers directly.
#[derive(Debug)]
pub struct SimElement {
    src: Option<String>,
    mime_type: Option<String>,
    duration: f64,
    current_time: f64,
    playback_rate: f64,
    volume: f64,
    muted: bool,
    paused: bool,
    autoplay: bool,
    controls: bool,
    visible: bool,
    events: Vec<ElementEvent>,
}

impl SimElement {
    pub fn new() -> Self {
        SimElement {
            src: None,
            mime_type: None,
            duration: 0.0,
            current_time: 0.0,
            playback_rate: 1.0,
            volume: 1.0,
            muted: false,
            paused: true,
            autoplay: false,
            controls: true,
            visible: true,
            events: Vec::new(),
        }
    }

    /// Drain the queued lifecycle events in firing order
    pub fn take_events(&mut self) -> Vec<ElementEvent> {
        std::mem::take(&mut self.events)
    }

    /// Simulate metadata arriving for the pending load
    pub fn complete_load(&mut self, duration: f64) {
        self.duration = duration;
        self.events.push(ElementEvent::LoadedMetadata);
        if self.autoplay {
            self.paused = false;
            self.events.push(ElementEvent::Playing);
        }
    }

    /// Simulate playback running out of buffered data
    pub fn stall(&mut self) {
        self.events.push(ElementEvent::Waiting);
    }

    /// Simulate playback reaching the end of the media
    pub fn finish(&mut self) {
        self.paused = true;
        self.current_time = self.duration;
        self.events.push(ElementEvent::Ended);
    }

    /// Simulate a fatal element error
    pub fn fail(&mut self) {
        self.events.push(ElementEvent::Error);
    }

    /// Simulate an aborted load
    pub fn abort(&mut self) {
        self.events.push(ElementEvent::Abort);
    }

    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn controls(&self) -> bool {
        self.controls
    }
}

impl Default for SimElement {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackElement for SimElement {
    fn load(&mut self, url: &str, mime_type: Option<&str>) {
        self.src = Some(url.to_string());
        self.mime_type = mime_type.map(|s| s.to_string());
        self.duration = 0.0;
        self.current_time = 0.0;
        self.paused = true;
        self.events.push(ElementEvent::Emptied);
    }

    fn play(&mut self) {
        self.paused = false;
        self.events.push(ElementEvent::Playing);
    }

    fn pause(&mut self) {
        self.paused = true;
        self.events.push(ElementEvent::Paused);
    }

    fn seek(&mut self, time: f64) {
        self.current_time = time;
        self.events.push(ElementEvent::Seeked);
    }

    fn set_volume(&mut self, level: f64) {
        if (level - self.volume).abs() > f64::EPSILON {
            self.volume = level;
            self.events.push(ElementEvent::VolumeChanged);
        }
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn playback_rate(&self) -> f64 {
        self.playback_rate
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn muted(&self) -> bool {
        self.muted
    }

    fn set_autoplay(&mut self, autoplay: bool) {
        self.autoplay = autoplay;
    }

    fn set_controls(&mut self, controls: bool) {
        self.controls = controls;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_resets_and_emits_emptied() {
        let mut el = SimElement::new();
        el.seek(10.0);
        el.take_events();
        el.load("a.mp4", Some("video/mp4"));
        assert_eq!(el.src(), Some("a.mp4"));
        assert_eq!(el.current_time(), 0.0);
        assert_eq!(el.duration(), 0.0);
        assert_eq!(el.take_events(), vec![ElementEvent::Emptied]);
    }

    #[test]
    fn complete_load_autoplays_when_enabled() {
        let mut el = SimElement::new();
        el.set_autoplay(true);
        el.load("a.mp4", None);
        el.take_events();
        el.complete_load(120.0);
        assert_eq!(el.duration(), 120.0);
        assert!(!el.paused());
        assert_eq!(
            el.take_events(),
            vec![ElementEvent::LoadedMetadata, ElementEvent::Playing]
        );
    }

    #[test]
    fn same_value_volume_write_is_silent() {
        let mut el = SimElement::new();
        el.set_volume(0.5);
        assert_eq!(el.take_events(), vec![ElementEvent::VolumeChanged]);
        el.set_volume(0.5);
        assert!(el.take_events().is_empty());
    }
}
