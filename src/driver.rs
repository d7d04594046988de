//! Async event pump for a [`MediaPlayer`]
//!
//! The core player is synchronous; this loop serializes every input through
//! one task so the single-writer assumption on the session holds. Channel
//! notifications and element lifecycle events arrive on tokio mpsc channels,
//! and a fixed interval tick drives the ready gate's polling retry.

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{interval, Duration};

use crate::channel::{ChannelEvent, MessageChannel};
use crate::element::{ElementEvent, PlaybackElement};
use crate::player::MediaPlayer;

/// Run the player until both event sources close, then return it so the
/// caller can inspect final state.
pub async fn run<E, C>(
    mut player: MediaPlayer<E, C>,
    mut channel_events: UnboundedReceiver<ChannelEvent>,
    mut element_events: UnboundedReceiver<ElementEvent>,
) -> MediaPlayer<E, C>
where
    E: PlaybackElement,
    C: MessageChannel,
{
    let mut tick = interval(Duration::from_millis(player.config().gate_poll_ms));
    let mut channel_open = true;
    let mut element_open = true;

    while channel_open || element_open {
        tokio::select! {
            event = channel_events.recv(), if channel_open => match event {
                Some(event) => player.handle_channel_event(event),
                None => channel_open = false,
            },
            event = element_events.recv(), if element_open => match event {
                Some(event) => player.handle_element_event(event),
                None => element_open = false,
            },
            _ = tick.tick() => player.poll_gate(),
        }
    }

    // Final chance for anything that became ready in the last turn
    player.poll_gate();
    player
}
