use std::io::{self, BufRead};

use anyhow::Result;
use clap::Parser;

use castbridge::{
    ChannelEvent, MediaPlayer, PlayerConfig, RecordingChannel, SessionStatus, SimElement,
};

/// Demo receiver: reads inbound command JSON per line from stdin, drives a
/// simulated playback element, and prints outbound status JSON per line.
#[derive(Parser, Debug)]
#[command(name = "castbridge", version, about)]
struct Args {
    /// Ready-gate polling interval in milliseconds
    #[arg(long, default_value_t = 50)]
    gate_poll_ms: u64,

    /// Duration the simulated element reports once a load completes
    #[arg(long, default_value_t = 120.0)]
    duration: f64,
}

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

fn main() -> Result<()> {
    let args = Args::parse();

    let config = PlayerConfig {
        gate_poll_ms: args.gate_poll_ms,
        ..Default::default()
    };
    let mut player = MediaPlayer::new(SimElement::new(), RecordingChannel::new(), config);
    player.handle_channel_event(ChannelEvent::SenderConnected("stdin".to_string()));

    eprintln!("castbridge: one inbound command JSON per line, e.g.");
    eprintln!(r#"  {{"type":"LOAD","seq":1,"media":{{"contentId":"a.mp4"}}}}"#);

    let stdin = io::stdin();
    let mut printed = 0;
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        player.handle_message("stdin", &line);

        // Simulate the element: a pending load completes immediately
        if player.session().status == SessionStatus::Loading {
            player.element_mut().complete_load(args.duration);
        }
        pump(&mut player);
        player.poll_gate();
        pump(&mut player);

        for (_, payload) in player.channel().sent().iter().skip(printed) {
            println!("{}", payload);
            printed += 1;
        }
    }
    Ok(())
}
