use std::io::stdin;

use looptone::{RenderConfig, SourceError, Timeline, TimelineSource, spawn_player};
use tracing_subscriber::EnvFilter;

const TIMELINE_RON: &str = r#"(
    ticks_per_quarter_note: 480,
    tracks: [
        (
            events: [
                (tick: 0, channel: 0, kind: Tempo(data: [6, 138, 27])),
                (tick: 0, channel: 0, kind: NoteOn(note: 76, velocity: 100)),
                (tick: 240, channel: 0, kind: NoteOff(note: 76)),
                (tick: 240, channel: 0, kind: NoteOn(note: 72, velocity: 100)),
                (tick: 480, channel: 0, kind: NoteOff(note: 72)),
                (tick: 480, channel: 0, kind: NoteOn(note: 74, velocity: 100)),
                (tick: 720, channel: 0, kind: NoteOff(note: 74)),
                (tick: 720, channel: 0, kind: NoteOn(note: 79, velocity: 100)),
                (tick: 1200, channel: 0, kind: NoteOff(note: 79)),
            ],
        ),
        (
            events: [
                (tick: 0, channel: 1, kind: NoteOn(note: 48, velocity: 90)),
                (tick: 480, channel: 1, kind: NoteOff(note: 48)),
                (tick: 480, channel: 1, kind: NoteOn(note: 55, velocity: 90)),
                (tick: 960, channel: 1, kind: NoteOff(note: 55)),
                (tick: 960, channel: 1, kind: NoteOn(note: 52, velocity: 90)),
                (tick: 1440, channel: 1, kind: NoteOff(note: 52)),
            ],
        ),
    ],
)"#;

/// Decodes the embedded timeline afresh on every cycle, the same way a
/// file-backed source would re-read and re-parse its bytes.
struct EmbeddedSource;

impl TimelineSource for EmbeddedSource {
    fn fetch(&mut self) -> Result<Timeline, SourceError> {
        Ok(ron::from_str(TIMELINE_RON)?)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let player = spawn_player(EmbeddedSource, RenderConfig::default());

    println!("Looping timeline. Press Enter to stop...");
    let mut input = String::new();
    stdin().read_line(&mut input).unwrap();

    player.stop();
}
