pub mod config;
pub mod engine;
pub mod events;
pub mod playback;
pub mod render;
pub mod timing;

pub const SAMPLE_RATE: u32 = 44_100;

pub use config::RenderConfig;
pub use engine::{PlayerHandle, SourceError, TimelineSource, render_and_play, spawn_player};
pub use events::{Event, EventKind, Timeline, Track};
pub use playback::{BufferedSink, PlaybackError, PlaybackSession};
pub use render::{encode_pcm16, note_to_freq, synthesize};
pub use timing::{
    DEFAULT_TEMPO, TempoBreakpoint, TempoMap, ticks_to_seconds, timeline_duration_seconds,
};
