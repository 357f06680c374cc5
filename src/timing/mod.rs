mod clock;
mod tempo_map;

pub use clock::{ticks_to_seconds, timeline_duration_seconds};
pub use tempo_map::{DEFAULT_TEMPO, TempoBreakpoint, TempoMap};
