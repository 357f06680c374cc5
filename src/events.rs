use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventKind {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8 },
    /// Raw payload of a set-tempo meta event: big-endian microseconds per
    /// quarter note. Kept as bytes; decoding happens in the tempo map.
    Tempo { data: Vec<u8> },
    /// Anything the renderer does not interpret.
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Absolute tick position, non-decreasing within a track.
    pub tick: u64,
    pub channel: u8,
    pub kind: EventKind,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Track {
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    pub ticks_per_quarter_note: u32,
    pub tracks: Vec<Track>,
}

impl Timeline {
    /// Largest tick over the final event of every track.
    pub fn max_tick(&self) -> u64 {
        self.tracks
            .iter()
            .filter_map(|track| track.events.last())
            .map(|event| event.tick)
            .max()
            .unwrap_or(0)
    }
}
