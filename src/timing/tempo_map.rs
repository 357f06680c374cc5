use crate::events::{Event, EventKind, Timeline};

/// 500,000 µs per quarter note, i.e. 120 BPM.
pub const DEFAULT_TEMPO: u32 = 500_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempoBreakpoint {
    pub tick: u64,
    pub micros_per_quarter: u32,
}

#[derive(Debug, Clone)]
pub struct TempoMap {
    breakpoints: Vec<TempoBreakpoint>,
}

impl TempoMap {
    /// Collect tempo breakpoints from one track's events in file order.
    ///
    /// Tempo payloads shorter than 3 bytes are skipped. The sort is stable,
    /// so of two breakpoints at the same tick the one later in file order
    /// ends up last and governs the segment starting there.
    pub fn from_track(events: &[Event]) -> Self {
        let mut breakpoints = Vec::new();

        for event in events {
            if let EventKind::Tempo { data } = &event.kind {
                if data.len() >= 3 {
                    let micros = ((data[0] as u32) << 16)
                        | ((data[1] as u32) << 8)
                        | (data[2] as u32);
                    breakpoints.push(TempoBreakpoint {
                        tick: event.tick,
                        micros_per_quarter: micros,
                    });
                }
            }
        }

        if breakpoints.is_empty() {
            breakpoints.push(TempoBreakpoint {
                tick: 0,
                micros_per_quarter: DEFAULT_TEMPO,
            });
        }

        breakpoints.sort_by_key(|breakpoint| breakpoint.tick);
        Self { breakpoints }
    }

    /// Build from the timeline's first (reference) track.
    pub fn from_timeline(timeline: &Timeline) -> Self {
        match timeline.tracks.first() {
            Some(track) => Self::from_track(&track.events),
            None => Self::from_track(&[]),
        }
    }

    pub fn breakpoints(&self) -> &[TempoBreakpoint] {
        &self.breakpoints
    }
}
