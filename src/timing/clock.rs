use crate::events::Timeline;
use crate::timing::TempoMap;

/// Convert an absolute tick position into elapsed seconds by walking the
/// tempo segments in order. Each breakpoint opens a segment that ends at the
/// next breakpoint's tick (or at the query tick for the last one); the
/// segment contributes its tick span at its own tempo. O(breakpoints) per
/// query; tempo maps stay tiny next to event counts.
pub fn ticks_to_seconds(tick: u64, tempo_map: &TempoMap, ticks_per_quarter_note: u32) -> f64 {
    let breakpoints = tempo_map.breakpoints();
    let mut seconds = 0.0;

    for (i, current) in breakpoints.iter().enumerate() {
        let next = breakpoints.get(i + 1);
        let start = current.tick;
        let end = next.map_or(tick, |breakpoint| breakpoint.tick);

        if tick < start {
            break;
        }

        let span = tick.min(end).saturating_sub(start);
        seconds += span as f64 * (current.micros_per_quarter as f64 / 1_000_000.0)
            / ticks_per_quarter_note as f64;

        if let Some(next) = next {
            if tick < next.tick {
                break;
            }
        }
    }

    seconds
}

/// Unpadded wall-clock length of the timeline: the conversion of the largest
/// final-event tick across tracks.
pub fn timeline_duration_seconds(timeline: &Timeline, tempo_map: &TempoMap) -> f64 {
    ticks_to_seconds(
        timeline.max_tick(),
        tempo_map,
        timeline.ticks_per_quarter_note,
    )
}
