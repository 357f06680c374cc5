//! Offline additive synthesis: every note-on becomes a short sine burst
//! summed into a pre-sized mono buffer. There is no envelope: bursts start
//! and stop abruptly, clicks included.

use std::f64::consts::PI;

use crate::config::RenderConfig;
use crate::events::{EventKind, Timeline};
use crate::render::note_to_freq;
use crate::timing::{TempoMap, ticks_to_seconds};

/// Render the whole timeline into a zero-initialized buffer of
/// `total_samples` samples at `config.sample_rate`.
///
/// Only note-ons with velocity > 0 contribute (velocity 0 is the running
/// note-off convention). Overlapping bursts sum unbounded; the PCM encoder
/// clamps later. Writes past the buffer end are clipped.
pub fn synthesize(
    timeline: &Timeline,
    tempo_map: &TempoMap,
    config: &RenderConfig,
    total_samples: usize,
) -> Vec<f32> {
    let mut buffer = vec![0.0f32; total_samples];
    let sample_rate = config.sample_rate as f64;
    let burst_samples = (config.note_duration * sample_rate) as usize;

    for track in &timeline.tracks {
        for event in &track.events {
            let EventKind::NoteOn { note, velocity } = &event.kind else {
                continue;
            };
            if *velocity == 0 {
                continue;
            }

            let onset =
                ticks_to_seconds(event.tick, tempo_map, timeline.ticks_per_quarter_note);
            let freq = note_to_freq(*note) * config.detune;

            let start = (onset * sample_rate).round() as usize;
            if start >= buffer.len() {
                continue;
            }
            let end = (start + burst_samples).min(buffer.len());

            for (n, sample) in buffer[start..end].iter_mut().enumerate() {
                let t = n as f64 / sample_rate;
                *sample += ((2.0 * PI * freq * t).sin() * config.note_amplitude) as f32;
            }
        }
    }

    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Event, Track};

    fn note_on(tick: u64, note: u8, velocity: u8) -> Event {
        Event {
            tick,
            channel: 0,
            kind: EventKind::NoteOn { note, velocity },
        }
    }

    fn single_note_timeline(tick: u64, note: u8, velocity: u8) -> Timeline {
        Timeline {
            ticks_per_quarter_note: 480,
            tracks: vec![Track {
                events: vec![note_on(tick, note, velocity)],
            }],
        }
    }

    #[test]
    fn burst_covers_one_tenth_of_a_second_from_onset() {
        let timeline = single_note_timeline(0, 69, 100);
        let map = TempoMap::from_timeline(&timeline);
        let config = RenderConfig::default();
        let buffer = synthesize(&timeline, &map, &config, 8820);

        // sin(0) == 0, so probe just after the onset
        assert_ne!(buffer[1], 0.0);
        assert_ne!(buffer[4409], 0.0);
        assert!(buffer[4410..].iter().all(|&sample| sample == 0.0));
    }

    #[test]
    fn burst_amplitude_stays_within_configured_bound() {
        let timeline = single_note_timeline(0, 69, 100);
        let map = TempoMap::from_timeline(&timeline);
        let config = RenderConfig::default();
        let buffer = synthesize(&timeline, &map, &config, 4410);

        let peak = buffer.iter().fold(0.0f32, |max, s| max.max(s.abs()));
        assert!(peak > 0.2 && peak <= 0.3 + 1e-6);
    }

    #[test]
    fn velocity_zero_contributes_nothing() {
        let timeline = single_note_timeline(0, 69, 0);
        let map = TempoMap::from_timeline(&timeline);
        let buffer = synthesize(&timeline, &map, &RenderConfig::default(), 4410);
        assert!(buffer.iter().all(|&sample| sample == 0.0));
    }

    #[test]
    fn note_offs_and_other_events_contribute_nothing() {
        let timeline = Timeline {
            ticks_per_quarter_note: 480,
            tracks: vec![Track {
                events: vec![
                    Event {
                        tick: 0,
                        channel: 0,
                        kind: EventKind::NoteOff { note: 69 },
                    },
                    Event {
                        tick: 0,
                        channel: 0,
                        kind: EventKind::Other,
                    },
                ],
            }],
        };
        let map = TempoMap::from_timeline(&timeline);
        let buffer = synthesize(&timeline, &map, &RenderConfig::default(), 4410);
        assert!(buffer.iter().all(|&sample| sample == 0.0));
    }

    #[test]
    fn burst_is_clipped_at_buffer_end() {
        let timeline = single_note_timeline(0, 69, 100);
        let map = TempoMap::from_timeline(&timeline);
        let buffer = synthesize(&timeline, &map, &RenderConfig::default(), 1000);
        assert_eq!(buffer.len(), 1000);
        assert_ne!(buffer[999], 0.0);
    }

    #[test]
    fn note_beyond_buffer_is_dropped() {
        // tick 96,000 at default tempo is 100 s, far past a 1 s buffer
        let timeline = single_note_timeline(96_000, 69, 100);
        let map = TempoMap::from_timeline(&timeline);
        let buffer = synthesize(&timeline, &map, &RenderConfig::default(), 44_100);
        assert!(buffer.iter().all(|&sample| sample == 0.0));
    }

    #[test]
    fn simultaneous_notes_sum() {
        let timeline = Timeline {
            ticks_per_quarter_note: 480,
            tracks: vec![Track {
                events: vec![note_on(0, 69, 100), note_on(0, 69, 100)],
            }],
        };
        let map = TempoMap::from_timeline(&timeline);
        let config = RenderConfig::default();
        let double = synthesize(&timeline, &map, &config, 4410);

        let single_timeline = single_note_timeline(0, 69, 100);
        let single = synthesize(&single_timeline, &map, &config, 4410);

        assert!((double[100] - 2.0 * single[100]).abs() < 1e-6);
    }
}
