use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::SAMPLE_RATE;

/// Rendering parameters. The defaults reproduce the reference sound:
/// uniform 1.2x detune, 0.1 s bursts at 0.3 amplitude, and a 1.2x duration
/// stretch that leaves trailing silence before the loop restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub sample_rate: u32,
    /// Seconds of sine burst per note-on.
    pub note_duration: f64,
    pub note_amplitude: f64,
    /// Frequency multiplier applied uniformly to every note.
    pub detune: f64,
    /// Multiplier on the timeline length when sizing the sample buffer.
    pub tail_factor: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            note_duration: 0.1,
            note_amplitude: 0.3,
            detune: 1.2,
            tail_factor: 1.2,
        }
    }
}

impl RenderConfig {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let ron_string = fs::read_to_string(path)?;
        let config: RenderConfig = ron::from_str(&ron_string)?;

        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let ron_string = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        fs::write(path, ron_string)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_constants() {
        let config = RenderConfig::default();
        assert_eq!(config.sample_rate, 44_100);
        assert_eq!(config.note_duration, 0.1);
        assert_eq!(config.note_amplitude, 0.3);
        assert_eq!(config.detune, 1.2);
        assert_eq!(config.tail_factor, 1.2);
    }

    #[test]
    fn ron_round_trip() {
        let config = RenderConfig {
            sample_rate: 22_050,
            note_duration: 0.25,
            note_amplitude: 0.5,
            detune: 1.0,
            tail_factor: 2.0,
        };
        let text = ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default())
            .expect("serialize");
        let back: RenderConfig = ron::from_str(&text).expect("deserialize");
        assert_eq!(back.sample_rate, 22_050);
        assert_eq!(back.detune, 1.0);
    }
}
