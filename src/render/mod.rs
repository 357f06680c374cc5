mod pcm;
mod synth;

pub use pcm::encode_pcm16;
pub use synth::synthesize;

/// Equal-tempered frequency of a MIDI note number, A4 (69) = 440 Hz.
pub fn note_to_freq(note: u8) -> f64 {
    440.0 * 2f64.powf((note as f64 - 69.0) / 12.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_pitches() {
        assert_eq!(note_to_freq(69), 440.0);
        assert!((note_to_freq(81) - 880.0).abs() < 1e-9);
        assert!((note_to_freq(57) - 220.0).abs() < 1e-9);
    }
}
