/// Quantize a float sample buffer to 16-bit signed little-endian PCM.
///
/// Samples are clamped to [-1.0, 1.0] first, so -1.0 lands on -32767
/// (magnitude equal to the positive full scale, no wrap to i16::MIN).
pub fn encode_pcm16(samples: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}
