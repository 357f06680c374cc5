//! Buffered, blocking playback of a pre-rendered PCM byte stream.
//!
//! The whole render is enqueued before output starts; the cpal callback
//! drains the ring buffer and fires a one-shot completion signal when it
//! runs dry. One `PlaybackSession` owns one sink for one buffer: create,
//! enqueue, play, wait, drop.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam::channel::{Receiver, Sender, bounded};
use ringbuf::{
    HeapCons, HeapProd, HeapRb,
    traits::{Consumer, Observer, Producer, Split},
};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("no audio output device available")]
    NoOutputDevice,
    #[error("failed to query output device config: {0}")]
    DeviceConfig(#[from] cpal::DefaultStreamConfigError),
    #[error("failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),
    #[error("failed to start output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
    #[error("sink buffer full: enqueued {pushed} of {len} bytes")]
    BufferFull { pushed: usize, len: usize },
}

/// A sink over the default output device that consumes mono, 16-bit signed
/// little-endian PCM at a fixed sample rate.
pub struct BufferedSink {
    device: cpal::Device,
    sample_rate: u32,
    producer: HeapProd<u8>,
    consumer: Option<HeapCons<u8>>,
    done_tx: Option<Sender<()>>,
    done_rx: Receiver<()>,
    stream: Option<cpal::Stream>,
}

impl BufferedSink {
    /// Acquire the default output device and allocate a byte ring of
    /// `capacity`. The ring keeps a one-sample floor so a zero-length
    /// render still drains and completes immediately.
    pub fn new(sample_rate: u32, capacity: usize) -> Result<Self, PlaybackError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(PlaybackError::NoOutputDevice)?;

        let ring = HeapRb::<u8>::new(capacity.max(2));
        let (producer, consumer) = ring.split();
        let (done_tx, done_rx) = bounded(1);

        Ok(Self {
            device,
            sample_rate,
            producer,
            consumer: Some(consumer),
            done_tx: Some(done_tx),
            done_rx,
            stream: None,
        })
    }

    /// Push PCM bytes into the ring. The buffer is sized for one whole
    /// render up front, so a partial push is an error, not backpressure.
    pub fn enqueue(&mut self, bytes: &[u8]) -> Result<(), PlaybackError> {
        let pushed = self.producer.push_slice(bytes);
        if pushed < bytes.len() {
            return Err(PlaybackError::BufferFull {
                pushed,
                len: bytes.len(),
            });
        }
        Ok(())
    }

    /// Build the output stream and start asynchronous playback. The
    /// callback decodes i16 frames, writes the mono sample to every device
    /// channel, and signals completion once the ring is empty.
    pub fn play(&mut self) -> Result<(), PlaybackError> {
        if self.stream.is_some() {
            return Ok(());
        }
        let (Some(mut consumer), Some(done_tx)) = (self.consumer.take(), self.done_tx.take())
        else {
            return Ok(());
        };

        let device_config = self.device.default_output_config()?;
        let channels = device_config.channels().max(1) as usize;
        let stream_config = cpal::StreamConfig {
            channels: channels as u16,
            sample_rate: self.sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        let mut done = Some(done_tx);
        let stream = self.device.build_output_stream(
            &stream_config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                for frame in data.chunks_mut(channels) {
                    let sample = match (consumer.try_pop(), consumer.try_pop()) {
                        (Some(lo), Some(hi)) => {
                            i16::from_le_bytes([lo, hi]) as f32 / i16::MAX as f32
                        }
                        _ => 0.0,
                    };
                    frame.fill(sample);
                }

                if consumer.is_empty() {
                    if let Some(tx) = done.take() {
                        let _ = tx.try_send(());
                    }
                }
            },
            |err| error!("output stream error: {err}"),
            None,
        )?;

        stream.play()?;
        self.stream = Some(stream);
        Ok(())
    }

    /// Block until the callback reports the enqueued data fully consumed.
    /// Signaled exactly once per sink; also unblocks if the stream goes
    /// away, so teardown can never leave a waiter hanging.
    pub fn wait_until_done(&self) {
        let _ = self.done_rx.recv();
    }
}

/// One PCM buffer bound to one sink. Dropping the session (normally via
/// `play_to_completion`) releases the device stream.
pub struct PlaybackSession {
    sink: BufferedSink,
}

impl PlaybackSession {
    /// Create a sink sized to the buffer and enqueue all of it before
    /// playback starts. Nothing streams incrementally.
    pub fn new(pcm: &[u8], sample_rate: u32) -> Result<Self, PlaybackError> {
        let mut sink = BufferedSink::new(sample_rate, pcm.len())?;
        sink.enqueue(pcm)?;
        Ok(Self { sink })
    }

    /// Start output and block the calling thread until completion.
    pub fn play_to_completion(mut self) -> Result<(), PlaybackError> {
        self.sink.play()?;
        self.sink.wait_until_done();
        Ok(())
    }
}
