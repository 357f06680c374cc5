use std::sync::Arc;
use std::thread::{self, JoinHandle};

use arc_swap::ArcSwap;
use crossbeam::channel::{Receiver, Sender, TryRecvError, bounded};
use tracing::{debug, info, warn};

use crate::config::RenderConfig;
use crate::events::Timeline;
use crate::playback::{PlaybackError, PlaybackSession};
use crate::render::{encode_pcm16, synthesize};
use crate::timing::{TempoMap, timeline_duration_seconds};

pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// Supplier of decoded timelines. `fetch` is called once per loop iteration
/// and must yield a freshly decoded copy, so every cycle starts from a
/// known-good, unconsumed view of the underlying data.
pub trait TimelineSource: Send + 'static {
    fn fetch(&mut self) -> Result<Timeline, SourceError>;
}

impl<F> TimelineSource for F
where
    F: FnMut() -> Result<Timeline, SourceError> + Send + 'static,
{
    fn fetch(&mut self) -> Result<Timeline, SourceError> {
        self()
    }
}

pub struct PlayerHandle {
    stop_tx: Sender<()>,
    config: Arc<ArcSwap<RenderConfig>>,
    thread: JoinHandle<()>,
}

impl PlayerHandle {
    /// Swap the render settings. The loop reads a fresh snapshot at the top
    /// of every iteration, so the change applies from the next cycle.
    pub fn set_config(&self, config: RenderConfig) {
        self.config.store(Arc::new(config));
    }

    /// Signal the loop to stop and wait for it. Takes effect between
    /// iterations; a cycle already playing runs to completion first.
    pub fn stop(self) {
        let _ = self.stop_tx.send(());
        let _ = self.thread.join();
    }
}

/// Start the playback loop on a dedicated background thread. It runs until
/// `stop` is called or the handle is dropped, re-fetching and re-rendering
/// the timeline on every cycle. A failed cycle is logged and skipped, and
/// the loop presses on.
pub fn spawn_player<S: TimelineSource>(source: S, config: RenderConfig) -> PlayerHandle {
    let (stop_tx, stop_rx) = bounded(1);
    let config = Arc::new(ArcSwap::from_pointee(config));
    let loop_config = Arc::clone(&config);

    let thread = thread::spawn(move || {
        player_thread(source, loop_config, stop_rx);
    });

    PlayerHandle {
        stop_tx,
        config,
        thread,
    }
}

fn player_thread<S: TimelineSource>(
    mut source: S,
    config: Arc<ArcSwap<RenderConfig>>,
    stop_rx: Receiver<()>,
) {
    info!("playback loop started");

    loop {
        match stop_rx.try_recv() {
            Ok(()) | Err(TryRecvError::Disconnected) => break,
            Err(TryRecvError::Empty) => {}
        }

        let config = config.load_full();

        let timeline = match source.fetch() {
            Ok(timeline) => timeline,
            Err(e) => {
                warn!("skipping cycle, timeline source failed: {e}");
                continue;
            }
        };

        if let Err(e) = render_and_play(&timeline, &config) {
            warn!("skipping cycle, playback failed: {e}");
        }
    }

    info!("playback loop stopped");
}

/// One full cycle: tempo map, padded duration, synthesis, PCM encoding, and
/// a blocking playback session.
pub fn render_and_play(timeline: &Timeline, config: &RenderConfig) -> Result<(), PlaybackError> {
    let tempo_map = TempoMap::from_timeline(timeline);
    let total_seconds = timeline_duration_seconds(timeline, &tempo_map) * config.tail_factor;
    let total_samples = (total_seconds * config.sample_rate as f64).ceil() as usize;

    let samples = synthesize(timeline, &tempo_map, config, total_samples);
    let pcm = encode_pcm16(&samples);
    debug!(
        seconds = total_seconds,
        bytes = pcm.len(),
        "rendered timeline"
    );

    PlaybackSession::new(&pcm, config.sample_rate)?.play_to_completion()
}
