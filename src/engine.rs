/// Feedback engine: owns every external handle and drives the session
/// tracker.
///
/// Construction yields an inert instance. `enable()` seeds the waveform
/// cell and spawns the settings and sprite watchers; `disable()` aborts
/// them, clears the liveness flag and resets the tracker. `run()`
/// multiplexes the fixed poll ticker with the sprite-changed wakeups.
/// Both paths converge on the same `check_cursor` entry point, so a wake
/// is an extra evaluation instead of waiting for the next tick.

use crate::actuator::TriggerSink;
use crate::config::Config;
use crate::cursor::{CursorSample, SpriteSampler};
use crate::session::SessionTracker;
use crate::settings;
use crate::watcher;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::interval;

pub struct FeedbackEngine {
    cfg: Config,
    sampler: SpriteSampler,
    tracker: SessionTracker,
    sink: TriggerSink,
    live: Arc<AtomicBool>,
    waveform_rx: Option<watch::Receiver<String>>,
    wake_rx: Option<mpsc::Receiver<()>>,
    tasks: Vec<JoinHandle<()>>,
    /// Previous raw sample, kept for diagnostics only
    last_sample: Option<CursorSample>,
    enabled: bool,
}

impl FeedbackEngine {
    pub fn new(cfg: Config) -> Self {
        let live = Arc::new(AtomicBool::new(false));
        let sampler = SpriteSampler::new(PathBuf::from(&cfg.sprite_path));
        let tracker = SessionTracker::new(cfg.heuristic, Duration::from_millis(cfg.min_dwell_ms));
        let sink = TriggerSink::new(&cfg.actuator_endpoint, Arc::clone(&live));
        Self {
            cfg,
            sampler,
            tracker,
            sink,
            live,
            waveform_rx: None,
            wake_rx: None,
            tasks: Vec::new(),
            last_sample: None,
            enabled: false,
        }
    }

    /// Acquire all external handles: waveform cell, settings watcher,
    /// sprite wake watcher.
    pub fn enable(&mut self) {
        if self.enabled {
            log::warn!("enable() called while already enabled, ignoring");
            return;
        }

        self.live.store(true, Ordering::Relaxed);

        let settings_path = PathBuf::from(&self.cfg.settings_path);
        let (waveform_tx, waveform_rx) = watch::channel(settings::load_waveform(&settings_path));
        self.tasks
            .push(tokio::spawn(settings::run_settings_watcher(settings_path, waveform_tx)));
        self.waveform_rx = Some(waveform_rx);

        let (wake_tx, wake_rx) = mpsc::channel(4);
        self.tasks.push(tokio::spawn(watcher::run_sprite_watcher(
            PathBuf::from(&self.cfg.sprite_path),
            wake_tx,
        )));
        self.wake_rx = Some(wake_rx);

        self.enabled = true;
        log::info!(
            "Cursor feedback enabled ({:?}, dwell {}ms, poll {}ms)",
            self.cfg.heuristic,
            self.cfg.min_dwell_ms,
            self.cfg.poll_interval_ms
        );
    }

    /// Release everything and reset to the construction state. A trigger
    /// delivery still in flight completes as a no-op (liveness flag).
    pub fn disable(&mut self) {
        if !self.enabled {
            return;
        }

        self.live.store(false, Ordering::Relaxed);
        for task in self.tasks.drain(..) {
            task.abort();
        }
        self.waveform_rx = None;
        self.wake_rx = None;
        self.last_sample = None;
        self.tracker.reset();
        self.enabled = false;
        log::info!("Cursor feedback disabled");
    }

    /// Sampling loop. Runs until the future is dropped; if the wake channel
    /// dies (sprite directory missing), degrades to pure polling.
    pub async fn run(&mut self) {
        let mut ticker = interval(Duration::from_millis(self.cfg.poll_interval_ms.max(1)));
        let mut wake_rx = self.wake_rx.take();

        loop {
            tokio::select! {
                _ = ticker.tick() => self.check_cursor(),
                _ = next_wake(&mut wake_rx) => self.check_cursor(),
            }
        }
    }

    /// One evaluation, shared by the tick and wake paths: sample the sprite
    /// and step the tracker; dispatch a trigger if one fires.
    fn check_cursor(&mut self) {
        let sample = self.sampler.sample();

        if sample != self.last_sample {
            log::debug!("Cursor sprite changed: {:?} -> {:?}", self.last_sample, sample);
            self.last_sample = sample;
        }

        let waveform = match self.waveform_rx.as_ref() {
            Some(rx) => rx.borrow().clone(),
            None => settings::DEFAULT_WAVEFORM.to_string(),
        };

        if let Some(event) = self.tracker.on_sample(sample.as_ref(), Instant::now(), &waveform) {
            self.sink.send(event);
        }
    }
}

/// Next wake signal. Once the channel is closed this pends forever instead
/// of resolving, so the select loop falls back to the ticker alone rather
/// than spinning on a dead receiver.
async fn next_wake(rx: &mut Option<mpsc::Receiver<()>>) {
    match rx {
        Some(receiver) => match receiver.recv().await {
            Some(()) => {}
            None => {
                log::debug!("Sprite wake channel closed, polling only");
                *rx = None;
                std::future::pending::<()>().await
            }
        },
        None => std::future::pending::<()>().await,
    }
}
