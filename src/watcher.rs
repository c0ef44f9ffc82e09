/// File-change notifications bridged onto the tokio runtime.
///
/// notify's watcher delivers events on its own thread; `FileWatcher` forwards
/// them into a tokio mpsc channel so the engine and the settings reloader can
/// select on them. Watched files may not exist yet, so the watch is placed on
/// the parent directory and events are filtered by path.

use notify::{Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::{self, Receiver, Sender};

pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
}

impl FileWatcher {
    /// Watch a directory (non-recursive).
    pub fn new(dir: &Path) -> notify::Result<Self> {
        let (tx, rx) = mpsc::channel(100);

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.blocking_send(res);
            },
            NotifyConfig::default(),
        )?;

        watcher.watch(dir, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }

    pub async fn next_event(&mut self) -> Option<notify::Result<Event>> {
        self.rx.recv().await
    }
}

/// Does this event concern the given file, with a kind that changes its
/// content or existence? Access/metadata-only events are ignored.
pub fn touches(event: &Event, path: &Path) -> bool {
    if !matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) {
        return false;
    }
    event.paths.iter().any(|p| p == path)
}

/// Forward "the sprite file may have changed" wakeups to the engine.
///
/// The payload carries no guarantees (the engine re-samples on every wake),
/// so bursts are coalesced with `try_send` on a small channel. Returns when
/// the watch directory is missing or the watcher dies; the engine's poll
/// ticker covers sampling either way.
pub async fn run_sprite_watcher(sprite_path: PathBuf, wake_tx: Sender<()>) {
    let Some(dir) = sprite_path.parent() else {
        log::warn!("Sprite path {} has no parent directory", sprite_path.display());
        return;
    };
    if !dir.exists() {
        log::info!(
            "Sprite directory {} does not exist, polling only",
            dir.display()
        );
        return;
    }

    let mut watcher = match FileWatcher::new(dir) {
        Ok(w) => w,
        Err(e) => {
            log::warn!("Failed to watch sprite file: {e}. Polling only.");
            return;
        }
    };
    log::info!("Watching sprite file: {}", sprite_path.display());

    while let Some(result) = watcher.next_event().await {
        match result {
            Ok(event) if touches(&event, &sprite_path) => {
                let _ = wake_tx.try_send(());
            }
            Ok(_) => {}
            Err(e) => log::warn!("Sprite watch error: {e}"),
        }
    }
}
