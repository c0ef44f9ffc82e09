/// Trigger sink: forwards fired triggers to the haptics service.
///
/// Delivery is a single `POST <endpoint>/PlayWaveform` with the waveform
/// name as the body, fire-and-forget on the blocking pool. Success and
/// failure are both logged and nothing else happens: no retry, and the
/// session stays triggered whether or not the pulse reached the device.
///
/// The call cannot be aborted once dispatched; a completion that lands
/// after `disable()` checks the liveness flag and stays silent.

use crate::session::TriggerEvent;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct TriggerSink {
    url: String,
    live: Arc<AtomicBool>,
}

impl TriggerSink {
    pub fn new(endpoint: &str, live: Arc<AtomicBool>) -> Self {
        Self {
            url: play_waveform_url(endpoint),
            live,
        }
    }

    /// Dispatch without waiting. The completion runs later on the blocking
    /// pool and only logs.
    pub fn send(&self, event: TriggerEvent) {
        log::info!(
            "Triggering haptic feedback with waveform: {}",
            event.waveform
        );
        let url = self.url.clone();
        let live = Arc::clone(&self.live);
        tokio::task::spawn_blocking(move || {
            let result = play_waveform(&url, &event.waveform);
            if !live.load(Ordering::Relaxed) {
                // Completed after disable(), nothing left to report against
                return;
            }
            match result {
                Ok(reply) if reply.is_empty() => {
                    log::info!("Haptic feedback triggered successfully");
                }
                Ok(reply) => {
                    log::info!("Haptic feedback triggered successfully: {reply}");
                }
                Err(e) => log::warn!("Failed to trigger haptic feedback: {e}"),
            }
        });
    }
}

fn play_waveform_url(endpoint: &str) -> String {
    format!("{}/PlayWaveform", endpoint.trim_end_matches('/'))
}

fn play_waveform(url: &str, waveform: &str) -> Result<String, Box<dyn std::error::Error>> {
    let mut response = ureq::post(url)
        .header("Content-Type", "text/plain")
        .send(waveform)?;
    Ok(response.body_mut().read_to_string()?)
}
