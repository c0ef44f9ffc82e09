/// Session tracker: turns the classifier's boolean stream into at most one
/// trigger per continuous hand-cursor session.
///
/// Transitions, in priority order:
///   enter   (false → true):  start the session, arm the trigger. Never
///                            emits, even with zero dwell; emission happens
///                            on a later evaluation of the same session.
///   exit    (true → false):  drop the session. Never emits.
///   sustain (true → true):   once the dwell time has elapsed, emit exactly
///                            once and mark the session triggered.
///
/// The waveform is stamped from the value passed for the emitting
/// evaluation, so a settings change mid-session lands on that session's
/// trigger if it hasn't fired yet.

use crate::classifier::HandHeuristic;
use crate::cursor::CursorSample;
use std::time::{Duration, Instant};

/// A fired trigger, carrying the waveform the actuator should play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerEvent {
    pub waveform: String,
}

pub struct SessionTracker {
    heuristic: HandHeuristic,
    min_dwell: Duration,
    is_hand: bool,
    session_start: Option<Instant>,
    triggered: bool,
}

impl SessionTracker {
    pub fn new(heuristic: HandHeuristic, min_dwell: Duration) -> Self {
        Self {
            heuristic,
            min_dwell,
            is_hand: false,
            session_start: None,
            triggered: false,
        }
    }

    /// Test hook: whether the tracker is currently inside a hand session.
    #[cfg(test)]
    pub fn is_hand(&self) -> bool {
        self.is_hand
    }

    /// Single entry point for both the poll tick and the change-notification
    /// wake. `waveform` is the current Config Cell value; it is only used if
    /// this evaluation emits.
    pub fn on_sample(
        &mut self,
        sample: Option<&CursorSample>,
        now: Instant,
        waveform: &str,
    ) -> Option<TriggerEvent> {
        let is_now_hand = self.heuristic.classify(sample);

        if is_now_hand && !self.is_hand {
            log::info!("Entered clickable area (hand cursor detected)");
            self.is_hand = true;
            self.session_start = Some(now);
            self.triggered = false;
            None
        } else if !is_now_hand && self.is_hand {
            log::info!("Left clickable area (hand cursor removed)");
            self.is_hand = false;
            self.session_start = None;
            self.triggered = false;
            None
        } else if is_now_hand && !self.triggered {
            let started = self.session_start?;
            if now.duration_since(started) >= self.min_dwell {
                self.triggered = true;
                Some(TriggerEvent { waveform: waveform.to_string() })
            } else {
                None
            }
        } else {
            None
        }
    }

    /// Back to the construction state. Called on disable.
    pub fn reset(&mut self) {
        self.is_hand = false;
        self.session_start = None;
        self.triggered = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HAND: CursorSample = CursorSample { width: 48, height: 48, hot_x: 12, hot_y: 6 };
    const ARROW: CursorSample = CursorSample { width: 24, height: 36, hot_x: 0, hot_y: 0 };

    fn tracker(min_dwell_ms: u64) -> SessionTracker {
        SessionTracker::new(HandHeuristic::ShapeHotspot, Duration::from_millis(min_dwell_ms))
    }

    fn at(t0: Instant, ms: u64) -> Instant {
        t0 + Duration::from_millis(ms)
    }

    #[test]
    fn entry_tick_never_emits() {
        let mut tr = tracker(0);
        let t0 = Instant::now();
        assert_eq!(tr.on_sample(Some(&HAND), t0, "WAVE"), None);
        assert!(tr.is_hand());
    }

    #[test]
    fn zero_dwell_emits_on_next_evaluation_exactly_once() {
        let mut tr = tracker(0);
        let t0 = Instant::now();
        assert_eq!(tr.on_sample(Some(&HAND), t0, "WAVE"), None);
        assert_eq!(
            tr.on_sample(Some(&HAND), at(t0, 50), "WAVE"),
            Some(TriggerEvent { waveform: "WAVE".into() })
        );
        // Session continues: no further emissions
        assert_eq!(tr.on_sample(Some(&HAND), at(t0, 100), "WAVE"), None);
        assert_eq!(tr.on_sample(Some(&HAND), at(t0, 5000), "WAVE"), None);
    }

    #[test]
    fn dwell_withholds_until_elapsed() {
        let mut tr = tracker(200);
        let t0 = Instant::now();
        assert_eq!(tr.on_sample(Some(&HAND), t0, "WAVE"), None); // enter
        assert_eq!(tr.on_sample(Some(&HAND), at(t0, 50), "WAVE"), None);
        assert_eq!(tr.on_sample(Some(&HAND), at(t0, 199), "WAVE"), None);
        // First qualifying sustain emits
        assert!(tr.on_sample(Some(&HAND), at(t0, 200), "WAVE").is_some());
        assert_eq!(tr.on_sample(Some(&HAND), at(t0, 250), "WAVE"), None);
    }

    #[test]
    fn exit_never_emits() {
        let mut tr = tracker(0);
        let t0 = Instant::now();
        tr.on_sample(Some(&HAND), t0, "WAVE");
        // Leave before the sustain tick: the armed trigger must not fire on exit
        assert_eq!(tr.on_sample(Some(&ARROW), at(t0, 50), "WAVE"), None);
        assert!(!tr.is_hand());
    }

    #[test]
    fn exit_with_pending_dwell_never_emits() {
        let mut tr = tracker(500);
        let t0 = Instant::now();
        tr.on_sample(Some(&HAND), t0, "WAVE");
        tr.on_sample(Some(&HAND), at(t0, 100), "WAVE");
        // Exit long after the dwell would have elapsed: still nothing
        assert_eq!(tr.on_sample(None, at(t0, 900), "WAVE"), None);
    }

    #[test]
    fn at_most_one_trigger_per_session() {
        let mut tr = tracker(0);
        let t0 = Instant::now();
        let mut fired = 0;
        for i in 0..20 {
            if tr.on_sample(Some(&HAND), at(t0, i * 50), "WAVE").is_some() {
                fired += 1;
            }
        }
        tr.on_sample(Some(&ARROW), at(t0, 1000), "WAVE");
        assert_eq!(fired, 1);
    }

    #[test]
    fn reentry_rearms_the_trigger() {
        let mut tr = tracker(0);
        let t0 = Instant::now();
        tr.on_sample(Some(&HAND), t0, "A");
        assert!(tr.on_sample(Some(&HAND), at(t0, 50), "A").is_some());
        tr.on_sample(Some(&ARROW), at(t0, 100), "A"); // exit
        tr.on_sample(Some(&HAND), at(t0, 150), "B"); // re-enter
        assert_eq!(
            tr.on_sample(Some(&HAND), at(t0, 200), "B"),
            Some(TriggerEvent { waveform: "B".into() })
        );
    }

    #[test]
    fn absent_sample_drives_exit() {
        let mut tr = tracker(0);
        let t0 = Instant::now();
        tr.on_sample(Some(&HAND), t0, "WAVE");
        assert!(tr.is_hand());
        assert_eq!(tr.on_sample(None, at(t0, 50), "WAVE"), None);
        assert!(!tr.is_hand());
        // Still out on the next evaluation, no emission
        assert_eq!(tr.on_sample(None, at(t0, 100), "WAVE"), None);
    }

    #[test]
    fn waveform_read_at_emission_time() {
        let mut tr = tracker(100);
        let t0 = Instant::now();
        tr.on_sample(Some(&HAND), t0, "OLD");
        tr.on_sample(Some(&HAND), at(t0, 50), "OLD");
        // The cell changed mid-session, before the trigger fired
        assert_eq!(
            tr.on_sample(Some(&HAND), at(t0, 150), "NEW"),
            Some(TriggerEvent { waveform: "NEW".into() })
        );
    }

    #[test]
    fn non_hand_stream_stays_silent() {
        let mut tr = tracker(0);
        let t0 = Instant::now();
        for i in 0..10 {
            assert_eq!(tr.on_sample(Some(&ARROW), at(t0, i * 50), "WAVE"), None);
            assert!(!tr.is_hand());
        }
    }

    #[test]
    fn reset_clears_an_active_session() {
        let mut tr = tracker(0);
        let t0 = Instant::now();
        tr.on_sample(Some(&HAND), t0, "WAVE");
        tr.reset();
        assert!(!tr.is_hand());
        // After reset the next hand sample is a fresh entry, not a sustain
        assert_eq!(tr.on_sample(Some(&HAND), at(t0, 50), "WAVE"), None);
        assert!(tr.on_sample(Some(&HAND), at(t0, 100), "WAVE").is_some());
    }
}
