/// Hand-cursor heuristics: decide whether a sprite looks like a clickable
/// hand/pointer cursor from its geometry alone.
///
/// Two tunings shipped over time and disagree on thresholds (minimum size
/// 28px vs 20px, aspect 0.85–1.15 vs 0.7–1.3). Neither is right for every
/// cursor theme, so both stay selectable in config rather than unified.

use crate::cursor::CursorSample;
use serde::Deserialize;

/// Which geometric policy decides "clickable".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HandHeuristic {
    /// Near-square sprite with the hotspot in the finger-tip region.
    ShapeHotspot,
    /// Size window plus aspect ratio and a minimum area.
    SizeAspect,
}

impl Default for HandHeuristic {
    fn default() -> Self {
        HandHeuristic::ShapeHotspot
    }
}

impl HandHeuristic {
    /// Pure predicate: does this sample look like a hand cursor?
    /// No cursor rendered (None) is never a hand cursor.
    pub fn classify(self, sample: Option<&CursorSample>) -> bool {
        let Some(s) = sample else {
            return false;
        };
        match self {
            HandHeuristic::ShapeHotspot => shape_hotspot(s),
            HandHeuristic::SizeAspect => size_aspect(s),
        }
    }
}

/// Hand cursors are nearly square (arrows are taller than wide, I-beams are
/// thin), medium-sized across 1x/2x scale factors, and anchor their hotspot
/// near the finger tip: not at the corner like an arrow and not centered
/// like a text caret.
fn shape_hotspot(s: &CursorSample) -> bool {
    let aspect = s.width as f64 / s.height as f64;
    if !(0.85..=1.15).contains(&aspect) {
        return false;
    }

    let min_dim = s.width.min(s.height);
    let max_dim = s.width.max(s.height);
    if min_dim < 28 || max_dim > 104 {
        return false;
    }

    let hot_x_ratio = s.hot_x as f64 / s.width as f64;
    let hot_y_ratio = s.hot_y as f64 / s.height as f64;
    if !(0.12..=0.4).contains(&hot_x_ratio) || !(0.08..=0.3).contains(&hot_y_ratio) {
        return false;
    }

    s.width.abs_diff(s.height) <= 8
}

/// Looser tuning: a size window, a wider aspect band, and a minimum area.
/// Ignores the hotspot entirely.
fn size_aspect(s: &CursorSample) -> bool {
    if s.width < 20 || s.height < 20 || s.width > 64 || s.height > 64 {
        return false;
    }
    let aspect = s.width as f64 / s.height as f64;
    let area = s.width * s.height;
    (0.7..=1.3).contains(&aspect) && area >= 600
}
