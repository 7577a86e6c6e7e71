//! Maps raw wheel, touch and key input onto navigation intents.

use crate::config::NavConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// A navigation request after input arbitration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Step(Direction),
    /// "Next" control inside slide `i`: go to `i + 1`.
    NextFrom(usize),
    /// Chained walk back to the first slide.
    ReturnToTop,
}

/// Positive deltas scroll down, i.e. forward.
pub fn wheel_direction(delta_y: f64, threshold: f64) -> Option<Direction> {
    if delta_y > threshold {
        Some(Direction::Next)
    } else if delta_y < -threshold {
        Some(Direction::Previous)
    } else {
        None
    }
}

/// `dy` is start minus end: swiping up (finger moving toward the top)
/// advances.
pub fn swipe_direction(dy: f64, threshold: f64) -> Option<Direction> {
    if dy.abs() <= threshold {
        None
    } else if dy > 0.0 {
        Some(Direction::Next)
    } else {
        Some(Direction::Previous)
    }
}

pub fn key_intent(key: &str) -> Option<Intent> {
    match key {
        "ArrowDown" | "ArrowRight" | "PageDown" => Some(Intent::Step(Direction::Next)),
        "ArrowUp" | "ArrowLeft" | "PageUp" => Some(Intent::Step(Direction::Previous)),
        "Home" => Some(Intent::ReturnToTop),
        _ => None,
    }
}

/// Per-page input state: thresholds plus the pending touch start.
#[derive(Clone, Debug)]
pub struct InputRouter {
    wheel_threshold: f64,
    swipe_threshold: f64,
    touch_start_y: Option<f64>,
}

impl InputRouter {
    pub fn new(cfg: &NavConfig) -> Self {
        InputRouter {
            wheel_threshold: cfg.wheel_threshold,
            swipe_threshold: cfg.swipe_threshold,
            touch_start_y: None,
        }
    }

    /// One wheel flick must not queue several moves, so wheel input is
    /// dropped outright while a transition is in flight.
    pub fn on_wheel(&self, delta_y: f64, busy: bool) -> Option<Intent> {
        if busy {
            return None;
        }
        wheel_direction(delta_y, self.wheel_threshold).map(Intent::Step)
    }

    pub fn on_touch_start(&mut self, y: f64) {
        self.touch_start_y = Some(y);
    }

    pub fn on_touch_end(&mut self, y: f64) -> Option<Intent> {
        let start = self.touch_start_y.take()?;
        swipe_direction(start - y, self.swipe_threshold).map(Intent::Step)
    }

    pub fn on_key(&self, key: &str) -> Option<Intent> {
        key_intent(key)
    }
}
