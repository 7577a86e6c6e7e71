use serde::Deserialize;
use thiserror::Error;

/// Upper bound for any timing value; keeps timers within `setTimeout` range.
pub const MAX_TIMING_MS: u32 = 60_000;

/// Blush / rose tones matching the page palette.
pub const DEFAULT_PALETTE: [&str; 6] = [
    "#E8A0B0", "#F5C8D5", "#F0B8C8", "#D98AA0", "#F7D0DC", "#E8B5C2",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("petal palette is empty")]
    EmptyPalette,
    #[error("forward lock ({forward}ms) must be longer than backward lock ({backward}ms)")]
    LockOrder { forward: u32, backward: u32 },
    #[error("chain step delay ({step}ms) must exceed the backward lock ({backward}ms)")]
    ChainTooFast { step: u32, backward: u32 },
    #[error("{field} lock ({lock}ms) ends before its {transition}ms transition")]
    LockShorterThanTransition {
        field: &'static str,
        lock: u32,
        transition: u32,
    },
    #[error("{field} = {ms}ms exceeds the 60000ms timer limit")]
    TimingOutOfRange { field: &'static str, ms: u32 },
    #[error("narrow petal count ({narrow}) must be below the wide count ({count})")]
    NarrowCount { narrow: usize, count: usize },
}

/// Petal generator settings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PetalConfig {
    pub count: usize,
    pub narrow_count: usize,
    /// Viewports at or below this width (px) use `narrow_count`.
    pub narrow_breakpoint: f64,
    pub palette: Vec<String>,
}

impl Default for PetalConfig {
    fn default() -> Self {
        PetalConfig {
            count: 26,
            narrow_count: 15,
            narrow_breakpoint: 600.0,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Slide transition timings, all in milliseconds.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct NavConfig {
    /// Stylesheet duration of a forward slide-in.
    pub forward_transition_ms: u32,
    /// How long `busy` is held after a forward move.
    pub forward_lock_ms: u32,
    /// How long `busy` is held after a backward move; the inline override is
    /// cleared at the same moment.
    pub backward_lock_ms: u32,
    /// Delay before a first-visited slide gets its visible class.
    pub reveal_delay_ms: u32,
    /// Interval between steps of a chained jump.
    pub chain_step_ms: u32,
    pub backward_easing: String,
    pub wheel_threshold: f64,
    pub swipe_threshold: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        NavConfig {
            forward_transition_ms: 750,
            forward_lock_ms: 800,
            backward_lock_ms: 400,
            reveal_delay_ms: 150,
            chain_step_ms: 425,
            backward_easing: "cubic-bezier(0.76, 0, 0.24, 1)".to_string(),
            wheel_threshold: 10.0,
            swipe_threshold: 40.0,
        }
    }
}

impl NavConfig {
    /// Backward moves run at exactly twice the forward speed.
    pub fn backward_transition_ms(&self) -> u32 {
        self.forward_transition_ms / 2
    }

    /// Inline `transition` value applied to a slide leaving backwards.
    pub fn backward_transition(&self) -> String {
        format!(
            "transform {}s {}",
            format_seconds(self.backward_transition_ms()),
            self.backward_easing
        )
    }
}

fn format_seconds(ms: u32) -> String {
    let s = format!("{:.3}", ms as f64 / 1000.0);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() { "0".to_string() } else { s.to_string() }
}

/// DOM hooks the wasm host looks up.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Selectors {
    pub petal_container_id: String,
    pub petal_class: String,
    pub slide: String,
    pub next_control: String,
    pub top_control: String,
    pub title: String,
    pub visible_class: String,
    pub title_reveal_class: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Selectors {
            petal_container_id: "petals".to_string(),
            petal_class: "petal".to_string(),
            slide: ".slide".to_string(),
            next_control: ".scroll-cue".to_string(),
            top_control: ".scroll-top".to_string(),
            title: ".slide__title".to_string(),
            visible_class: "slide--visible".to_string(),
            title_reveal_class: "is-revealed".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    pub petals: PetalConfig,
    pub navigation: NavConfig,
    pub selectors: Selectors,
}

impl PageConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: PageConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let petals = &self.petals;
        if petals.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if petals.narrow_count >= petals.count {
            return Err(ConfigError::NarrowCount {
                narrow: petals.narrow_count,
                count: petals.count,
            });
        }
        let nav = &self.navigation;
        for (field, ms) in [
            ("forward_transition_ms", nav.forward_transition_ms),
            ("forward_lock_ms", nav.forward_lock_ms),
            ("backward_lock_ms", nav.backward_lock_ms),
            ("reveal_delay_ms", nav.reveal_delay_ms),
            ("chain_step_ms", nav.chain_step_ms),
        ] {
            if ms > MAX_TIMING_MS {
                return Err(ConfigError::TimingOutOfRange { field, ms });
            }
        }
        if nav.forward_lock_ms <= nav.backward_lock_ms {
            return Err(ConfigError::LockOrder {
                forward: nav.forward_lock_ms,
                backward: nav.backward_lock_ms,
            });
        }
        // busy must outlast the animation it guards
        if nav.forward_lock_ms < nav.forward_transition_ms {
            return Err(ConfigError::LockShorterThanTransition {
                field: "forward",
                lock: nav.forward_lock_ms,
                transition: nav.forward_transition_ms,
            });
        }
        if nav.backward_lock_ms < nav.backward_transition_ms() {
            return Err(ConfigError::LockShorterThanTransition {
                field: "backward",
                lock: nav.backward_lock_ms,
                transition: nav.backward_transition_ms(),
            });
        }
        if nav.chain_step_ms <= nav.backward_lock_ms {
            return Err(ConfigError::ChainTooFast {
                step: nav.chain_step_ms,
                backward: nav.backward_lock_ms,
            });
        }
        Ok(())
    }
}
