/// Vertical placement of a slide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Offset {
    /// Untouched: the stylesheet default (parked below the viewport).
    #[default]
    Initial,
    /// `translateY(0)`, on screen.
    Rest,
    /// `translateY(100%)`, pushed out below.
    Displaced,
}

impl Offset {
    /// Inline `transform` value, `None` for the stylesheet default.
    pub fn transform(self) -> Option<&'static str> {
        match self {
            Offset::Initial => None,
            Offset::Rest => Some("translateY(0)"),
            Offset::Displaced => Some("translateY(100%)"),
        }
    }
}

/// One mutation of the rendering collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    SetOffset { slide: usize, offset: Offset },
    /// `None` clears the inline override.
    SetTransition { slide: usize, value: Option<String> },
    MarkVisible { slide: usize },
    RevealTitle { slide: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delay {
    Millis(u32),
    /// Animation frames; the host waits for this many repaints.
    Frames(u32),
}

/// Deferred work the host hands back through `Navigator::fire`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timer {
    ClearTransition { slide: usize },
    Reveal { slide: usize },
    Release,
    ChainStep { target: usize, token: u64, attempts_left: usize },
    InitialReveal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scheduled {
    pub delay: Delay,
    pub timer: Timer,
}

impl Scheduled {
    pub fn millis(ms: u32, timer: Timer) -> Self {
        Scheduled {
            delay: Delay::Millis(ms),
            timer,
        }
    }
}

/// Effects to apply now plus timers to arm, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Plan {
    pub effects: Vec<Effect>,
    pub timers: Vec<Scheduled>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty() && self.timers.is_empty()
    }
}
