//! One-slide-at-a-time navigation with a busy lock.
//!
//! The navigator never touches the page. Each operation returns a [`Plan`]
//! of effects to apply immediately and timers to arm; when a timer elapses
//! the host passes it back to [`Navigator::fire`].

use thiserror::Error;

use crate::config::NavConfig;
use crate::input::{Direction, Intent};
use crate::plan::{Delay, Effect, Offset, Plan, Scheduled, Timer};

/// Why a `go_to` request was dropped.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NavError {
    #[error("a transition is already in flight")]
    Busy,
    #[error("slide {0} is already current")]
    SameSlide(usize),
    #[error("slide {target} is out of range (have {len})")]
    OutOfRange { target: usize, len: usize },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Slide {
    /// Set once the content fade-in has been triggered.
    pub visible: bool,
    pub offset: Offset,
    /// Inline transition override, only present while leaving backwards.
    pub transition: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavigationState {
    pub current: usize,
    pub busy: bool,
}

pub struct Navigator {
    cfg: NavConfig,
    slides: Vec<Slide>,
    current: usize,
    busy: bool,
    chain_token: u64,
}

impl Navigator {
    /// Returns `None` when there is nothing to navigate.
    pub fn new(slide_count: usize, cfg: NavConfig) -> Option<Self> {
        if slide_count == 0 {
            return None;
        }
        Some(Navigator {
            cfg,
            slides: vec![Slide::default(); slide_count],
            current: 0,
            busy: false,
            chain_token: 0,
        })
    }

    pub fn state(&self) -> NavigationState {
        NavigationState {
            current: self.current,
            busy: self.busy,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn config(&self) -> &NavConfig {
        &self.cfg
    }

    /// First paint: park slide 0 on screen with transitions disabled, then
    /// reveal it two frames later once that state has been committed.
    pub fn start(&mut self) -> Plan {
        let first = &mut self.slides[0];
        first.offset = Offset::Rest;
        first.transition = Some("none".to_string());
        Plan {
            effects: vec![
                Effect::SetTransition {
                    slide: 0,
                    value: Some("none".to_string()),
                },
                Effect::SetOffset {
                    slide: 0,
                    offset: Offset::Rest,
                },
            ],
            timers: vec![Scheduled {
                delay: Delay::Frames(2),
                timer: Timer::InitialReveal,
            }],
        }
    }

    /// Single entry point for every slide transition.
    pub fn go_to(&mut self, target: usize) -> Result<Plan, NavError> {
        if self.busy {
            return Err(NavError::Busy);
        }
        if target == self.current {
            return Err(NavError::SameSlide(target));
        }
        if target >= self.slides.len() {
            return Err(NavError::OutOfRange {
                target,
                len: self.slides.len(),
            });
        }

        self.busy = true;
        let from = self.current;
        let mut plan = Plan::default();

        let lock = if target > from {
            // incoming slide covers the source using the stylesheet timing
            self.slides[target].offset = Offset::Rest;
            plan.effects.push(Effect::SetOffset {
                slide: target,
                offset: Offset::Rest,
            });
            self.cfg.forward_lock_ms
        } else {
            let transition = self.cfg.backward_transition();
            let source = &mut self.slides[from];
            source.transition = Some(transition.clone());
            source.offset = Offset::Displaced;
            plan.effects.push(Effect::SetTransition {
                slide: from,
                value: Some(transition),
            });
            plan.effects.push(Effect::SetOffset {
                slide: from,
                offset: Offset::Displaced,
            });
            // a slide skipped by a forward jump is still parked off screen
            if self.slides[target].offset != Offset::Rest {
                self.slides[target].offset = Offset::Rest;
                plan.effects.push(Effect::SetOffset {
                    slide: target,
                    offset: Offset::Rest,
                });
            }
            plan.timers.push(Scheduled::millis(
                self.cfg.backward_lock_ms,
                Timer::ClearTransition { slide: from },
            ));
            self.cfg.backward_lock_ms
        };

        if !self.slides[target].visible {
            plan.timers.push(Scheduled::millis(
                self.cfg.reveal_delay_ms,
                Timer::Reveal { slide: target },
            ));
        }

        self.current = target;
        plan.timers.push(Scheduled::millis(lock, Timer::Release));
        Ok(plan)
    }

    /// Moves one slide in `dir`; the edges are silent no-ops.
    pub fn step(&mut self, dir: Direction) -> Result<Plan, NavError> {
        let target = match dir {
            Direction::Next => self.current + 1,
            Direction::Previous => match self.current.checked_sub(1) {
                Some(t) => t,
                None => return Err(NavError::OutOfRange {
                    target: 0,
                    len: self.slides.len(),
                }),
            },
        };
        self.go_to(target)
    }

    /// Walks toward `target` one slide at a time so every intermediate
    /// transition plays. Starting a new chain supersedes a running one.
    pub fn go_to_chained(&mut self, target: usize) -> Plan {
        if target >= self.slides.len() {
            return Plan::default();
        }
        self.chain_token += 1;
        let attempts = self.chain_budget();
        self.chain_step(target, self.chain_token, attempts)
    }

    /// Upper bound on chain iterations: every hop may be refused once per
    /// lock window before it lands.
    fn chain_budget(&self) -> usize {
        let per_hop = self
            .cfg
            .forward_lock_ms
            .div_ceil(self.cfg.chain_step_ms.max(1)) as usize
            + 1;
        self.slides.len() * per_hop
    }

    fn chain_step(&mut self, target: usize, token: u64, attempts_left: usize) -> Plan {
        if token != self.chain_token || self.current == target {
            return Plan::default();
        }
        let dir = if target > self.current {
            Direction::Next
        } else {
            Direction::Previous
        };
        let mut plan = self.step(dir).unwrap_or_default();
        if self.current != target && attempts_left > 0 {
            plan.timers.push(Scheduled::millis(
                self.cfg.chain_step_ms,
                Timer::ChainStep {
                    target,
                    token,
                    attempts_left: attempts_left - 1,
                },
            ));
        }
        plan
    }

    /// Routes a normalized input request. Rejections are dropped.
    pub fn dispatch(&mut self, intent: Intent) -> Plan {
        let result = match intent {
            Intent::Step(dir) => self.step(dir),
            Intent::NextFrom(i) => self.go_to(i + 1),
            Intent::ReturnToTop => return self.go_to_chained(0),
        };
        result.unwrap_or_default()
    }

    /// Handles an elapsed timer.
    pub fn fire(&mut self, timer: Timer) -> Plan {
        let mut plan = Plan::default();
        match timer {
            Timer::ClearTransition { slide } => {
                if let Some(s) = self.slides.get_mut(slide) {
                    s.transition = None;
                    plan.effects.push(Effect::SetTransition { slide, value: None });
                }
            }
            Timer::Reveal { slide } => {
                if let Some(s) = self.slides.get_mut(slide)
                    && !s.visible
                {
                    s.visible = true;
                    plan.effects.push(Effect::MarkVisible { slide });
                }
            }
            Timer::Release => self.busy = false,
            Timer::ChainStep {
                target,
                token,
                attempts_left,
            } => return self.chain_step(target, token, attempts_left),
            Timer::InitialReveal => {
                let first = &mut self.slides[0];
                first.transition = None;
                plan.effects.push(Effect::SetTransition {
                    slide: 0,
                    value: None,
                });
                if !first.visible {
                    first.visible = true;
                    plan.effects.push(Effect::MarkVisible { slide: 0 });
                }
                plan.effects.push(Effect::RevealTitle { slide: 0 });
            }
        }
        plan
    }
}
