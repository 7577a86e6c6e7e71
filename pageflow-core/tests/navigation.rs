use pageflow_core::{
    Delay, Direction, Effect, InputRouter, Intent, NavConfig, Navigator, Offset, Plan, Timer,
};

const FRAME_MS: u32 = 16;

/// Drives a navigator against a virtual millisecond clock, recording every
/// applied effect with its timestamp.
struct Sim {
    nav: Navigator,
    now: u32,
    seq: u64,
    pending: Vec<(u32, u64, Timer)>,
    applied: Vec<(u32, Effect)>,
}

impl Sim {
    fn new(slides: usize) -> Self {
        let mut sim = Sim {
            nav: Navigator::new(slides, NavConfig::default()).unwrap(),
            now: 0,
            seq: 0,
            pending: Vec::new(),
            applied: Vec::new(),
        };
        let plan = sim.nav.start();
        sim.apply(plan);
        sim
    }

    fn apply(&mut self, plan: Plan) {
        for e in plan.effects {
            self.applied.push((self.now, e));
        }
        for s in plan.timers {
            let after = match s.delay {
                Delay::Millis(ms) => ms,
                Delay::Frames(n) => n * FRAME_MS,
            };
            self.seq += 1;
            self.pending.push((self.now + after, self.seq, s.timer));
        }
    }

    fn run(&mut self, f: impl FnOnce(&mut Navigator) -> Plan) {
        let plan = f(&mut self.nav);
        self.apply(plan);
    }

    fn advance(&mut self, ms: u32) {
        let until = self.now + ms;
        loop {
            let next = self
                .pending
                .iter()
                .enumerate()
                .filter(|(_, (due, _, _))| *due <= until)
                .min_by_key(|(_, (due, seq, _))| (*due, *seq))
                .map(|(i, _)| i);
            let Some(i) = next else { break };
            let (due, _, timer) = self.pending.remove(i);
            self.now = due;
            let plan = self.nav.fire(timer);
            self.apply(plan);
        }
        self.now = until;
    }

    fn settle(&mut self) {
        self.advance(10_000);
    }

    fn visits(&self) -> Vec<usize> {
        self.applied
            .iter()
            .filter_map(|(_, e)| match e {
                Effect::SetOffset {
                    slide,
                    offset: Offset::Rest,
                } => Some(*slide),
                _ => None,
            })
            .collect()
    }
}

#[test]
fn forward_scenario_timing() {
    let mut sim = Sim::new(3);
    sim.settle();
    let t0 = sim.now;

    sim.run(|n| n.go_to(1).unwrap());
    assert_eq!(sim.nav.current(), 1);
    assert!(sim.nav.is_busy());

    sim.advance(149);
    assert!(!sim.nav.slide(1).unwrap().visible);
    sim.advance(1);
    assert!(sim.nav.slide(1).unwrap().visible);
    assert!(sim.applied.contains(&(t0 + 150, Effect::MarkVisible { slide: 1 })));

    sim.advance(640);
    assert!(sim.nav.is_busy());
    sim.advance(10);
    assert!(!sim.nav.is_busy());
}

#[test]
fn backward_scenario_timing() {
    let mut sim = Sim::new(3);
    sim.run(|n| n.go_to(1).unwrap());
    sim.settle();
    sim.run(|n| n.go_to(2).unwrap());
    sim.settle();
    let t0 = sim.now;

    sim.run(|n| n.go_to(1).unwrap());
    assert_eq!(sim.nav.current(), 1);
    assert_eq!(sim.nav.slide(2).unwrap().offset, Offset::Displaced);
    assert!(sim.nav.slide(2).unwrap().transition.is_some());

    sim.advance(399);
    assert!(sim.nav.is_busy());
    sim.advance(1);
    assert!(!sim.nav.is_busy());
    assert_eq!(sim.nav.slide(2).unwrap().transition, None);
    assert!(sim.applied.contains(&(
        t0 + 400,
        Effect::SetTransition {
            slide: 2,
            value: None
        }
    )));
}

#[test]
fn busy_blocks_every_target() {
    let mut sim = Sim::new(5);
    sim.run(|n| n.go_to(2).unwrap());
    for target in 0..5 {
        assert!(sim.nav.go_to(target).is_err());
        assert_eq!(sim.nav.current(), 2);
    }
    sim.settle();
    assert!(!sim.nav.is_busy());
    assert_eq!(sim.nav.current(), 2);
}

#[test]
fn forward_lock_outlasts_backward_lock() {
    let cfg = NavConfig::default();
    assert!(cfg.forward_lock_ms > cfg.backward_lock_ms);
    assert!(cfg.forward_transition_ms > cfg.backward_transition_ms());
}

#[test]
fn chained_return_visits_every_slide() {
    let mut sim = Sim::new(5);
    for i in 1..5 {
        sim.run(|n| n.go_to(i).unwrap());
        sim.settle();
    }
    let mark = sim.applied.len();

    sim.run(|n| n.go_to_chained(0));
    sim.settle();
    assert_eq!(sim.nav.current(), 0);
    assert!(!sim.nav.is_busy());

    let displaced: Vec<usize> = sim.applied[mark..]
        .iter()
        .filter_map(|(_, e)| match e {
            Effect::SetOffset {
                slide,
                offset: Offset::Displaced,
            } => Some(*slide),
            _ => None,
        })
        .collect();
    assert_eq!(displaced, vec![4, 3, 2, 1]);
}

#[test]
fn chained_forward_retries_through_the_longer_lock() {
    let mut sim = Sim::new(4);
    sim.run(|n| n.go_to_chained(3));
    sim.settle();
    assert_eq!(sim.nav.current(), 3);
    assert_eq!(sim.visits(), vec![0, 1, 2, 3]);
}

#[test]
fn return_to_top_intent_from_the_top_control() {
    let mut sim = Sim::new(3);
    sim.run(|n| n.dispatch(Intent::NextFrom(0)));
    sim.settle();
    sim.run(|n| n.dispatch(Intent::NextFrom(1)));
    sim.settle();
    assert_eq!(sim.nav.current(), 2);

    sim.run(|n| n.dispatch(Intent::ReturnToTop));
    sim.settle();
    assert_eq!(sim.nav.current(), 0);
}

#[test]
fn rapid_wheel_burst_moves_once() {
    let mut sim = Sim::new(4);
    let router = InputRouter::new(sim.nav.config());
    for _ in 0..20 {
        if let Some(intent) = router.on_wheel(60.0, sim.nav.is_busy()) {
            sim.run(|n| n.dispatch(intent));
        }
        sim.advance(5);
    }
    assert_eq!(sim.nav.current(), 1);
    sim.settle();
    assert_eq!(sim.nav.current(), 1);
}

#[test]
fn sub_threshold_input_does_nothing() {
    let mut sim = Sim::new(3);
    let mut router = InputRouter::new(sim.nav.config());
    assert_eq!(router.on_wheel(9.0, false), None);
    router.on_touch_start(100.0);
    assert_eq!(router.on_touch_end(70.0), None);
    let before = sim.applied.len();
    sim.run(|n| n.dispatch(Intent::Step(Direction::Previous)));
    assert_eq!(sim.applied.len(), before);
    assert_eq!(sim.nav.current(), 0);
}

#[test]
fn early_release_still_unlocks() {
    // a host whose timer failed fires `Release` immediately instead of
    // dropping it
    let mut nav = Navigator::new(3, NavConfig::default()).unwrap();
    let plan = nav.go_to(1).unwrap();
    assert!(plan.timers.iter().any(|s| s.timer == Timer::Release));
    assert!(nav.fire(Timer::Release).is_empty());
    assert!(!nav.is_busy());
    assert!(nav.go_to(2).is_ok());
}
