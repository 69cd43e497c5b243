use std::cell::RefCell;
use std::rc::Rc;

use swapview_core::{
    behavior::{SwapBehavior, SwapView},
    config::{ForcePolicy, SwapConfig},
    engine::SwapEngine,
    error::SwapError,
    events::SwapEvent,
    surface::Surfaces,
    timeline::ClockSignal,
};

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Attach,
    Reset {
        current: Option<usize>,
        primary: Option<u32>,
    },
    Start {
        reversing: bool,
        primary: Option<u32>,
        secondary: Option<u32>,
    },
    Update {
        progress: f32,
        reversing: bool,
    },
    End {
        reversing: bool,
        current: Option<usize>,
    },
    Cancel {
        current: Option<usize>,
    },
}

type Log = Rc<RefCell<Vec<Call>>>;

// A behavior that records every callback into a shared log
struct Recorder(Log);

impl SwapBehavior<u32> for Recorder {
    fn on_attach(&mut self, _view: &SwapView<'_, u32>) {
        self.0.borrow_mut().push(Call::Attach);
    }

    fn on_reset(&mut self, view: &SwapView<'_, u32>, surfaces: &mut Surfaces<u32>) {
        self.0.borrow_mut().push(Call::Reset {
            current: view.current_index(),
            primary: surfaces.primary.image,
        });
    }

    fn on_start(&mut self, reversing: bool, _view: &SwapView<'_, u32>, surfaces: &mut Surfaces<u32>) {
        self.0.borrow_mut().push(Call::Start {
            reversing,
            primary: surfaces.primary.image,
            secondary: surfaces.secondary.image,
        });
    }

    fn on_update(
        &mut self,
        progress: f32,
        reversing: bool,
        _view: &SwapView<'_, u32>,
        _surfaces: &mut Surfaces<u32>,
    ) {
        self.0.borrow_mut().push(Call::Update {
            progress,
            reversing,
        });
    }

    fn on_end(&mut self, reversing: bool, view: &SwapView<'_, u32>, _surfaces: &mut Surfaces<u32>) {
        self.0.borrow_mut().push(Call::End {
            reversing,
            current: view.current_index(),
        });
    }

    fn on_cancel(&mut self, view: &SwapView<'_, u32>, _surfaces: &mut Surfaces<u32>) {
        self.0.borrow_mut().push(Call::Cancel {
            current: view.current_index(),
        });
    }
}

fn recorder() -> (Box<dyn SwapBehavior<u32>>, Log) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    (Box::new(Recorder(log.clone())), log)
}

/// Engine over [1, 2, 3, 4] at index 1, non-looping, 100ms swaps.
fn mk_engine() -> (SwapEngine<u32>, Log) {
    let (behavior, log) = recorder();
    let mut eng = SwapEngine::with_behavior(SwapConfig::default().with_duration_ms(100), behavior);
    eng.set_drawables(1, [1, 2, 3, 4]).unwrap();
    log.borrow_mut().clear();
    (eng, log)
}

fn starts(log: &Log) -> usize {
    log.borrow()
        .iter()
        .filter(|c| matches!(c, Call::Start { .. }))
        .count()
}

/// Tick until the running swap finishes.
fn finish(eng: &mut SwapEngine<u32>) {
    for _ in 0..100 {
        if !eng.tick(0.016).unwrap() {
            return;
        }
    }
    panic!("swap did not finish");
}

#[test]
fn neighbour_indices_without_looping() {
    let (eng, _) = mk_engine();
    assert_eq!(eng.previous_index(), Some(0));
    assert_eq!(eng.next_index(), Some(2));
}

#[test]
fn neighbour_indices_with_looping() {
    let (mut eng, _) = mk_engine();
    eng.set_looping(true);
    eng.set_current_index(0).unwrap();
    assert_eq!(eng.previous_index(), Some(3));
    assert_eq!(eng.next_index(), Some(1));
    eng.set_current_index(3).unwrap();
    assert_eq!(eng.next_index(), Some(0));
    eng.set_looping(false);
    assert_eq!(eng.next_index(), Some(3));
    assert_eq!(eng.previous_index(), Some(2));
}

#[test]
fn no_start_at_non_looping_end() {
    let (mut eng, log) = mk_engine();
    eng.set_current_index(99).unwrap();
    assert_eq!(eng.current_index(), Some(3));
    assert_eq!(eng.next_index(), Some(3));
    assert_eq!(eng.show_next(false), Ok(false));
    assert_eq!(eng.show_next(true), Ok(false));
    assert_eq!(starts(&log), 0);

    eng.set_current_index(0).unwrap();
    assert_eq!(eng.show_previous(false), Ok(false));
    assert_eq!(starts(&log), 0);
    assert!(!eng.is_swapping());
}

#[test]
fn show_next_runs_full_lifecycle() {
    let (mut eng, log) = mk_engine();
    eng.set_current_index(0).unwrap();
    log.borrow_mut().clear();

    assert_eq!(eng.show_next(false), Ok(true));
    assert!(eng.is_swapping());
    finish(&mut eng);
    assert_eq!(eng.current_index(), Some(1));

    let calls = log.borrow();
    assert_eq!(
        calls.first(),
        Some(&Call::Start {
            reversing: false,
            primary: Some(1),
            secondary: Some(2)
        })
    );
    let n = calls.len();
    assert_eq!(
        calls[n - 2],
        Call::End {
            reversing: false,
            current: Some(1)
        }
    );
    assert_eq!(
        calls[n - 1],
        Call::Reset {
            current: Some(1),
            primary: Some(2)
        }
    );

    // updates in between are non-decreasing and finish at 1.0
    let progress: Vec<f32> = calls[1..n - 2]
        .iter()
        .map(|c| match c {
            Call::Update {
                progress,
                reversing: false,
            } => *progress,
            other => panic!("unexpected call {other:?}"),
        })
        .collect();
    assert!(!progress.is_empty());
    assert!(progress.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(progress.last(), Some(&1.0));
}

#[test]
fn show_previous_reverses_and_commits() {
    let (mut eng, log) = mk_engine();
    assert_eq!(eng.show_previous(false), Ok(true));
    finish(&mut eng);
    assert_eq!(eng.current_index(), Some(0));
    assert!(log.borrow().contains(&Call::Start {
        reversing: true,
        primary: Some(2),
        secondary: Some(1)
    }));
    assert!(log.borrow().contains(&Call::End {
        reversing: true,
        current: Some(0)
    }));
}

#[test]
fn looping_previous_wraps_through_engine() {
    let (mut eng, _) = mk_engine();
    eng.set_looping(true);
    eng.set_current_index(0).unwrap();
    assert_eq!(eng.show_previous(true), Ok(true));
    finish(&mut eng);
    assert_eq!(eng.current_index(), Some(3));
}

#[test]
fn looping_cycle_returns_to_start() {
    let (mut eng, _) = mk_engine();
    eng.set_looping(true);
    for _ in 0..4 {
        assert_eq!(eng.show_next(false), Ok(true));
        finish(&mut eng);
    }
    assert_eq!(eng.current_index(), Some(1));
}

#[test]
fn navigation_ignored_mid_swap_without_force() {
    let (mut eng, log) = mk_engine();
    eng.show_next(false).unwrap();
    eng.tick(0.05).unwrap();
    assert_eq!(eng.show_next(false), Ok(false));
    assert_eq!(eng.show_previous(false), Ok(false));
    assert_eq!(starts(&log), 1);
    finish(&mut eng);
    assert_eq!(eng.current_index(), Some(2));
}

#[test]
fn forced_navigation_restarts_by_default() {
    let (mut eng, log) = mk_engine();
    eng.show_next(false).unwrap();
    eng.tick(0.05).unwrap();
    log.borrow_mut().clear();

    assert_eq!(eng.show_previous(true), Ok(true));
    assert_eq!(
        log.borrow()[..2].to_vec(),
        vec![
            Call::Cancel { current: Some(1) },
            Call::Start {
                reversing: true,
                primary: Some(2),
                secondary: Some(1)
            }
        ]
    );
    finish(&mut eng);
    assert_eq!(eng.current_index(), Some(0));
}

#[test]
fn forced_navigation_ignored_by_policy() {
    let (behavior, log) = recorder();
    let cfg = SwapConfig::default()
        .with_duration_ms(100)
        .with_force_policy(ForcePolicy::Ignore);
    let mut eng = SwapEngine::with_behavior(cfg, behavior);
    eng.set_drawables(0, [1, 2, 3]).unwrap();

    eng.show_next(false).unwrap();
    assert_eq!(eng.show_next(true), Ok(false));
    assert!(!log.borrow().iter().any(|c| matches!(c, Call::Cancel { .. })));
    finish(&mut eng);
    assert_eq!(eng.current_index(), Some(1));
}

#[test]
fn cancel_does_not_commit() {
    let (mut eng, log) = mk_engine();
    eng.show_next(false).unwrap();
    eng.tick(0.05).unwrap();
    assert!(eng.cancel());
    assert!(!eng.cancel());
    assert!(!eng.is_swapping());
    assert_eq!(eng.current_index(), Some(1));
    assert_eq!(log.borrow().last(), Some(&Call::Cancel { current: Some(1) }));
    assert!(!log.borrow().iter().any(|c| matches!(c, Call::End { .. })));
    // further ticks do nothing
    assert_eq!(eng.tick(1.0), Ok(false));
    assert_eq!(eng.current_index(), Some(1));
}

#[test]
fn set_behavior_attaches_new_only() {
    let (mut eng, old_log) = mk_engine();
    let (behavior, new_log) = recorder();
    eng.set_behavior(behavior);
    assert_eq!(*new_log.borrow(), vec![Call::Attach]);
    assert!(old_log.borrow().is_empty());

    eng.show_next(false).unwrap();
    assert!(old_log.borrow().is_empty());
    assert_eq!(starts(&new_log), 1);
}

#[test]
fn set_drawables_clamps_index() {
    let (mut eng, _) = mk_engine();
    eng.set_drawables(1, [1, 2]).unwrap();
    assert_eq!(eng.current_index(), Some(1));
    assert_eq!(eng.drawables(), &[1, 2]);
    eng.set_drawables(40, [7, 8, 9]).unwrap();
    assert_eq!(eng.current_index(), Some(2));
    eng.set_drawables(0, Vec::new()).unwrap();
    assert_eq!(eng.current_index(), None);
    assert_eq!(eng.surfaces().primary.image, None);
}

#[test]
fn set_current_index_emits_reset() {
    let (mut eng, log) = mk_engine();
    eng.set_current_index(2).unwrap();
    assert_eq!(
        *log.borrow(),
        vec![Call::Reset {
            current: Some(2),
            primary: Some(3)
        }]
    );
}

#[test]
fn set_next_inserts_after_current() {
    let (mut eng, log) = mk_engine();
    eng.set_next(99);
    assert_eq!(eng.drawables(), &[1, 2, 99, 3, 4]);
    assert_eq!(eng.current_index(), Some(1));
    assert!(log.borrow().is_empty());
}

#[test]
fn set_previous_inserts_at_current_and_shifts() {
    let (mut eng, _) = mk_engine();
    eng.set_previous(99);
    assert_eq!(eng.drawables(), &[1, 99, 2, 3, 4]);
    assert_eq!(eng.current_index(), Some(2));
    assert_eq!(eng.current_drawable(), Some(&2));
}

#[test]
fn inserts_into_empty_list_set_cursor() {
    let mut eng: SwapEngine<u32> = SwapEngine::new(SwapConfig::default());
    eng.set_previous(5);
    assert_eq!(eng.current_index(), Some(0));

    let mut eng: SwapEngine<u32> = SwapEngine::new(SwapConfig::default());
    eng.set_next(5);
    assert_eq!(eng.current_index(), Some(0));
    assert_eq!(eng.drawables(), &[5]);
}

#[test]
fn seed_places_neighbours() {
    let (behavior, log) = recorder();
    let mut eng = SwapEngine::with_behavior(SwapConfig::default(), behavior);
    eng.seed(2, Some(1), Some(3)).unwrap();
    assert_eq!(eng.drawables(), &[1, 2, 3]);
    assert_eq!(eng.current_index(), Some(1));
    assert_eq!(
        log.borrow().last(),
        Some(&Call::Reset {
            current: Some(1),
            primary: Some(2)
        })
    );
}

#[test]
fn insert_during_swap_keeps_commit_consistent() {
    let (mut eng, _) = mk_engine();
    eng.set_current_index(0).unwrap();
    eng.show_next(false).unwrap();
    eng.set_previous(50);
    assert_eq!(eng.current_drawable(), Some(&1));
    finish(&mut eng);
    assert_eq!(eng.current_drawable(), Some(&2));
}

#[test]
fn set_next_during_swap_commits_animated_image() {
    let (mut eng, log) = mk_engine();
    eng.set_drawables(0, [1, 2, 3]).unwrap();
    log.borrow_mut().clear();
    eng.show_next(false).unwrap();
    eng.set_next(99);
    assert_eq!(eng.drawables(), &[1, 99, 2, 3]);
    finish(&mut eng);

    assert_eq!(eng.current_drawable(), Some(&2));
    assert_eq!(eng.surfaces().primary.image, Some(2));
    assert_eq!(
        log.borrow()[0],
        Call::Start {
            reversing: false,
            primary: Some(1),
            secondary: Some(2)
        }
    );
    assert_eq!(
        log.borrow().last(),
        Some(&Call::Reset {
            current: Some(2),
            primary: Some(2)
        })
    );
}

#[test]
fn list_replaced_during_swap_clamps_commit() {
    let (mut eng, _) = mk_engine();
    eng.show_next(false).unwrap();
    eng.set_drawables(0, [7]).unwrap();
    finish(&mut eng);
    assert_eq!(eng.current_index(), Some(0));
    assert_eq!(eng.surfaces().primary.image, Some(7));
}

#[test]
fn repeat_signal_is_rejected() {
    let (mut eng, _) = mk_engine();
    eng.show_next(false).unwrap();
    let err = eng.on_clock(ClockSignal::Repeat).unwrap_err();
    assert_eq!(err, SwapError::RepeatUnsupported);
    assert!(err.is_contract_violation());
    assert!(eng.is_swapping());
    assert_eq!(eng.on_clock(ClockSignal::Frame { dt: 1.0 }), Ok(false));
    assert_eq!(eng.current_index(), Some(2));
}

#[test]
fn outputs_record_dispatch_order() {
    let mut eng: SwapEngine<u32> =
        SwapEngine::new(SwapConfig::default().with_duration_ms(0));
    eng.set_drawables(0, [1, 2]).unwrap();
    eng.show_next(false).unwrap();
    eng.tick(0.0).unwrap();

    let out = eng.take_outputs();
    assert_eq!(
        out.events,
        vec![
            SwapEvent::Attach,
            SwapEvent::Reset,
            SwapEvent::Start { reversing: false },
            SwapEvent::Update {
                progress: 1.0,
                reversing: false
            },
            SwapEvent::End { reversing: false },
            SwapEvent::Reset,
        ]
    );
    assert!(eng.outputs().is_empty());
    assert_eq!(eng.current_index(), Some(1));
}

#[test]
fn event_log_capacity_is_respected() {
    let mut eng: SwapEngine<u32> =
        SwapEngine::new(SwapConfig::default().with_event_log_capacity(2));
    eng.set_drawables(0, [1, 2]).unwrap();
    eng.set_current_index(1).unwrap();
    let out = eng.outputs();
    assert_eq!(out.events, vec![SwapEvent::Reset, SwapEvent::Reset]);
    assert_eq!(out.dropped, 1);
}

#[test]
fn forced_navigation_without_movement_keeps_running_swap() {
    let (mut eng, log) = mk_engine();
    eng.set_current_index(3).unwrap();
    assert_eq!(eng.show_previous(false), Ok(true));
    eng.tick(0.05).unwrap();
    log.borrow_mut().clear();

    // already at the non-looping end; nothing to restart towards
    assert_eq!(eng.show_next(true), Ok(false));
    assert!(log.borrow().is_empty());
    assert!(eng.is_swapping());
    assert!(eng.is_reversing());

    finish(&mut eng);
    assert_eq!(eng.current_index(), Some(2));
    assert!(!log
        .borrow()
        .iter()
        .any(|c| matches!(c, Call::Cancel { .. })));
}

#[test]
fn undrained_log_stays_bounded_over_many_swaps() {
    let mut eng: SwapEngine<u32> = SwapEngine::new(SwapConfig::default().with_looping(true));
    eng.set_drawables(0, [1, 2, 3, 4]).unwrap();
    for _ in 0..20 {
        assert_eq!(eng.show_next(false), Ok(true));
        while eng.tick(1.0 / 60.0).unwrap() {}
    }

    let cap = eng.config().event_log_capacity;
    let out = eng.outputs();
    assert_eq!(out.events.len(), cap);
    assert!(out.dropped > 0);
    assert_eq!(out.events.back(), Some(&SwapEvent::Reset));
    assert!(out.events.contains(&SwapEvent::End { reversing: false }));
    assert_eq!(eng.current_index(), Some(0));

    let drained = eng.take_outputs();
    assert_eq!(drained.events.len(), cap);
    assert_eq!(eng.outputs().dropped, 0);
}
