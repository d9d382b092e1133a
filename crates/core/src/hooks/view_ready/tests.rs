use super::{use_view_ready, use_view_ready_async};
use crate::frame::resolve_frame;
use crate::hooks::test_utils::{
    unmount_component, with_component_area, with_component_id, with_test_isolate,
};
use ratatui::layout::Rect;
use std::sync::{Arc, Mutex};

type Counter = Arc<Mutex<u32>>;

fn counter() -> Counter {
    Arc::new(Mutex::new(0))
}

fn count(counter: &Counter) -> u32 {
    *counter.lock().unwrap()
}

#[test]
fn callback_waits_for_the_frame_to_resolve() {
    with_test_isolate(|| {
        let calls = counter();

        let calls_in = calls.clone();
        with_component_id("WaitsForFrame", |_| {
            use_view_ready(move |_| {
                *calls_in.lock().unwrap() += 1;
            });
        });

        // Still inside the first frame: nothing may run yet.
        assert_eq!(count(&calls), 0);

        resolve_frame();
        assert_eq!(count(&calls), 1);
    });
}

#[test]
fn callback_fires_once_across_many_frames() {
    with_test_isolate(|| {
        let calls = counter();

        for _ in 0..4 {
            let calls_in = calls.clone();
            with_component_id("ManyFrames", |_| {
                use_view_ready(move |_| {
                    *calls_in.lock().unwrap() += 1;
                });
            });
            resolve_frame();
        }

        assert_eq!(count(&calls), 1);
    });
}

#[test]
fn unmount_before_resolution_suppresses_the_callback() {
    with_test_isolate(|| {
        let calls = counter();

        let calls_in = calls.clone();
        with_component_id("UnmountedEarly", |_| {
            use_view_ready(move |_| {
                *calls_in.lock().unwrap() += 1;
            });
        });

        unmount_component("UnmountedEarly");
        resolve_frame();

        assert_eq!(count(&calls), 0);
    });
}

#[test]
fn view_reports_the_resolved_layout() {
    with_test_isolate(|| {
        let seen = Arc::new(Mutex::new(None));
        let area = Rect::new(4, 2, 56, 18);

        let seen_in = seen.clone();
        with_component_area("MeasuredPanel", area, |_| {
            use_view_ready(move |view| {
                *seen_in.lock().unwrap() = Some(view.area());
            });
        });
        resolve_frame();

        let resolved = seen.lock().unwrap().expect("callback ran");
        assert_eq!(resolved, area);
        assert!(!resolved.is_empty());
    });
}

#[test]
fn call_sites_latch_independently() {
    with_test_isolate(|| {
        let first = counter();
        let second = counter();

        for _ in 0..3 {
            let first_in = first.clone();
            let second_in = second.clone();
            with_component_id("TwoCallSites", |_| {
                use_view_ready(move |_| {
                    *first_in.lock().unwrap() += 1;
                });
                use_view_ready(move |_| {
                    *second_in.lock().unwrap() += 1;
                });
            });
            resolve_frame();
        }

        assert_eq!(count(&first), 1);
        assert_eq!(count(&second), 1);
    });
}

#[test]
fn instances_latch_independently() {
    with_test_isolate(|| {
        let calls = counter();

        for id in ["LeftPanel", "RightPanel"] {
            let calls_in = calls.clone();
            with_component_id(id, |_| {
                use_view_ready(move |_| {
                    *calls_in.lock().unwrap() += 1;
                });
            });
        }
        resolve_frame();

        assert_eq!(count(&calls), 2);
    });
}

// The scenario from the contract: two frames, then an unmount, then a
// defensively late signal. The counter must end — and stay — at one.
#[test]
fn counter_scenario_survives_a_late_signal() {
    with_test_isolate(|| {
        let calls = counter();

        for _ in 0..2 {
            let calls_in = calls.clone();
            with_component_id("ScenarioPanel", |_| {
                use_view_ready(move |_| {
                    *calls_in.lock().unwrap() += 1;
                });
            });
            resolve_frame();
        }
        assert_eq!(count(&calls), 1);

        unmount_component("ScenarioPanel");
        resolve_frame();
        assert_eq!(count(&calls), 1);
    });
}

#[tokio::test]
async fn async_callback_spawns_exactly_once() {
    crate::hooks::test_utils::reset_all();
    let calls = counter();

    for _ in 0..3 {
        let calls_in = calls.clone();
        with_component_id("AsyncPanel", |_| {
            use_view_ready_async(move |_| async move {
                tokio::time::sleep(std::time::Duration::from_millis(5)).await;
                *calls_in.lock().unwrap() += 1;
            });
        });
        resolve_frame();
        // The hook does not wait for the future; only yielding lets it run.
        tokio::time::sleep(std::time::Duration::from_millis(25)).await;
    }

    assert_eq!(count(&calls), 1);

    crate::hooks::test_utils::reset_all();
}
