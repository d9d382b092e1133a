//! Render-pass simulation for hook tests: drives the same bookkeeping as
//! `Component::render_with_lifecycle` without needing a terminal.

use ratatui::layout::Rect;
use std::rc::Rc;

use crate::component::{self, Component};
use crate::frame;
use crate::hooks::{HookContext, clear_hook_context, set_hook_context};

// Stands in for a real widget; its render body is never called.
#[derive(Clone)]
struct Probe;

impl Component for Probe {
    fn render(&self, _area: Rect, _frame: &mut ratatui::Frame) {}
}

fn default_area() -> Rect {
    Rect::new(0, 0, 80, 24)
}

/// Simulates one render pass of the component identified by `component_id`,
/// with an 80x24 layout area. Repeated calls with the same id reuse the
/// instance's hook context, exactly like consecutive frames of a mounted
/// component.
pub fn with_component_id<F, R>(component_id: &'static str, f: F) -> R
where
    F: FnOnce(&Rc<HookContext>) -> R,
{
    with_component_area(component_id, default_area(), f)
}

/// Like [`with_component_id`], but lays the component out at `area`.
pub fn with_component_area<F, R>(component_id: &'static str, area: Rect, f: F) -> R
where
    F: FnOnce(&Rc<HookContext>) -> R,
{
    let key = component::instance_key(component_id);
    let context = component::track_instance(key, &Probe);
    context.reset_hook_index();
    set_hook_context(context.clone());
    let scope = frame::RenderScope::open(key, area);

    let result = f(&context);

    drop(scope);
    clear_hook_context();
    result
}

/// Unmounts the simulated component, as if it left the tree before the next
/// frame resolved.
pub fn unmount_component(component_id: &'static str) {
    component::untrack_instance(component::instance_key(component_id));
}

/// Drops every piece of thread-local lifecycle, frame and hook state.
pub fn reset_all() {
    component::reset_lifecycle();
    frame::reset_frame_signal();
    clear_hook_context();
}

/// Runs `f` with clean lifecycle state before and after, even across panics.
pub fn with_test_isolate<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    reset_all();

    struct CleanupGuard;
    impl Drop for CleanupGuard {
        fn drop(&mut self) {
            reset_all();
        }
    }
    let _guard = CleanupGuard;

    f()
}
