//! View-ready hook: run a callback exactly once, after the component's first
//! frame has been laid out and flushed to the terminal.
//!
//! Rendering happens every frame, so "first frame finished" is a recurring
//! signal from the hook's point of view. The one-shot guarantee therefore
//! rests on an explicit latch kept in the instance's hook state, not on the
//! signal itself firing once.

#[cfg(test)]
mod tests;

use std::future::Future;

use crate::frame::{self, ViewHandle};
use crate::hooks::with_hook_context;
use crate::panic_handler::spawn_logged;

/// One-shot latch backing a single `use_view_ready` call site.
struct ReadyState {
    fired: bool,
    scheduled: bool,
}

/// Runs `callback` exactly once per component lifetime, after the instance's
/// first frame has been fully laid out and flushed.
///
/// Call it from `Component::render`. On the first pass it registers a
/// continuation with the end-of-frame signal; on every later pass it is a
/// no-op. The callback receives a [`ViewHandle`] whose area and size reflect
/// completed layout, so measuring or starting layout-dependent work is safe.
///
/// If the instance unmounts before its first frame resolves, the callback is
/// silently never invoked. A panic inside the callback propagates through the
/// render loop untouched.
///
/// # Examples
///
/// ```rust,no_run
/// use afterframe_core::hooks::view_ready::use_view_ready;
///
/// use_view_ready(|view| {
///     tracing::info!(area = ?view.area(), "first frame on screen");
/// });
/// ```
pub fn use_view_ready<F>(callback: F)
where
    F: FnOnce(&ViewHandle) + 'static,
{
    with_hook_context(|context| {
        let index = context.next_hook_index();
        let state = context.get_or_init_state(index, || ReadyState {
            fired: false,
            scheduled: false,
        });

        {
            let state = state.borrow();
            if state.fired || state.scheduled {
                return;
            }
        }
        state.borrow_mut().scheduled = true;

        let latch = state.clone();
        frame::schedule_on_ready(move |view| {
            {
                let mut latch = latch.borrow_mut();
                if latch.fired {
                    return;
                }
                latch.fired = true;
            }
            callback(view);
        });
    });
}

/// Asynchronous variant of [`use_view_ready`].
///
/// The future is spawned on the tokio runtime and never awaited or inspected
/// by the hook; its eventual completion or failure belongs to the component.
/// The spawn itself still happens exactly once per instance lifetime.
///
/// Requires a running tokio runtime at resolution time.
pub fn use_view_ready_async<F, Fut>(callback: F)
where
    F: FnOnce(&ViewHandle) -> Fut + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    use_view_ready(move |view| {
        spawn_logged(callback(view));
    });
}
