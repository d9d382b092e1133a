//! The end-of-frame signal.
//!
//! ratatui finishes layout and paint inside `Terminal::draw` and flushes the
//! back-buffer diff before returning, so "the frame is done" has a precise
//! meaning here: the moment `draw` returns. The runtime calls [`resolve_frame`]
//! at exactly that point, which is when continuations registered during the
//! render pass are allowed to run.

use ratatui::layout::{Rect, Size};
use std::cell::RefCell;
use tracing::{debug, trace};

use crate::component;

/// Layout context handed to ready continuations.
///
/// A `ViewHandle` is only constructed while resolving a flushed frame, so its
/// queries always reflect completed layout — unlike the area available during
/// a component's own render pass, which may still be revised by the widgets it
/// delegates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewHandle {
    area: Rect,
    frame_index: u64,
}

impl ViewHandle {
    /// The component's laid-out area within the flushed frame.
    pub fn area(&self) -> Rect {
        self.area
    }

    /// The component's laid-out size.
    pub fn size(&self) -> Size {
        self.area.as_size()
    }

    /// Index of the resolved frame, counted from the first resolution.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }
}

struct PendingReady {
    instance: u64,
    area: Rect,
    continuation: Box<dyn FnOnce(&ViewHandle)>,
}

#[derive(Default)]
struct FrameSignal {
    pending: Vec<PendingReady>,
    resolved_frames: u64,
    // Innermost entry is the component currently rendering.
    render_stack: Vec<(u64, Rect)>,
}

thread_local! {
    static FRAME_SIGNAL: RefCell<FrameSignal> = RefCell::new(FrameSignal::default());
}

/// Marks a component's render pass so registrations made inside it are
/// attributed to the right instance. Closed on drop; nests for components
/// that render children through their own lifecycle.
pub(crate) struct RenderScope;

impl RenderScope {
    pub(crate) fn open(instance: u64, area: Rect) -> Self {
        FRAME_SIGNAL.with(|signal| {
            signal.borrow_mut().render_stack.push((instance, area));
        });
        RenderScope
    }
}

impl Drop for RenderScope {
    fn drop(&mut self) {
        FRAME_SIGNAL.with(|signal| {
            signal.borrow_mut().render_stack.pop();
        });
    }
}

/// Registers a continuation to run once the current frame has been flushed.
///
/// Fire-and-forget: registration never fails and never blocks the render
/// pass. Called outside a render pass there is no instance to attribute the
/// continuation to, so it is dropped with a log line.
pub(crate) fn schedule_on_ready<F>(continuation: F)
where
    F: FnOnce(&ViewHandle) + 'static,
{
    FRAME_SIGNAL.with(|signal| {
        let mut signal = signal.borrow_mut();
        let Some(&(instance, area)) = signal.render_stack.last() else {
            debug!("ready continuation registered outside a render pass; dropping it");
            return;
        };
        trace!(instance, "ready continuation scheduled");
        signal.pending.push(PendingReady {
            instance,
            area,
            continuation: Box::new(continuation),
        });
    });
}

#[cfg(test)]
pub(crate) fn pending_ready() -> usize {
    FRAME_SIGNAL.with(|signal| signal.borrow().pending.len())
}

/// Resolves the end-of-frame signal.
///
/// The runtime calls this immediately after `Terminal::draw` returns. Every
/// pending continuation whose instance is still mounted runs now, on the same
/// thread that rendered the frame; continuations for unmounted instances are
/// discarded without error. Panics from continuations are not caught — they
/// propagate through the render loop like any other lifecycle panic.
pub fn resolve_frame() {
    let (pending, frame_index) = FRAME_SIGNAL.with(|signal| {
        let mut signal = signal.borrow_mut();
        let frame_index = signal.resolved_frames;
        signal.resolved_frames += 1;
        (std::mem::take(&mut signal.pending), frame_index)
    });

    for entry in pending {
        if !component::is_mounted(entry.instance) {
            trace!(
                instance = entry.instance,
                "instance unmounted before resolution; skipping"
            );
            continue;
        }
        let view = ViewHandle {
            area: entry.area,
            frame_index,
        };
        trace!(instance = entry.instance, area = ?entry.area, "resolving ready continuation");
        (entry.continuation)(&view);
    }
}

/// Clears all pending continuations and the frame counter (useful for tests).
pub fn reset_frame_signal() {
    FRAME_SIGNAL.with(|signal| {
        let mut signal = signal.borrow_mut();
        signal.pending.clear();
        signal.resolved_frames = 0;
        signal.render_stack.clear();
    });
}
