use ratatui::Frame;
use ratatui::layout::Rect;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use tracing::trace;

use crate::frame::{self, ViewHandle};
use crate::hooks::{self, HookContext};


thread_local! {
    // All lifecycle state lives on the UI thread; no locking needed.
    static LIFECYCLE: RefCell<Lifecycle> = RefCell::new(Lifecycle::default());
}

struct InstanceEntry {
    context: Rc<HookContext>,
    unmount: Box<dyn Fn()>,
}

#[derive(Default)]
struct Lifecycle {
    // Instances currently attached to the tree.
    mounted: HashSet<u64>,
    // Instances that rendered during the pass in progress.
    seen_this_pass: HashSet<u64>,
    instances: HashMap<u64, InstanceEntry>,
}

impl Lifecycle {
    fn track<C: Component>(&mut self, key: u64, component: &C) -> Rc<HookContext> {
        self.seen_this_pass.insert(key);
        self.mounted.insert(key);
        let component = component.clone();
        let entry = self.instances.entry(key).or_insert_with(|| InstanceEntry {
            context: Rc::new(HookContext::new()),
            unmount: Box::new(move || component.on_unmount()),
        });
        entry.context.clone()
    }
}

pub(crate) fn instance_key(component_id: &str) -> u64 {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    let mut hasher = DefaultHasher::new();
    component_id.hash(&mut hasher);
    hasher.finish()
}

pub(crate) fn track_instance<C: Component>(key: u64, component: &C) -> Rc<HookContext> {
    LIFECYCLE.with(|lifecycle| lifecycle.borrow_mut().track(key, component))
}

/// Whether the instance is still attached to the tree. Queried by the frame
/// signal at resolution time.
pub(crate) fn is_mounted(key: u64) -> bool {
    LIFECYCLE.with(|lifecycle| lifecycle.borrow().mounted.contains(&key))
}

pub(crate) fn untrack_instance(key: u64) {
    let unmount = LIFECYCLE.with(|lifecycle| {
        let mut lifecycle = lifecycle.borrow_mut();
        lifecycle.mounted.remove(&key);
        lifecycle.seen_this_pass.remove(&key);
        lifecycle.instances.remove(&key).map(|entry| entry.unmount)
    });
    if let Some(unmount) = unmount {
        trace!(instance = key, "component unmounted");
        unmount();
    }
}

/// Sweeps instances that did not render during the last pass: their
/// `on_unmount` runs and their hook state is dropped. The runtime calls this
/// once per frame, after [`crate::frame::resolve_frame`].
pub fn cleanup_unmounted() {
    let dropped = LIFECYCLE.with(|lifecycle| {
        let mut lifecycle = lifecycle.borrow_mut();
        let gone: Vec<u64> = lifecycle
            .mounted
            .difference(&lifecycle.seen_this_pass)
            .copied()
            .collect();
        let mut unmounts = Vec::new();
        for key in gone {
            lifecycle.mounted.remove(&key);
            if let Some(entry) = lifecycle.instances.remove(&key) {
                unmounts.push((key, entry.unmount));
            }
        }
        lifecycle.seen_this_pass.clear();
        unmounts
    });

    // Run callbacks outside the borrow so they may touch lifecycle state.
    for (key, unmount) in dropped {
        trace!(instance = key, "component unmounted");
        unmount();
    }
}

/// Forgets every tracked instance without running unmount callbacks (useful
/// for tests).
pub fn reset_lifecycle() {
    LIFECYCLE.with(|lifecycle| {
        let mut lifecycle = lifecycle.borrow_mut();
        lifecycle.mounted.clear();
        lifecycle.seen_this_pass.clear();
        lifecycle.instances.clear();
    });
}

pub trait Component: Clone + 'static {
    /// Called when the instance leaves the tree.
    fn on_unmount(&self) {}

    /// Called on every render pass.
    fn render(&self, area: Rect, frame: &mut Frame);

    /// Identifies this instance for lifecycle tracking. Defaults to the type
    /// name, so two simultaneous instances of one type must override it.
    fn component_id(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }

    /// Renders with lifecycle tracking: mounts the instance, installs its
    /// hook context, and opens the render scope the end-of-frame signal
    /// attributes registrations to.
    fn render_with_lifecycle(&self, area: Rect, frame: &mut Frame) {
        let key = instance_key(&self.component_id());
        let context = track_instance(key, self);
        context.reset_hook_index();
        let previous = hooks::swap_hook_context(Some(context));
        let scope = frame::RenderScope::open(key, area);

        self.render(area, frame);

        drop(scope);
        hooks::swap_hook_context(previous);
    }
}

/// The extension point for components that want the one-shot post-layout
/// callback as a trait method rather than a closure passed to
/// [`crate::hooks::view_ready::use_view_ready`].
pub trait ViewReady: Component {
    /// Called exactly once per instance lifetime, after the instance's first
    /// frame has been laid out and flushed to the terminal. The handle
    /// reflects completed layout, so it is safe to measure here or to start
    /// work that depends on the rendered geometry.
    fn on_view_ready(&self, view: &ViewHandle);
}

/// Wraps a [`ViewReady`] component so that rendering it through
/// [`Component::render_with_lifecycle`] arranges the deferred
/// `on_view_ready` call automatically. The wrapper shares the inner
/// component's identity, so lifecycle tracking sees a single instance.
#[derive(Clone)]
pub struct Ready<C> {
    inner: C,
}

impl<C: ViewReady> Ready<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    fn attach(&self) {
        let inner = self.inner.clone();
        crate::hooks::view_ready::use_view_ready(move |view| inner.on_view_ready(view));
    }
}

impl<C: ViewReady> Component for Ready<C> {
    fn on_unmount(&self) {
        self.inner.on_unmount();
    }

    fn render(&self, area: Rect, frame: &mut Frame) {
        self.attach();
        self.inner.render(area, frame);
    }

    fn component_id(&self) -> String {
        self.inner.component_id()
    }
}
