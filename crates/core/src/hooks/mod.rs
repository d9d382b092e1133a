use std::{any::Any, cell::RefCell, collections::HashMap, rc::Rc};

pub mod view_ready;

#[cfg(test)]
pub mod test_utils;

thread_local! {
    static HOOK_CONTEXT: RefCell<Option<Rc<HookContext>>> = const { RefCell::new(None) };
}

/// Call-site indexed state store for one component instance.
///
/// Hooks claim an index per render pass in declaration order, so state lines
/// up across passes as long as hook calls are unconditional. The store is
/// created when the instance mounts and dropped when it unmounts.
pub struct HookContext {
    states: RefCell<HashMap<usize, Box<dyn Any>>>,
    current_hook: RefCell<usize>,
}

impl HookContext {
    pub fn new() -> Self {
        Self {
            states: RefCell::new(HashMap::new()),
            current_hook: RefCell::new(0),
        }
    }

    /// Claims the next call-site index for the pass in progress.
    pub fn next_hook_index(&self) -> usize {
        let mut current = self.current_hook.borrow_mut();
        let index = *current;
        *current += 1;
        index
    }

    /// Rewinds the call-site counter at the start of a render pass.
    pub fn reset_hook_index(&self) {
        *self.current_hook.borrow_mut() = 0;
    }

    /// Returns the state slot for `index`, initializing it on the first pass.
    pub fn get_or_init_state<T: 'static, F>(&self, index: usize, init: F) -> Rc<RefCell<T>>
    where
        F: FnOnce() -> T,
    {
        let mut states = self.states.borrow_mut();

        if let Some(existing) = states.get(&index)
            && let Some(slot) = existing.downcast_ref::<Rc<RefCell<T>>>()
        {
            return slot.clone();
        }

        let slot = Rc::new(RefCell::new(init()));
        states.insert(index, Box::new(slot.clone()));
        slot
    }

    pub fn has_state(&self, index: usize) -> bool {
        self.states.borrow().contains_key(&index)
    }

    /// Drops all state and rewinds the counter.
    pub fn clear(&self) {
        self.states.borrow_mut().clear();
        self.reset_hook_index();
    }
}

impl Default for HookContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Installs `context` as the rendering instance's store and returns whatever
/// was installed before, so nested renders can restore it.
pub fn swap_hook_context(context: Option<Rc<HookContext>>) -> Option<Rc<HookContext>> {
    HOOK_CONTEXT.with(|slot| std::mem::replace(&mut *slot.borrow_mut(), context))
}

/// Set the current hook context for the thread.
pub fn set_hook_context(context: Rc<HookContext>) {
    swap_hook_context(Some(context));
}

/// Clear the hook context for the thread.
pub fn clear_hook_context() {
    swap_hook_context(None);
}

/// Get the current hook context for the thread.
pub fn get_hook_context() -> Option<Rc<HookContext>> {
    HOOK_CONTEXT.with(|slot| slot.borrow().clone())
}

/// Runs `f` against the rendering instance's context. Calling a hook outside
/// a render pass is a contract violation, not a recoverable error.
pub fn with_hook_context<R>(f: impl FnOnce(&HookContext) -> R) -> R {
    let context = get_hook_context().expect("hooks may only be called while a component renders");
    f(&context)
}
