use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

static GLOBAL_EXIT: AtomicBool = AtomicBool::new(false);

/// Asks the render loop to stop after the current frame resolves.
pub fn request_exit() {
    debug!("exit requested");
    GLOBAL_EXIT.store(true, Ordering::Release);
}

/// Whether an exit has been requested.
pub fn should_exit() -> bool {
    GLOBAL_EXIT.load(Ordering::Acquire)
}

/// Clears the exit flag (useful for tests and repeated runs).
pub fn reset_exit() {
    GLOBAL_EXIT.store(false, Ordering::Release);
}

/// Resets the exit flag when dropped.
pub struct ExitGuard;

impl Drop for ExitGuard {
    fn drop(&mut self) {
        reset_exit();
    }
}

pub fn exit_guard() -> ExitGuard {
    ExitGuard
}
