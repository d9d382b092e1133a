mod component;
pub use component::{Component, Ready, ViewReady, cleanup_unmounted, reset_lifecycle};

pub mod exit;
pub mod frame;
pub mod hooks;
pub mod panic_handler;

// Re-export commonly used items
pub use exit::{exit_guard, request_exit, reset_exit, should_exit};
pub use frame::{ViewHandle, reset_frame_signal, resolve_frame};
pub use hooks::view_ready::{use_view_ready, use_view_ready_async};
pub use panic_handler::setup_panic_handler;
