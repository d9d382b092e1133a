pub use crossterm;
pub use afterframe_core::{
    Component, Ready, ViewHandle, ViewReady,
    cleanup_unmounted,
    exit::request_exit,
    frame::resolve_frame,
    hooks::view_ready::{use_view_ready, use_view_ready_async},
    panic_handler::setup_panic_handler,
};
pub use afterframe_runtime::*;

pub mod prelude {
    pub use super::*;
    pub use ratatui::{self, Frame, layout::Rect};
}
