//! The render loop: draw a frame, resolve the end-of-frame signal, sweep
//! unmounted instances, then wait for input.

use std::time::Duration;

use afterframe_core::{
    Component, cleanup_unmounted, request_exit, reset_exit, resolve_frame, should_exit,
};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use tracing::info;

use crate::error::RuntimeError;
use crate::terminal::TerminalSession;

const FRAME_TICK: Duration = Duration::from_millis(250);

/// Runs the component returned by `initializer` until `q`, `Esc` or Ctrl-C
/// requests an exit.
///
/// Each iteration draws one frame and only then resolves the end-of-frame
/// signal, so view-ready callbacks run strictly after their first frame has
/// been flushed and strictly before the next frame begins.
///
/// # Example
/// ```no_run
/// use afterframe_core::Component;
/// use afterframe_runtime::run;
/// use ratatui::{Frame, layout::Rect};
///
/// #[derive(Clone)]
/// struct App;
///
/// impl Component for App {
///     fn render(&self, _area: Rect, _frame: &mut Frame) {}
/// }
///
/// run(|| App).unwrap();
/// ```
pub fn run<F, T>(initializer: F) -> Result<(), RuntimeError>
where
    F: Fn() -> T,
    T: Component,
{
    let mut session = TerminalSession::new()?;
    let component = initializer();
    reset_exit();
    info!(component = %component.component_id(), "render loop started");

    loop {
        session.draw(|frame| component.render_with_lifecycle(frame.area(), frame))?;
        resolve_frame();
        cleanup_unmounted();

        if event::poll(FRAME_TICK).map_err(RuntimeError::Events)? {
            match event::read().map_err(RuntimeError::Events)? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => request_exit(),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        request_exit()
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        if should_exit() {
            break;
        }
    }

    info!("render loop stopped");
    Ok(())
}

/// Draws a single frame, resolves it, and keeps it on screen briefly.
/// Useful for demos and smoke tests that only need the first frame.
pub fn render<F, T>(initializer: F) -> Result<(), RuntimeError>
where
    F: Fn() -> T,
    T: Component,
{
    let mut session = TerminalSession::new()?;
    let component = initializer();

    session.draw(|frame| component.render_with_lifecycle(frame.area(), frame))?;
    resolve_frame();
    cleanup_unmounted();

    std::thread::sleep(Duration::from_millis(1500));
    Ok(())
}
