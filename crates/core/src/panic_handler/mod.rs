//! Panic and logging setup.
//!
//! A panicking TUI leaves the terminal in raw mode with no visible message,
//! so panics are routed through `tracing` (stderr plus a JSON file layer)
//! before the profile-specific panic reporter takes over.

use std::io::{self, Write};
use std::panic;
use std::sync::Once;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    Registry,
    filter::{EnvFilter, LevelFilter},
    fmt,
    prelude::*,
    util::SubscriberInitExt,
};

#[cfg(debug_assertions)]
use better_panic::{Settings, Verbosity};

#[cfg(not(debug_assertions))]
use human_panic::setup_panic;

static INIT: Once = Once::new();
// Keeps the non-blocking appender's worker alive for the process lifetime.
static LOG_GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);

/// Installs the tracing subscriber and the panic hook.
///
/// Debug builds report through `better_panic` (full backtraces), release
/// builds through `human_panic` (a crash report file and a friendly message).
/// In both profiles the panic is logged through `tracing` first. Calling this
/// more than once is a no-op.
pub fn setup_panic_handler() {
    INIT.call_once(|| {
        let env_filter = EnvFilter::from_default_env().add_directive(LevelFilter::INFO.into());
        let console_layer = fmt::Layer::new().with_writer(io::stderr);

        let file_appender = tracing_appender::rolling::daily("logs", "afterframe.log");
        let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
        *LOG_GUARD.lock() = Some(guard);
        let file_layer = fmt::Layer::new().with_writer(file_writer).json();

        // try_init: the host application may have installed its own
        // subscriber already, which is fine.
        let _ = Registry::default()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .try_init();

        #[cfg(debug_assertions)]
        Settings::auto()
            .most_recent_first(false)
            .lineno_suffix(true)
            .verbosity(Verbosity::Full)
            .install();

        #[cfg(not(debug_assertions))]
        setup_panic!();

        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            error!(
                target: "panic_handler",
                location = %panic_info
                    .location()
                    .map_or("unknown".to_string(), |l| format!("{}:{}:{}", l.file(), l.line(), l.column())),
                payload = %panic_info.payload().downcast_ref::<&str>().unwrap_or(&"<unknown>"),
                "application panicked"
            );
            original_hook(panic_info);
            let _ = io::stderr().flush();
        }));
    });
}

/// Spawns `future` on the tokio runtime.
///
/// A panic inside the task is reported through the panic hook installed by
/// [`setup_panic_handler`] and then aborts the task; the spawner is not
/// affected. Used for view-ready callbacks that run detached from the render
/// loop.
pub fn spawn_logged<F>(future: F) -> JoinHandle<F::Output>
where
    F: std::future::Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::spawn(async move {
        match panic::catch_unwind(panic::AssertUnwindSafe(|| future)) {
            Ok(future) => future.await,
            Err(payload) => panic::resume_unwind(payload),
        }
    })
}
