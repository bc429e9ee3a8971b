//! CLI entry point.
//!
//! Usage: `keywatch [keymap-file]`
//!
//! With no argument the built-in binding table is used and all accessible
//! input devices are listened to. An argument naming a JSON keymap file
//! replaces the table; anything else is used as a device-name filter.

use keywatch::{KeyMap, Notification};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let arg = std::env::args().nth(1);
    let keymap = KeyMap::load(arg.as_deref());
    listen(keymap)
}

#[cfg(target_os = "linux")]
fn listen(keymap: KeyMap) -> ExitCode {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    let running = Arc::new(AtomicBool::new(true));

    let (sources, readers) =
        match keywatch::device::open_sources(keymap.device_filter(), &running) {
            Ok(opened) => opened,
            Err(e) => {
                log::error!("cannot open input devices: {e}");
                return ExitCode::FAILURE;
            }
        };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(keywatch::dispatch::run(
        keymap,
        sources,
        |notification: &Notification| println!("{notification}"),
    ));

    // Stop the reader threads and release the device handles before exiting.
    running.store(false, Ordering::SeqCst);
    readers.join();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(target_os = "linux"))]
fn listen(_keymap: KeyMap) -> ExitCode {
    log::error!("keywatch only supports Linux evdev input devices");
    ExitCode::FAILURE
}
