//! Linux evdev event sources.
//!
//! Reads input events directly from `/dev/input/event*` devices, which works
//! on both X11 and Wayland. The process must be able to open the device
//! nodes, which usually means membership in the `input` group.
//!
//! Each device gets a dedicated reader thread that blocks in `poll` with a
//! short timeout, converts evdev events to [`RawEvent`]s and pushes them into
//! a bounded channel consumed by the dispatcher. A full channel drops events
//! rather than stalling the reader. A read failure ends only that device's
//! thread; its channel closes and the matching dispatch task winds down.

use crate::error::{Error, Result};
use crate::event::RawEvent;
use crate::keycodes;
use evdev::{Device, EventType, InputEventKind, RelativeAxisType};
use std::fs;
use std::os::unix::io::AsRawFd;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::dispatch::EventSource;

/// Per-source event buffer. Events past this are dropped, not queued.
const CHANNEL_CAPACITY: usize = 256;

/// Poll timeout; bounds how long shutdown can take.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Reader threads for all opened devices.
///
/// Threads exit once the shared running flag is cleared; `join` waits for
/// them so device handles are released before the process exits.
pub struct ReaderSet {
    threads: Vec<JoinHandle<()>>,
}

impl ReaderSet {
    /// Wait for all reader threads to finish.
    pub fn join(self) {
        for thread in self.threads {
            let _ = thread.join();
        }
    }
}

/// Open all matching input devices and start a reader thread per device.
///
/// Devices are kept when they support key or relative-axis events, and when
/// their display name contains `filter` as a substring (case-sensitive), if
/// one is given. An empty result is valid: the dispatcher then has nothing
/// to listen to and only the heartbeat runs.
///
/// Fails only when `/dev/input` itself cannot be enumerated.
pub fn open_sources(
    filter: Option<&str>,
    running: &Arc<AtomicBool>,
) -> Result<(Vec<EventSource>, ReaderSet)> {
    let mut sources = Vec::new();
    let mut threads = Vec::new();

    let dir = fs::read_dir("/dev/input").map_err(|e| {
        Error::PermissionDenied(format!(
            "cannot access /dev/input: {e}. Make sure you're in the 'input' group."
        ))
    })?;

    for entry in dir.flatten() {
        let path = entry.path();
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if !file_name.to_string_lossy().starts_with("event") {
            continue;
        }

        let device = match Device::open(&path) {
            Ok(device) => device,
            Err(e) => {
                log::debug!("failed to open {}: {e}", path.display());
                continue;
            }
        };

        let supported = device.supported_events();
        if !supported.contains(EventType::KEY) && !supported.contains(EventType::RELATIVE) {
            continue;
        }

        let name = device.name().unwrap_or("unknown").to_owned();
        if let Some(filter) = filter {
            if !name.contains(filter) {
                log::debug!("skipping '{name}': does not match filter '{filter}'");
                continue;
            }
        }

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let thread_name = name.clone();
        let thread_running = running.clone();
        threads.push(std::thread::spawn(move || {
            reader_loop(device, &thread_name, &thread_running, &tx);
        }));
        sources.push(EventSource { name, events: rx });
    }

    Ok((sources, ReaderSet { threads }))
}

/// Blocking read loop for one device.
fn reader_loop(
    mut device: Device,
    name: &str,
    running: &Arc<AtomicBool>,
    tx: &mpsc::Sender<RawEvent>,
) {
    let fd = device.as_raw_fd();

    while running.load(Ordering::SeqCst) {
        let mut pfd = libc::pollfd {
            fd,
            events: libc::POLLIN,
            revents: 0,
        };
        let ret = unsafe { libc::poll(&mut pfd, 1, POLL_TIMEOUT.as_millis() as _) };

        if ret < 0 {
            let err = std::io::Error::last_os_error();
            if err.kind() == std::io::ErrorKind::Interrupted {
                continue;
            }
            log::warn!("'{name}': poll failed: {err}");
            break;
        }
        if ret == 0 {
            // Timeout, re-check the running flag.
            continue;
        }

        let events = match device.fetch_events() {
            Ok(events) => events,
            Err(e) => {
                log::warn!("'{name}': read failed, dropping source: {e}");
                break;
            }
        };

        for ev in events {
            let Some(raw) = convert_event(&ev) else {
                log::trace!("'{name}': unhandled event {ev:?}");
                continue;
            };
            match tx.try_send(raw) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    log::debug!("'{name}': event buffer full, dropping event");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => return,
            }
        }
    }
}

/// Convert an evdev event to a RawEvent.
///
/// Axis motion, sync and misc events have no counterpart in the model and
/// yield `None`.
fn convert_event(ev: &evdev::InputEvent) -> Option<RawEvent> {
    match ev.kind() {
        InputEventKind::Key(key) => {
            let code = key.code();
            if keycodes::is_button_code(code) {
                let button = keycodes::button_from_code(code);
                match ev.value() {
                    1 => Some(RawEvent::MouseClick {
                        button,
                        pressed: true,
                    }),
                    0 => Some(RawEvent::MouseClick {
                        button,
                        pressed: false,
                    }),
                    _ => None,
                }
            } else {
                let name = keycodes::key_name(code);
                // Value 1 is a press; 0 is a release and 2 an autorepeat,
                // both non-press transitions.
                if ev.value() == 1 {
                    Some(RawEvent::KeyPress(name))
                } else {
                    Some(RawEvent::KeyRelease(name))
                }
            }
        }

        InputEventKind::RelAxis(axis) => match axis {
            RelativeAxisType::REL_WHEEL => Some(RawEvent::MouseScroll {
                dx: 0,
                dy: ev.value(),
            }),
            RelativeAxisType::REL_HWHEEL => Some(RawEvent::MouseScroll {
                dx: ev.value(),
                dy: 0,
            }),
            _ => None,
        },

        _ => None,
    }
}
