//! # keywatch
//!
//! Listens to keyboard/mouse input devices and translates configured key
//! presses into named application actions, printed one per line, with a
//! periodic heartbeat for external supervisors.
//!
//! ## How it works
//!
//! - A [`KeyMap`] maps canonical event identifiers ("space", "mouse:right",
//!   "mouse:scroll_wheel_up") to action names. It is built once at startup
//!   from a built-in table or a JSON file and is immutable afterwards.
//! - Each input device feeds a stream of [`RawEvent`]s into its own dispatch
//!   task; [`classify`] resolves every event to either its mapped action or
//!   an ignored marker and emits exactly one [`Notification`] per event.
//! - A heartbeat task emits one liveness line per second, independent of all
//!   sources.
//!
//! ## Quick Start
//!
//! ```no_run
//! use keywatch::{KeyMap, Notification};
//! use std::sync::{Arc, atomic::AtomicBool};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> keywatch::Result<()> {
//!     let keymap = KeyMap::load(None);
//!     let running = Arc::new(AtomicBool::new(true));
//!     let (sources, readers) =
//!         keywatch::device::open_sources(keymap.device_filter(), &running)?;
//!
//!     keywatch::dispatch::run(keymap, sources, |n: &Notification| println!("{n}")).await?;
//!
//!     running.store(false, std::sync::atomic::Ordering::SeqCst);
//!     readers.join();
//!     Ok(())
//! }
//! ```

pub mod classify;
#[cfg(target_os = "linux")]
pub mod device;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod keycodes;
pub mod keymap;
pub mod notify;

// Re-exports
pub use classify::classify;
pub use dispatch::{EventSource, NotificationHandler};
pub use error::{Error, Result};
pub use event::{Button, RawEvent};
pub use keymap::KeyMap;
pub use notify::{Notification, Resolution};
