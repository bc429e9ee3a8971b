//! Cooperative event dispatch.
//!
//! One logical task per event source plus one for the heartbeat, all
//! multiplexed on a single-threaded tokio runtime. The keymap is read-only
//! after load, so tasks share it behind an `Arc` with no locking.
//!
//! A source that disconnects or errors ends only its own task; sibling
//! sources and the heartbeat keep running. The process shuts down on
//! interrupt.

use crate::classify::classify;
use crate::error::{Error, Result};
use crate::event::RawEvent;
use crate::keymap::KeyMap;
use crate::notify::Notification;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::Receiver;
use tokio::time::interval;

/// Interval between heartbeat lines.
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(1);

/// Sink for output notifications.
///
/// The binary passes a closure that prints to stdout; tests pass a collector.
pub trait NotificationHandler: Send + Sync {
    /// Called once per output line.
    fn emit(&self, notification: &Notification);
}

/// Implement NotificationHandler for closures.
impl<F> NotificationHandler for F
where
    F: Fn(&Notification) + Send + Sync,
{
    fn emit(&self, notification: &Notification) {
        self(notification);
    }
}

/// A named stream of raw events feeding the dispatcher.
pub struct EventSource {
    /// Display name of the originating device.
    pub name: String,
    /// Incoming events. The sender side lives with the device reader.
    pub events: Receiver<RawEvent>,
}

/// Classify and emit every event from one source until its stream ends.
pub async fn dispatch_stream<H: NotificationHandler>(
    mut source: EventSource,
    keymap: Arc<KeyMap>,
    handler: Arc<H>,
) {
    while let Some(event) = source.events.recv().await {
        if let Some(notification) = classify(&event, &keymap) {
            handler.emit(&notification);
        }
    }
    log::debug!("source '{}' disconnected", source.name);
}

/// Emit one heartbeat notification per interval, forever.
///
/// Independent of all event sources; runs even when there are none.
pub async fn heartbeat<H: NotificationHandler>(handler: Arc<H>) {
    let mut ticker = interval(HEARTBEAT_INTERVAL);
    // The first tick of a tokio interval completes immediately; the first
    // heartbeat should come after one full interval.
    ticker.tick().await;
    loop {
        ticker.tick().await;
        handler.emit(&Notification::heartbeat());
    }
}

/// Run the dispatcher until interrupted.
///
/// Spawns one task per source and the heartbeat task, then waits for Ctrl-C.
/// Returns `Ok(())` on a normal interrupt-triggered shutdown.
pub async fn run<H: NotificationHandler + 'static>(
    keymap: KeyMap,
    sources: Vec<EventSource>,
    handler: H,
) -> Result<()> {
    let keymap = Arc::new(keymap);
    let handler = Arc::new(handler);

    if sources.is_empty() {
        log::warn!("no event sources; only the heartbeat will run");
    }

    let mut tasks = Vec::with_capacity(sources.len() + 1);
    for source in sources {
        log::info!("listening on '{}'", source.name);
        tasks.push(tokio::spawn(dispatch_stream(
            source,
            keymap.clone(),
            handler.clone(),
        )));
    }
    tasks.push(tokio::spawn(heartbeat(handler.clone())));

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| Error::Signal(e.to_string()))?;
    log::info!("interrupt received, shutting down");

    for task in tasks {
        task.abort();
    }
    Ok(())
}
