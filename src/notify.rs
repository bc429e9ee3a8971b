//! Output notifications.
//!
//! One notification corresponds to exactly one printed line. Notifications
//! are write-only; nothing in the process reads them back.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Highest timestamp issued so far, in microseconds since the epoch.
static LAST_MICROS: AtomicU64 = AtomicU64::new(0);

/// Current wall-clock time as fractional UNIX seconds.
///
/// Clamped against the last issued value so timestamps on notifications are
/// monotonically non-decreasing even if the wall clock steps backwards.
pub fn timestamp() -> f64 {
    let micros = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0);
    let previous = LAST_MICROS.fetch_max(micros, Ordering::SeqCst);
    previous.max(micros) as f64 / 1_000_000.0
}

/// How an event resolved against the keymap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The identifier was bound; carries the action name.
    Action(String),
    /// No binding, or the event was a non-press transition.
    Ignored,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Action(action) => write!(f, "{action}"),
            Resolution::Ignored => write!(f, "ignored."),
        }
    }
}

/// One output line: a classified event or a heartbeat tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// A classified input event.
    Event {
        /// Fractional UNIX seconds, captured at classification time.
        timestamp: f64,
        /// Human-readable source event description.
        description: String,
        /// Mapped action or ignored marker.
        resolution: Resolution,
    },
    /// Periodic liveness line.
    Heartbeat {
        /// Fractional UNIX seconds.
        timestamp: f64,
    },
}

impl Notification {
    /// Build an event notification, stamping it with the current time.
    pub fn event(description: String, resolution: Resolution) -> Self {
        Notification::Event {
            timestamp: timestamp(),
            description,
            resolution,
        }
    }

    /// Build a heartbeat notification, stamping it with the current time.
    pub fn heartbeat() -> Self {
        Notification::Heartbeat {
            timestamp: timestamp(),
        }
    }

    /// The resolution, if this is an event notification.
    pub fn resolution(&self) -> Option<&Resolution> {
        match self {
            Notification::Event { resolution, .. } => Some(resolution),
            Notification::Heartbeat { .. } => None,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::Event {
                timestamp,
                description,
                resolution,
            } => write!(f, "{timestamp:.6}: {description} => {resolution}"),
            Notification::Heartbeat { timestamp } => write!(f, "{timestamp:.6} heartbeat"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_line_format() {
        let note = Notification::Event {
            timestamp: 1693411200.5,
            description: "key press space".into(),
            resolution: Resolution::Action("start-split-reset".into()),
        };
        assert_eq!(
            note.to_string(),
            "1693411200.500000: key press space => start-split-reset"
        );
    }

    #[test]
    fn test_ignored_line_format() {
        let note = Notification::Event {
            timestamp: 1693411200.5,
            description: "key release space".into(),
            resolution: Resolution::Ignored,
        };
        assert_eq!(
            note.to_string(),
            "1693411200.500000: key release space => ignored."
        );
    }

    #[test]
    fn test_heartbeat_line_format() {
        let note = Notification::Heartbeat {
            timestamp: 1693411201.25,
        };
        assert_eq!(note.to_string(), "1693411201.250000 heartbeat");
    }

    #[test]
    fn test_timestamps_non_decreasing() {
        let mut last = timestamp();
        for _ in 0..100 {
            let next = timestamp();
            assert!(next >= last);
            last = next;
        }
    }
}
