//! Raw input event model.

use std::fmt;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button.
    Middle,
    /// Side button (typically back).
    Side,
    /// Extra button (typically forward).
    Extra,
    /// Unknown or unsupported button, carrying the raw code.
    Other(u16),
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Button::Left => write!(f, "left"),
            Button::Right => write!(f, "right"),
            Button::Middle => write!(f, "middle"),
            Button::Side => write!(f, "side"),
            Button::Extra => write!(f, "extra"),
            Button::Other(code) => write!(f, "button_{code}"),
        }
    }
}

/// A raw input event as delivered by an event source.
///
/// This is a closed set of shapes: anything a backend cannot express here is
/// dropped at conversion time with a debug log, so the classifier can match
/// exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawEvent {
    /// A key went down. Carries the symbolic key name (e.g. "space", "j").
    KeyPress(String),
    /// A key came up, or auto-repeated. Any non-press key transition.
    KeyRelease(String),
    /// A mouse button changed state.
    MouseClick {
        /// Which button.
        button: Button,
        /// `true` on press, `false` on release.
        pressed: bool,
    },
    /// The scroll wheel moved.
    MouseScroll {
        /// Horizontal delta (positive = right).
        dx: i32,
        /// Vertical delta (positive = up / away from user).
        dy: i32,
    },
}

impl RawEvent {
    /// Resolve the canonical identifier used for keymap lookup.
    ///
    /// Returns `None` for events that never match a binding: key releases,
    /// button releases, and scrolls with no movement on either axis.
    pub fn identifier(&self) -> Option<String> {
        match self {
            RawEvent::KeyPress(name) => Some(name.clone()),
            RawEvent::KeyRelease(_) => None,
            RawEvent::MouseClick { button, pressed } => {
                pressed.then(|| format!("mouse:{button}"))
            }
            RawEvent::MouseScroll { dx, dy } => {
                scroll_identifier(*dx, *dy).map(str::to_owned)
            }
        }
    }

    /// Human-readable description for output lines.
    pub fn describe(&self) -> String {
        match self {
            RawEvent::KeyPress(name) => format!("key press {name}"),
            RawEvent::KeyRelease(name) => format!("key release {name}"),
            RawEvent::MouseClick {
                button,
                pressed: true,
            } => format!("mouse press {button}"),
            RawEvent::MouseClick {
                button,
                pressed: false,
            } => format!("mouse release {button}"),
            RawEvent::MouseScroll { dx, dy } => format!("mouse scroll ({dx}, {dy})"),
        }
    }
}

/// Scroll direction identifier from the sign of the dominant axis.
///
/// Vertical takes priority over horizontal; a zero-zero scroll has no
/// identifier and produces no output at all.
pub fn scroll_identifier(dx: i32, dy: i32) -> Option<&'static str> {
    if dy > 0 {
        Some("mouse:scroll_wheel_up")
    } else if dy < 0 {
        Some("mouse:scroll_wheel_down")
    } else if dx > 0 {
        Some("mouse:scroll_wheel_right")
    } else if dx < 0 {
        Some("mouse:scroll_wheel_left")
    } else {
        None
    }
}
