//! Event classification against the keymap.

use crate::event::RawEvent;
use crate::keymap::KeyMap;
use crate::notify::{Notification, Resolution};

/// Classify one raw event.
///
/// Returns `None` only for a zero-zero scroll, which carries no direction and
/// produces no output line. Every other event yields exactly one
/// notification: the mapped action when a press resolves to a bound
/// identifier, the ignored marker otherwise (releases, repeats, unbound
/// identifiers).
pub fn classify(event: &RawEvent, keymap: &KeyMap) -> Option<Notification> {
    if let RawEvent::MouseScroll { dx: 0, dy: 0 } = event {
        return None;
    }

    let resolution = match event.identifier() {
        Some(id) => match keymap.get(&id) {
            Some(action) => Resolution::Action(action.to_owned()),
            None => Resolution::Ignored,
        },
        None => Resolution::Ignored,
    };

    Some(Notification::event(event.describe(), resolution))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Button;

    fn resolution_of(event: &RawEvent, keymap: &KeyMap) -> Option<Resolution> {
        classify(event, keymap).and_then(|n| n.resolution().cloned())
    }

    #[test]
    fn test_every_default_binding_fires() {
        let keymap = KeyMap::default();
        for (key, action) in [
            ("space", "start-split-reset"),
            ("j", "start-split"),
            ("k", "undo"),
            ("d", "delete-last"),
            ("backspace", "pause-reset"),
            ("delete", "pause-delete"),
            ("q", "quit"),
        ] {
            let event = RawEvent::KeyPress(key.into());
            assert_eq!(
                resolution_of(&event, &keymap),
                Some(Resolution::Action(action.into())),
                "binding for {key}"
            );
        }
    }

    #[test]
    fn test_unbound_press_is_ignored() {
        let keymap = KeyMap::default();
        let event = RawEvent::KeyPress("x".into());
        assert_eq!(resolution_of(&event, &keymap), Some(Resolution::Ignored));
    }

    #[test]
    fn test_release_is_ignored_even_when_bound() {
        let keymap = KeyMap::default();
        let event = RawEvent::KeyRelease("space".into());
        assert_eq!(resolution_of(&event, &keymap), Some(Resolution::Ignored));
    }

    #[test]
    fn test_mouse_press_resolves() {
        let keymap = KeyMap::from_json_str(r#"{"mouse:right": "start-split"}"#).unwrap();
        let press = RawEvent::MouseClick {
            button: Button::Right,
            pressed: true,
        };
        assert_eq!(
            resolution_of(&press, &keymap),
            Some(Resolution::Action("start-split".into()))
        );

        let release = RawEvent::MouseClick {
            button: Button::Right,
            pressed: false,
        };
        assert_eq!(resolution_of(&release, &keymap), Some(Resolution::Ignored));
    }

    #[test]
    fn test_scroll_priority_is_vertical() {
        let keymap =
            KeyMap::from_json_str(r#"{"mouse:scroll_wheel_up": "undo"}"#).unwrap();
        let event = RawEvent::MouseScroll { dx: -3, dy: 5 };
        assert_eq!(
            resolution_of(&event, &keymap),
            Some(Resolution::Action("undo".into()))
        );
    }

    #[test]
    fn test_zero_scroll_produces_nothing() {
        let keymap = KeyMap::default();
        let event = RawEvent::MouseScroll { dx: 0, dy: 0 };
        assert!(classify(&event, &keymap).is_none());
    }

    #[test]
    fn test_loaded_map_fully_replaces_default() {
        let keymap = KeyMap::from_json_str(r#"{"j": "undo"}"#).unwrap();

        let j = RawEvent::KeyPress("j".into());
        assert_eq!(
            resolution_of(&j, &keymap),
            Some(Resolution::Action("undo".into()))
        );

        // "space" was only in the default table; a load replaces, not merges.
        let space = RawEvent::KeyPress("space".into());
        assert_eq!(resolution_of(&space, &keymap), Some(Resolution::Ignored));
    }
}
