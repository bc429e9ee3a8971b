//! Linux evdev keycode to symbolic name mappings.
//!
//! Names follow the lowercase vocabulary the keymap uses: letters and
//! punctuation are the literal character ("j", "/"), everything else gets a
//! symbolic name ("space", "backspace", "f1"). Keypad digits share names with
//! the top row so a binding matches either.

use crate::event::Button;

/// Look up the symbolic name for an evdev key code.
pub fn lookup_name(code: u16) -> Option<&'static str> {
    let name = match code {
        1 => "esc",
        2 => "1",
        3 => "2",
        4 => "3",
        5 => "4",
        6 => "5",
        7 => "6",
        8 => "7",
        9 => "8",
        10 => "9",
        11 => "0",
        12 => "-",
        13 => "=",
        14 => "backspace",
        15 => "tab",
        16 => "q",
        17 => "w",
        18 => "e",
        19 => "r",
        20 => "t",
        21 => "y",
        22 => "u",
        23 => "i",
        24 => "o",
        25 => "p",
        26 => "[",
        27 => "]",
        28 => "enter",
        29 => "ctrl",
        30 => "a",
        31 => "s",
        32 => "d",
        33 => "f",
        34 => "g",
        35 => "h",
        36 => "j",
        37 => "k",
        38 => "l",
        39 => ";",
        40 => "'",
        41 => "`",
        42 => "shift",
        43 => "\\",
        44 => "z",
        45 => "x",
        46 => "c",
        47 => "v",
        48 => "b",
        49 => "n",
        50 => "m",
        51 => ",",
        52 => ".",
        53 => "/",
        54 => "shift_r",
        55 => "*",
        56 => "alt",
        57 => "space",
        58 => "caps_lock",
        59 => "f1",
        60 => "f2",
        61 => "f3",
        62 => "f4",
        63 => "f5",
        64 => "f6",
        65 => "f7",
        66 => "f8",
        67 => "f9",
        68 => "f10",
        69 => "num_lock",
        70 => "scroll_lock",
        71 => "7",
        72 => "8",
        73 => "9",
        74 => "-",
        75 => "4",
        76 => "5",
        77 => "6",
        78 => "+",
        79 => "1",
        80 => "2",
        81 => "3",
        82 => "0",
        83 => ".",
        87 => "f11",
        88 => "f12",
        96 => "enter",
        97 => "ctrl_r",
        98 => "/",
        99 => "print_screen",
        100 => "alt_gr",
        102 => "home",
        103 => "up",
        104 => "page_up",
        105 => "left",
        106 => "right",
        107 => "end",
        108 => "down",
        109 => "page_down",
        110 => "insert",
        111 => "delete",
        113 => "media_volume_mute",
        114 => "media_volume_down",
        115 => "media_volume_up",
        119 => "pause",
        125 => "cmd",
        126 => "cmd_r",
        127 => "menu",
        163 => "media_next",
        164 => "media_play_pause",
        165 => "media_previous",
        _ => return None,
    };
    Some(name)
}

/// Symbolic name for an evdev key code, falling back to `key_<code>` so every
/// key event still resolves to some identifier.
pub fn key_name(code: u16) -> String {
    match lookup_name(code) {
        Some(name) => name.to_owned(),
        None => format!("key_{code}"),
    }
}

/// Convert an evdev button code (BTN_* range) to a [`Button`].
pub fn button_from_code(code: u16) -> Button {
    match code {
        0x110 => Button::Left,   // BTN_LEFT
        0x111 => Button::Right,  // BTN_RIGHT
        0x112 => Button::Middle, // BTN_MIDDLE
        0x113 => Button::Side,   // BTN_SIDE
        0x114 => Button::Extra,  // BTN_EXTRA
        other => Button::Other(other),
    }
}

/// Whether an evdev key code is in the mouse button range.
pub fn is_button_code(code: u16) -> bool {
    (0x110..=0x117).contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_binding_codes_resolve() {
        // The codes behind the built-in default table.
        assert_eq!(lookup_name(57), Some("space"));
        assert_eq!(lookup_name(36), Some("j"));
        assert_eq!(lookup_name(37), Some("k"));
        assert_eq!(lookup_name(32), Some("d"));
        assert_eq!(lookup_name(14), Some("backspace"));
        assert_eq!(lookup_name(111), Some("delete"));
        assert_eq!(lookup_name(16), Some("q"));
    }

    #[test]
    fn test_unmapped_code_falls_back() {
        assert_eq!(lookup_name(240), None);
        assert_eq!(key_name(240), "key_240");
    }

    #[test]
    fn test_button_codes() {
        assert!(is_button_code(0x110));
        assert!(!is_button_code(57));
        assert_eq!(button_from_code(0x110), Button::Left);
        assert_eq!(button_from_code(0x111), Button::Right);
        assert_eq!(button_from_code(0x117), Button::Other(0x117));
    }
}
