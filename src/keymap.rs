//! Keymap loading and lookup.
//!
//! A [`KeyMap`] is built once at startup and never mutated afterwards, so
//! lookups from concurrently running dispatch tasks need no synchronization.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Reserved key in a keymap file: names a device filter, never an event.
const DEVICE_KEY: &str = "device";

/// On-disk keymap shape: a flat JSON object of string to string.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct KeyMapFile(HashMap<String, String>);

/// Immutable mapping from event identifier to action name, plus an optional
/// device-name filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    entries: HashMap<String, String>,
    device_filter: Option<String>,
}

impl Default for KeyMap {
    /// The built-in binding table.
    fn default() -> Self {
        let entries = [
            ("space", "start-split-reset"),
            ("j", "start-split"),
            ("k", "undo"),
            ("d", "delete-last"),
            ("backspace", "pause-reset"),
            ("delete", "pause-delete"),
            ("q", "quit"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();

        Self {
            entries,
            device_filter: None,
        }
    }
}

impl KeyMap {
    /// Parse a keymap from JSON text.
    ///
    /// The document must be a flat object of string to string; it replaces
    /// the default table entirely rather than merging into it. A `"device"`
    /// entry is extracted as the device filter and removed from the table.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let KeyMapFile(mut entries) = serde_json::from_str(json)?;
        let device_filter = entries.remove(DEVICE_KEY);
        Ok(Self {
            entries,
            device_filter,
        })
    }

    /// Load the keymap for the given CLI argument.
    ///
    /// - no argument: built-in default table;
    /// - argument names a readable, valid keymap file: that file replaces the
    ///   default table;
    /// - anything else (unreadable path, malformed JSON, non-object JSON):
    ///   the default table is kept and the raw argument becomes the device
    ///   filter. This resolves the historical ambiguity one way, explicitly;
    ///   configuration problems never abort the process.
    pub fn load(arg: Option<&str>) -> Self {
        let Some(arg) = arg else {
            return Self::default();
        };

        match fs::read_to_string(Path::new(arg)) {
            Ok(json) => match Self::from_json_str(&json) {
                Ok(map) => {
                    log::info!("loaded keymap from {arg} ({} bindings)", map.len());
                    map
                }
                Err(e) => {
                    log::warn!("{arg} is not a keymap ({e}); using it as a device filter");
                    Self::default().with_device_filter(arg)
                }
            },
            Err(e) => {
                log::warn!("cannot read {arg} ({e}); using it as a device filter");
                Self::default().with_device_filter(arg)
            }
        }
    }

    /// Set the device-name filter.
    pub fn with_device_filter(mut self, filter: impl Into<String>) -> Self {
        self.device_filter = Some(filter.into());
        self
    }

    /// Look up the action bound to an event identifier.
    pub fn get(&self, identifier: &str) -> Option<&str> {
        self.entries.get(identifier).map(String::as_str)
    }

    /// The device-name substring filter, if one was configured.
    pub fn device_filter(&self) -> Option<&str> {
        self.device_filter.as_deref()
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no bindings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let map = KeyMap::default();
        assert_eq!(map.len(), 7);
        assert_eq!(map.get("space"), Some("start-split-reset"));
        assert_eq!(map.get("j"), Some("start-split"));
        assert_eq!(map.get("k"), Some("undo"));
        assert_eq!(map.get("d"), Some("delete-last"));
        assert_eq!(map.get("backspace"), Some("pause-reset"));
        assert_eq!(map.get("delete"), Some("pause-delete"));
        assert_eq!(map.get("q"), Some("quit"));
        assert_eq!(map.device_filter(), None);
    }

    #[test]
    fn test_from_json_replaces_whole_table() {
        let map = KeyMap::from_json_str(r#"{"j": "undo"}"#).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("j"), Some("undo"));
        // Full replacement, not a merge.
        assert_eq!(map.get("space"), None);
        assert_eq!(map.get("q"), None);
    }

    #[test]
    fn test_from_json_extracts_device_filter() {
        let map =
            KeyMap::from_json_str(r#"{"j": "undo", "device": "USB Keyboard"}"#).unwrap();
        assert_eq!(map.device_filter(), Some("USB Keyboard"));
        // The reserved key never matches an event.
        assert_eq!(map.get("device"), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(KeyMap::from_json_str(r#"["j", "undo"]"#).is_err());
        assert!(KeyMap::from_json_str(r#""just a string""#).is_err());
        assert!(KeyMap::from_json_str(r#"{"j": 3}"#).is_err());
    }

    #[test]
    fn test_load_missing_file_becomes_filter() {
        let map = KeyMap::load(Some("ThinkPad Keyboard"));
        assert_eq!(map.device_filter(), Some("ThinkPad Keyboard"));
        // Defaults are kept.
        assert_eq!(map.get("space"), Some("start-split-reset"));
    }

    #[test]
    fn test_load_no_argument() {
        assert_eq!(KeyMap::load(None), KeyMap::default());
    }

    #[test]
    fn test_load_non_object_file_becomes_filter() {
        let path = std::env::temp_dir().join(format!(
            "keywatch-keymap-bad-{}.json",
            std::process::id()
        ));
        // Valid JSON, but not an object of string to string.
        fs::write(&path, r#"["j"]"#).unwrap();

        let map = KeyMap::load(path.to_str());
        let _ = fs::remove_file(&path);

        // Defaults are kept and the raw argument becomes the filter.
        assert_eq!(map.get("space"), Some("start-split-reset"));
        assert_eq!(map.len(), 7);
        assert_eq!(map.device_filter(), path.to_str());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "keywatch-keymap-test-{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{"f1": "quit", "device": "Test Pad"}"#).unwrap();

        let map = KeyMap::load(path.to_str());
        let _ = fs::remove_file(&path);

        assert_eq!(map.get("f1"), Some("quit"));
        assert_eq!(map.get("space"), None);
        assert_eq!(map.device_filter(), Some("Test Pad"));
    }
}
