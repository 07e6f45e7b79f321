//! Persisted device settings.
//!
//! Preferences are a flat JSON object mapping keys to booleans, strings or
//! integers. A missing file is an empty store, so a device that never opened
//! the settings screen restores nothing but defaults.

use guacamole_core::{Error, Result};
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// sRGB panel colour mode.
pub const KEY_SRGB_SWITCH: &str = "srgb";
/// High brightness mode.
pub const KEY_HBM_SWITCH: &str = "hbm";
/// DC dimming.
pub const KEY_DC_SWITCH: &str = "dc";
/// DCI-P3 panel colour mode.
pub const KEY_DCI_SWITCH: &str = "dci";
/// Night mode.
pub const KEY_NIGHT_SWITCH: &str = "night";
/// Wide colour panel mode.
pub const KEY_WIDECOLOR_SWITCH: &str = "wide_color";
/// On-screen refresh rate overlay.
pub const KEY_FPS_INFO: &str = "fps_info";
/// Vibrator strength written to the vmax node.
pub const KEY_VIBSTRENGTH: &str = "vibrator_strength";

/// Key/value preference store backed by a JSON file.
///
/// # Examples
///
/// ```
/// use guacamole_settings::preferences::{KEY_HBM_SWITCH, Preferences};
///
/// let mut prefs = Preferences::default();
/// assert!(!prefs.bool(KEY_HBM_SWITCH, false));
///
/// prefs.set_bool(KEY_HBM_SWITCH, true);
/// assert!(prefs.bool(KEY_HBM_SWITCH, false));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Preferences {
    path: Option<PathBuf>,
    values: Map<String, Value>,
}

impl Preferences {
    /// Load preferences from `path`.
    ///
    /// A file that does not exist yields an empty store bound to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file exists but cannot be read, and
    /// [`Error::Config`] if it is not a JSON object.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let values = match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No preferences at {}, starting empty", path.display());
                Map::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path: Some(path.to_path_buf()),
            values,
        })
    }

    /// Parse preferences from a JSON string without binding a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `json` is not a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self {
            path: None,
            values: Self::parse(json)?,
        })
    }

    fn parse(json: &str) -> Result<Map<String, Value>> {
        match serde_json::from_str(json) {
            Ok(Value::Object(values)) => Ok(values),
            Ok(other) => Err(Error::Config(format!(
                "preferences must be a JSON object, found {other}"
            ))),
            Err(e) => Err(Error::Config(format!("invalid preferences: {e}"))),
        }
    }

    /// File this store was loaded from.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write the store back to the file it was loaded from.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfig`] for a store not bound to a file, or
    /// [`Error::Io`] if the write fails.
    pub fn save(&self) -> Result<()> {
        let path = self
            .path
            .as_deref()
            .ok_or_else(|| Error::MissingConfig("preferences path".to_string()))?;
        self.save_to(path)
    }

    /// Write the store to `path` as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the write fails.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.values)
            .map_err(|e| Error::Config(e.to_string()))?;
        fs::write(path.as_ref(), json)?;
        debug!("Saved {} preferences to {}", self.values.len(), path.as_ref().display());
        Ok(())
    }

    /// Whether `key` has a stored value.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Boolean value of `key`, or `default` if unset or not a boolean.
    pub fn bool(&self, key: &str, default: bool) -> bool {
        self.values.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    /// String value of `key`, or `default` if unset or not a string.
    pub fn string(&self, key: &str, default: &str) -> String {
        self.values
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    }

    /// Integer value of `key`, or `default` if unset or not numeric.
    ///
    /// Numeric strings such as `"7"` are accepted.
    pub fn int(&self, key: &str, default: i64) -> i64 {
        match self.values.get(key) {
            Some(Value::Number(n)) => n.as_i64().unwrap_or(default),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
            _ => default,
        }
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.values.insert(key.to_string(), Value::Bool(value));
    }

    pub fn set_string(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), Value::String(value.into()));
    }

    pub fn set_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), Value::from(value));
    }

    /// Remove `key`, returning whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.values.remove(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");

        let prefs = Preferences::load(&path).unwrap();
        assert!(!prefs.contains(KEY_SRGB_SWITCH));
        assert_eq!(prefs.path(), Some(path.as_path()));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");

        let mut prefs = Preferences::load(&path).unwrap();
        prefs.set_bool(KEY_DC_SWITCH, true);
        prefs.set_int(KEY_VIBSTRENGTH, 6);
        prefs.set_string("label", "guacamoleb");
        prefs.save().unwrap();

        let reloaded = Preferences::load(&path).unwrap();
        assert!(reloaded.bool(KEY_DC_SWITCH, false));
        assert_eq!(reloaded.int(KEY_VIBSTRENGTH, 9), 6);
        assert_eq!(reloaded.string("label", ""), "guacamoleb");
    }

    #[test]
    fn test_save_without_path_fails() {
        let prefs = Preferences::default();
        assert!(matches!(prefs.save(), Err(Error::MissingConfig(_))));
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(Preferences::load(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(matches!(Preferences::from_json("[1, 2]"), Err(Error::Config(_))));
    }

    #[rstest]
    #[case(r#"{"vibrator_strength": 4}"#, 4)]
    #[case(r#"{"vibrator_strength": "7"}"#, 7)]
    #[case(r#"{"vibrator_strength": "loud"}"#, 9)]
    #[case(r#"{"vibrator_strength": true}"#, 9)]
    #[case(r#"{}"#, 9)]
    fn test_int_lookup(#[case] json: &str, #[case] expected: i64) {
        let prefs = Preferences::from_json(json).unwrap();
        assert_eq!(prefs.int(KEY_VIBSTRENGTH, 9), expected);
    }

    #[test]
    fn test_wrong_type_falls_back_to_default() {
        let prefs = Preferences::from_json(r#"{"hbm": "yes", "night": 1}"#).unwrap();
        assert!(prefs.bool(KEY_HBM_SWITCH, true));
        assert!(!prefs.bool(KEY_NIGHT_SWITCH, false));
    }

    #[test]
    fn test_remove() {
        let mut prefs = Preferences::default();
        prefs.set_bool(KEY_FPS_INFO, true);

        assert!(prefs.remove(KEY_FPS_INFO));
        assert!(!prefs.remove(KEY_FPS_INFO));
    }
}
