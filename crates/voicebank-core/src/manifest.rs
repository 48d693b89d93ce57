//! Voice manifest loading

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};

/// Parsed `voice-index.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub voices: Vec<VoiceEntry>,
}

/// One downloadable voice sample
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub voice_id: String,

    /// Source URL; empty or non-string values are treated as missing
    #[serde(default, deserialize_with = "non_empty_url")]
    pub url: Option<String>,
}

impl VoiceEntry {
    pub fn new(name: impl Into<String>, voice_id: impl Into<String>, url: Option<&str>) -> Self {
        Self {
            name: name.into(),
            voice_id: voice_id.into(),
            url: url.filter(|u| !u.is_empty()).map(str::to_string),
        }
    }

    /// Sanitized destination file name
    pub fn file_name(&self) -> String {
        crate::sanitize::voice_filename(&self.name, &self.voice_id)
    }
}

/// Accept any JSON value: non-strings keep their JSON text, null is empty.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

fn non_empty_url<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(url) if !url.is_empty() => Ok(Some(url)),
        Value::Null | Value::String(_) => Ok(None),
        other => {
            debug!("Ignoring non-string url {}", other);
            Ok(None)
        }
    }
}

impl Manifest {
    /// Load a manifest from disk
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::ManifestNotFound(path.to_path_buf()),
            _ => Error::ManifestRead {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let manifest: Manifest =
            serde_json::from_str(&contents).map_err(|e| Error::ManifestParse {
                path: path.to_path_buf(),
                source: e,
            })?;

        debug!("Loaded {} voice entries from {:?}", manifest.len(), path);
        Ok(manifest)
    }

    /// Parse manifest JSON held in memory
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entries_in_order() {
        let manifest = Manifest::from_json(
            r#"{"voices":[
                {"name":"Alice","voice_id":"1","url":"http://x/a.mp3"},
                {"name":"Bob","voice_id":"2","url":""}
            ]}"#,
        )
        .unwrap();

        assert_eq!(manifest.len(), 2);
        assert_eq!(
            manifest.voices[0],
            VoiceEntry::new("Alice", "1", Some("http://x/a.mp3"))
        );
        assert_eq!(manifest.voices[1].name, "Bob");
        assert_eq!(manifest.voices[1].url, None);
    }

    #[test]
    fn test_missing_voices_is_empty() {
        let manifest = Manifest::from_json(r#"{"version": 3}"#).unwrap();
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_missing_fields_default() {
        let manifest = Manifest::from_json(r#"{"voices":[{}, {"url": null}]}"#).unwrap();
        assert_eq!(manifest.voices[0], VoiceEntry::default());
        assert_eq!(manifest.voices[1].url, None);
        assert_eq!(manifest.voices[0].file_name(), ".mp3");
    }

    #[test]
    fn test_file_name_is_sanitized() {
        let entry = VoiceEntry::new("Narrator / Deep", "42", Some("http://x"));
        assert_eq!(entry.file_name(), "Narrator _ Deep42.mp3");
    }

    #[test]
    fn test_non_string_fields_are_coerced() {
        let manifest = Manifest::from_json(
            r#"{"voices":[
                {"name":"Alice","voice_id":1,"url":"http://x/a.mp3"},
                {"name":null,"voice_id":"2","url":"http://x/b.mp3"},
                {"name":"Carol","voice_id":true,"url":42}
            ]}"#,
        )
        .unwrap();

        assert_eq!(manifest.len(), 3);
        assert_eq!(manifest.voices[0].voice_id, "1");
        assert_eq!(manifest.voices[0].file_name(), "Alice1.mp3");
        assert_eq!(manifest.voices[1].name, "");
        assert_eq!(manifest.voices[1].file_name(), "2.mp3");
        assert_eq!(manifest.voices[2].voice_id, "true");
        assert_eq!(manifest.voices[2].url, None);
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(Manifest::from_json(r#"{"voices": [ "#).is_err());
    }
}
