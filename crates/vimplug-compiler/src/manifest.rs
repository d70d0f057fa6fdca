//! Plugin list decoding
//!
//! The input document is a JSON object mapping plugin identifiers
//! (`owner/repo`) to optional per-plugin options:
//!
//! ```json
//! {
//!   "junegunn/fzf.vim": {
//!     "config": "{ 'on': 'Files' }",
//!     "hotkeys": { "<C-f>": ":Files<CR>" }
//!   },
//!   "tpope/vim-fugitive": {}
//! }
//! ```
//!
//! Declaration order matters for the generated files, so both the top-level
//! object and each `hotkeys` object are decoded into ordered lists rather than
//! hash maps.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;

use crate::error::{CompileError, Result};

/// The full plugin list, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginSpec {
    pub plugins: Vec<PluginEntry>,
}

/// One declared plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginEntry {
    /// Plugin identifier, conventionally `owner/repo`
    pub id: String,
    pub options: PluginOptions,
}

/// Optional per-plugin settings
///
/// Must be decoded from an object. Unrecognized keys are ignored, so `{}` and
/// `{"comment": "..."}` both mean "no options".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginOptions {
    /// Fragment appended verbatim after the identifier in the `Plug` line.
    /// Not validated; it must already be valid vimscript.
    pub config: Option<String>,
    /// Key bindings for this plugin
    pub hotkeys: Option<Hotkeys>,
}

/// Key sequence to action bindings, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hotkeys {
    pub bindings: Vec<(String, String)>,
}

impl PluginSpec {
    /// Decode a plugin list from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and decode a plugin list file
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| CompileError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&json).map_err(|source| CompileError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &PluginEntry> {
        self.plugins.iter()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Look up a plugin by identifier
    pub fn get(&self, id: &str) -> Option<&PluginEntry> {
        self.plugins.iter().find(|entry| entry.id == id)
    }
}

impl PluginOptions {
    /// True when at least one key binding is declared
    pub fn has_hotkeys(&self) -> bool {
        self.hotkeys.as_ref().is_some_and(|hotkeys| !hotkeys.is_empty())
    }
}

impl Hotkeys {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings
            .iter()
            .map(|(keys, action)| (keys.as_str(), action.as_str()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<'de> Deserialize<'de> for PluginSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(PluginSpecVisitor)
    }
}

struct PluginSpecVisitor;

impl<'de> Visitor<'de> for PluginSpecVisitor {
    type Value = PluginSpec;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping plugin identifiers to plugin options")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<PluginSpec, A::Error> {
        let mut plugins: Vec<PluginEntry> = Vec::with_capacity(map.size_hint().unwrap_or(0));

        while let Some(id) = map.next_key::<String>()? {
            if id.trim().is_empty() {
                return Err(de::Error::custom("plugin identifier must not be empty"));
            }
            if plugins.iter().any(|entry| entry.id == id) {
                return Err(de::Error::custom(format!("duplicate plugin identifier '{}'", id)));
            }

            // `null` is the same as `{}`
            let options = map.next_value::<Option<PluginOptions>>()?.unwrap_or_default();
            plugins.push(PluginEntry { id, options });
        }

        Ok(PluginSpec { plugins })
    }
}

/// Keys recognized inside a plugin's options object
#[derive(Deserialize)]
#[serde(field_identifier, rename_all = "lowercase")]
enum OptionsField {
    Config,
    Hotkeys,
    #[serde(other)]
    Other,
}

impl<'de> Deserialize<'de> for PluginOptions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(PluginOptionsVisitor)
    }
}

struct PluginOptionsVisitor;

impl<'de> Visitor<'de> for PluginOptionsVisitor {
    type Value = PluginOptions;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object with optional `config` and `hotkeys` fields")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<PluginOptions, A::Error> {
        let mut config: Option<Option<String>> = None;
        let mut hotkeys: Option<Option<Hotkeys>> = None;

        while let Some(field) = map.next_key::<OptionsField>()? {
            match field {
                OptionsField::Config => {
                    if config.is_some() {
                        return Err(de::Error::duplicate_field("config"));
                    }
                    config = Some(map.next_value()?);
                }
                OptionsField::Hotkeys => {
                    if hotkeys.is_some() {
                        return Err(de::Error::duplicate_field("hotkeys"));
                    }
                    hotkeys = Some(map.next_value()?);
                }
                OptionsField::Other => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(PluginOptions {
            config: config.flatten(),
            hotkeys: hotkeys.flatten(),
        })
    }
}

impl<'de> Deserialize<'de> for Hotkeys {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(HotkeysVisitor)
    }
}

struct HotkeysVisitor;

impl<'de> Visitor<'de> for HotkeysVisitor {
    type Value = Hotkeys;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping key sequences to actions")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Hotkeys, A::Error> {
        let mut bindings: Vec<(String, String)> = Vec::with_capacity(map.size_hint().unwrap_or(0));

        while let Some((keys, action)) = map.next_entry::<String, String>()? {
            if bindings.iter().any(|(existing, _)| *existing == keys) {
                return Err(de::Error::custom(format!("duplicate key sequence '{}'", keys)));
            }
            bindings.push((keys, action));
        }

        Ok(Hotkeys { bindings })
    }
}
