//! Competition name → competition id.
//!
//! Schedules spell competitions in several ways (`J1`, `明治安田J1リーグ`,
//! `ルヴァンカップ`...). Names are first folded onto a canonical code through
//! [`COMPETITION_ALIASES`], then the code is looked up in [`COMPETITION_IDS`].
//! An override stored under an exact spelling skips the alias step.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};

/// Alternate spellings → canonical competition code
pub const COMPETITION_ALIASES: &[(&str, &str)] = &[
    ("J1リーグ", "J1"),
    ("明治安田J1リーグ", "J1"),
    ("明治安田生命J1リーグ", "J1"),
    ("J2リーグ", "J2"),
    ("明治安田J2リーグ", "J2"),
    ("明治安田生命J2リーグ", "J2"),
    ("J3リーグ", "J3"),
    ("明治安田J3リーグ", "J3"),
    ("明治安田生命J3リーグ", "J3"),
    ("ルヴァンカップ", "LEVAIN"),
    ("YBCルヴァンカップ", "LEVAIN"),
    ("JリーグYBCルヴァンカップ", "LEVAIN"),
    ("天皇杯", "EMPEROR"),
    ("天皇杯JFA全日本サッカー選手権大会", "EMPEROR"),
    ("スーパーカップ", "SUPER"),
    ("FUJIFILM SUPER CUP", "SUPER"),
    ("ACL", "ACL"),
    ("AFCチャンピオンズリーグ", "ACL"),
    ("AFCチャンピオンズリーグエリート", "ACL"),
    ("J1昇格プレーオフ", "PLAYOFF"),
    ("J2昇格プレーオフ", "PLAYOFF"),
];

/// Canonical competition code → competition id
pub const COMPETITION_IDS: &[(&str, &str)] = &[
    ("J1", "1"),
    ("J2", "2"),
    ("J3", "3"),
    ("LEVAIN", "4"),
    ("EMPEROR", "5"),
    ("SUPER", "6"),
    ("ACL", "7"),
    ("PLAYOFF", "8"),
];

/// Competition lookup seeded from the literal tables
#[derive(Debug, Clone)]
pub struct Competitions {
    aliases: HashMap<String, String>,
    ids: HashMap<String, String>,
}

impl Default for Competitions {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Competitions {
    pub fn builtin() -> Self {
        let aliases = COMPETITION_ALIASES
            .iter()
            .map(|(name, code)| (fold(name), code.to_string()))
            .collect();
        let ids = COMPETITION_IDS
            .iter()
            .map(|(code, id)| (fold(code), id.to_string()))
            .collect();
        Self { aliases, ids }
    }

    /// Add or override ids. Later entries win.
    pub fn extend<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, id) in entries {
            let key = fold(name.as_ref());
            if !key.is_empty() {
                self.ids.insert(key, id.into());
            }
        }
    }

    /// Load extra ids from a JSON object of `"name": "id"` pairs.
    pub fn load_overrides(&mut self, path: &Path) -> ConfigResult<usize> {
        let invalid = |message: String| ConfigError::Competitions {
            path: path.to_path_buf(),
            message,
        };

        let content = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let entries: HashMap<String, String> =
            serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?;

        let count = entries.len();
        self.extend(entries);
        Ok(count)
    }

    /// Id of a competition name, if known.
    ///
    /// An id stored under the name itself wins, so an override can target one
    /// alias spelling. Otherwise the name is resolved through the alias table.
    pub fn competition_id(&self, name: &str) -> Option<&str> {
        let key = fold(name);
        if key.is_empty() {
            return None;
        }
        if let Some(id) = self.ids.get(&key) {
            return Some(id.as_str());
        }
        let code = fold(self.aliases.get(&key)?);
        self.ids.get(&code).map(String::as_str)
    }
}

/// Trim, then upper-case ASCII letters only
fn fold(name: &str) -> String {
    name.trim().to_ascii_uppercase()
}
