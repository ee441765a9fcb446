//! Run configuration.
//!
//! Values resolve in order: CLI flag, environment (`.env` is loaded first),
//! built-in default.
//!
//! | variable | meaning |
//! |---|---|
//! | `TEAMJOIN_HOME_IDX` | home team name column |
//! | `TEAMJOIN_AWAY_IDX` | away team name column |
//! | `TEAMJOIN_HEADER` | `auto`, `present` or `absent` |
//! | `TEAMJOIN_SCHEMA` | `ids` or `full` |

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

pub const DEFAULT_HOME_IDX: usize = 5;
pub const DEFAULT_AWAY_IDX: usize = 7;

const ENV_HOME_IDX: &str = "TEAMJOIN_HOME_IDX";
const ENV_AWAY_IDX: &str = "TEAMJOIN_AWAY_IDX";
const ENV_HEADER: &str = "TEAMJOIN_HEADER";
const ENV_SCHEMA: &str = "TEAMJOIN_SCHEMA";

/// How the first schedule row is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HeaderMode {
    /// Guess from the content of the first rows
    #[default]
    Auto,
    /// The first row is a header and is dropped
    Present,
    /// Every row is a fixture
    Absent,
}

impl FromStr for HeaderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "present" | "yes" | "true" => Ok(Self::Present),
            "absent" | "no" | "false" => Ok(Self::Absent),
            other => Err(format!("unknown header mode '{other}'")),
        }
    }
}

/// Output column layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputSchema {
    /// Fixture columns plus home/away team ids
    Ids,
    /// `Ids` plus team categories and the competition id
    #[default]
    Full,
}

impl FromStr for OutputSchema {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ids" => Ok(Self::Ids),
            "full" => Ok(Self::Full),
            other => Err(format!("unknown output schema '{other}'")),
        }
    }
}

impl fmt::Display for OutputSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ids => write!(f, "ids"),
            Self::Full => write!(f, "full"),
        }
    }
}

/// Settings of the in-memory join
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinSettings {
    pub home_idx: usize,
    pub away_idx: usize,
    pub header: HeaderMode,
    pub schema: OutputSchema,
}

impl Default for JoinSettings {
    fn default() -> Self {
        Self {
            home_idx: DEFAULT_HOME_IDX,
            away_idx: DEFAULT_AWAY_IDX,
            header: HeaderMode::Auto,
            schema: OutputSchema::Full,
        }
    }
}

impl JoinSettings {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.home_idx == self.away_idx {
            return Err(ConfigError::SameColumns(self.home_idx));
        }
        Ok(())
    }
}

/// Options of a complete file-to-file run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinOptions {
    pub schedule: PathBuf,
    pub teams: PathBuf,
    pub out: PathBuf,
    pub settings: JoinSettings,
    /// Input delimiter, detected when `None`
    pub delimiter: Option<char>,
    /// JSON object of extra competition ids
    pub competitions: Option<PathBuf>,
    /// Where to write the JSON run summary
    pub report: Option<PathBuf>,
}

impl JoinOptions {
    pub fn new(
        schedule: impl Into<PathBuf>,
        teams: impl Into<PathBuf>,
        out: impl Into<PathBuf>,
    ) -> Self {
        Self {
            schedule: schedule.into(),
            teams: teams.into(),
            out: out.into(),
            settings: JoinSettings::default(),
            delimiter: None,
            competitions: None,
            report: None,
        }
    }
}

/// Defaults taken from the environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvDefaults {
    pub home_idx: Option<usize>,
    pub away_idx: Option<usize>,
    pub header: Option<HeaderMode>,
    pub schema: Option<OutputSchema>,
}

impl EnvDefaults {
    /// Read the `TEAMJOIN_*` variables, loading `.env` if present
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read defaults through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            home_idx: parse_var(&lookup, ENV_HOME_IDX)?,
            away_idx: parse_var(&lookup, ENV_AWAY_IDX)?,
            header: parse_var(&lookup, ENV_HEADER)?,
            schema: parse_var(&lookup, ENV_SCHEMA)?,
        })
    }

    /// Fill unset CLI values from the environment, then from built-in defaults
    pub fn resolve(
        &self,
        home_idx: Option<usize>,
        away_idx: Option<usize>,
        header: Option<HeaderMode>,
        schema: Option<OutputSchema>,
    ) -> JoinSettings {
        let defaults = JoinSettings::default();
        JoinSettings {
            home_idx: home_idx.or(self.home_idx).unwrap_or(defaults.home_idx),
            away_idx: away_idx.or(self.away_idx).unwrap_or(defaults.away_idx),
            header: header.or(self.header).unwrap_or(defaults.header),
            schema: schema.or(self.schema).unwrap_or(defaults.schema),
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> ConfigResult<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<T>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidEnv {
            key: key.to_string(),
            value: raw.clone(),
        })
}
