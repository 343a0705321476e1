use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf, str::FromStr, time::Duration};

#[cfg(test)]
use proptest::prelude::*;

/// Configuration for a review.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// The path to the Leela Zero executable.
    #[cfg_attr(test, strategy("[a-z/]{1,20}".prop_map(PathBuf::from)))]
    pub engine: PathBuf,

    /// The directory where networks are kept.
    #[cfg_attr(test, strategy("[a-z/]{1,20}".prop_map(PathBuf::from)))]
    pub network_dir: PathBuf,

    /// The file name of the network to load.
    #[cfg_attr(test, strategy("[a-z0-9.]{1,20}"))]
    pub network: String,

    /// How long to think about each position.
    #[serde(with = "humantime_serde")]
    #[cfg_attr(test, strategy((1..600u64).prop_map(Duration::from_secs)))]
    pub analysis: Duration,

    /// How often the engine reports during analysis, in centiseconds.
    #[serde(default = "Settings::default_interval")]
    #[cfg_attr(test, strategy(1..1000u32))]
    pub interval: u32,

    /// The swing in win rate, in percentage points, beyond which a move is a hotspot.
    #[cfg_attr(test, strategy((0..10000u32).prop_map(|t| f64::from(t) / 100.)))]
    pub hotspot_threshold: f64,

    /// How often progress is saved.
    #[serde(default = "Settings::default_checkpoint", with = "humantime_serde")]
    #[cfg_attr(test, strategy((1..600u64).prop_map(Duration::from_secs)))]
    pub checkpoint: Duration,
}

impl Settings {
    fn default_interval() -> u32 {
        50
    }

    fn default_checkpoint() -> Duration {
        Duration::from_secs(10)
    }
}

/// The reason why parsing [`Settings`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse the review settings")]
pub struct ParseSettingsError(ron::de::SpannedError);

impl FromStr for Settings {
    type Err = ParseSettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = ron::ser::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}
