use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::track::TimePrecision;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResampleOptions {
    // `n = len * (actual / target + widen_factor)`
    pub widen_factor: f64,
    pub height_scale: f64,
    pub width_scale: f64,
}

impl Default for ResampleOptions {
    fn default() -> Self {
        ResampleOptions {
            widen_factor: 1.2,
            height_scale: 1.5,
            width_scale: 1.0,
        }
    }
}

/// What happens to the points after the edited section.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrailingShift {
    /// Leave the trailing timestamps alone, the duration delta is only reported.
    Keep,
    /// Shift the trailing points by the duration delta so the gap after the
    /// edited section is preserved.
    Propagate,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedEditOptions {
    pub resample: ResampleOptions,
    pub thin: bool,
    pub trailing_shift: TrailingShift,
}

impl Default for SpeedEditOptions {
    fn default() -> Self {
        SpeedEditOptions {
            resample: ResampleOptions::default(),
            thin: true,
            trailing_shift: TrailingShift::Keep,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    // `None` infers it from the loaded points.
    pub precision: Option<TimePrecision>,
    pub coordinate_decimals: usize,
    pub elevation_decimals: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        StoreOptions {
            precision: None,
            coordinate_decimals: 7,
            elevation_decimals: 1,
        }
    }
}

pub fn load_json<T>(path: impl AsRef<Path>) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let path = path.as_ref();
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("invalid options in {}", path.display()))
}
