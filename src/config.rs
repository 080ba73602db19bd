//! Configuration file parser for the `tomosino` executable

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::histogram::{Policy, DEFAULT_BINS};

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {

    /// Number of histogram bins
    #[serde(default = "default_bins")]
    pub bins: usize,

    /// Which open-times the histogram counts
    #[serde(default)]
    pub policy: Policy,

    /// Side, in pixels, of the block drawn for each leaf and projection
    #[serde(default = "default_scale")]
    pub scale: u32,

    /// Crop sinograms before rendering them as PNG
    #[serde(default = "default_crop")]
    pub crop: bool,
}

fn default_bins () -> usize { DEFAULT_BINS }
fn default_scale() -> u32   { 4 }
fn default_crop () -> bool  { true }

impl Default for Config {
    fn default() -> Self {
        Self {
            bins  : default_bins(),
            policy: Policy::default(),
            scale : default_scale(),
            crop  : default_crop(),
        }
    }
}

pub fn read_config_file(path: &Path) -> Result<Config> {
    let config = fs::read_to_string(path)?;
    Ok(toml::from_str(&config)?)
}
