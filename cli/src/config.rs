use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use tilefield_core::{CellCount, Coord, MapConfig};

/// Contents of a `--config` TOML file.
///
/// ```toml
/// seed = 7
///
/// [map]
/// size = 25
/// mines = 20
/// start = [12, 12]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub seed: Option<u64>,
    pub map: MapConfig,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Command line values that take precedence over the config file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub size: Option<Coord>,
    pub mines: Option<CellCount>,
    pub start_x: Option<Coord>,
    pub start_y: Option<Coord>,
}

impl FileConfig {
    /// Applies `overrides`. Changing only the size moves an unset start to the new centre.
    pub fn merge(mut self, overrides: &Overrides) -> Self {
        if let Some(size) = overrides.size {
            if self.map.size != size && overrides.start_x.is_none() && overrides.start_y.is_none()
            {
                self.map.start = (size / 2, size / 2);
            }
            self.map.size = size;
        }
        if let Some(mines) = overrides.mines {
            self.map.mines = mines;
        }
        if let Some(x) = overrides.start_x {
            self.map.start.0 = x;
        }
        if let Some(y) = overrides.start_y {
            self.map.start.1 = y;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        self
    }
}
