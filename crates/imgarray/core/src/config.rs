// ImgArray
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Conversion settings loaded from TOML and overridden from the command line

use crate::error::{ConversionError, ConversionResult};
use crate::format::{ArrayFormat, DEFAULT_ARRAY_NAME, DEFAULT_ELEMENT_TYPE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_INPUT_PATH: &str = "~/floppy.img";
pub const DEFAULT_OUTPUT_PATH: &str = "floppy_array.c";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConversionConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub array_name: String,
    pub element_type: String,
}

/// Values supplied on the command line; `None` keeps the file or default value
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub array_name: Option<String>,
    pub element_type: Option<String>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            array_name: DEFAULT_ARRAY_NAME.to_string(),
            element_type: DEFAULT_ELEMENT_TYPE.to_string(),
        }
    }
}

impl ConversionConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> ConversionResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| config_error(path, e))?;
        let config: Self = toml::from_str(&content).map_err(|e| config_error(path, e))?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> ConversionResult<()> {
        let path = path.as_ref();
        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|source| ConversionError::ConfigWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_toml(&self) -> ConversionResult<String> {
        toml::to_string_pretty(self).map_err(|e| config_error(Path::new("<memory>"), e))
    }

    /// CLI flags win over the config file, which wins over built-in defaults
    pub fn resolve(cli_config: Option<PathBuf>, overrides: ConfigOverrides) -> ConversionResult<Self> {
        let mut config = match cli_config {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };

        if let Some(input_path) = overrides.input_path {
            config.input_path = input_path;
        }
        if let Some(output_path) = overrides.output_path {
            config.output_path = output_path;
        }
        if let Some(array_name) = overrides.array_name {
            config.array_name = array_name;
        }
        if let Some(element_type) = overrides.element_type {
            config.element_type = element_type;
        }

        Ok(config)
    }

    pub fn format(&self) -> ArrayFormat {
        ArrayFormat::new(self.array_name.clone(), self.element_type.clone())
    }

    pub fn resolved_input_path(&self) -> PathBuf {
        expand_home(&self.input_path)
    }

    pub fn resolved_output_path(&self) -> PathBuf {
        expand_home(&self.output_path)
    }
}

/// Replace a leading `~` component with the user's home directory
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

fn config_error(path: &Path, error: impl std::fmt::Display) -> ConversionError {
    ConversionError::Config {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}
