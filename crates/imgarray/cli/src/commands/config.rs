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

//! `imgarray config`

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use imgarray_core::{ConfigOverrides, ConversionConfig};
use std::path::PathBuf;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Write the effective configuration to a new file
    Init {
        /// Destination of the configuration file
        path: PathBuf,

        /// Replace the file if it already exists
        #[arg(long)]
        force: bool,
    },
}

pub fn handle_config_command(config_path: Option<PathBuf>, command: ConfigCommands) -> Result<()> {
    let config = ConversionConfig::resolve(config_path, ConfigOverrides::default())?;

    match command {
        ConfigCommands::Show => {
            print!("{}", config.to_toml()?);
        }
        ConfigCommands::Init { path, force } => {
            if path.exists() && !force {
                bail!("Configuration file {} already exists (use --force to replace it)", path.display());
            }
            config
                .save_to_file(&path)
                .with_context(|| format!("Cannot initialize configuration at {}", path.display()))?;
            info!(path = %path.display(), "configuration written");
        }
    }

    Ok(())
}
