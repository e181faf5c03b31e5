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

//! ImgArray CLI Tool
//!
//! Converts a raw disk image into a C array declaration.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing::error;

mod commands;
mod logging;

use crate::commands::config::ConfigCommands;
use crate::commands::convert::ConvertArgs;

#[derive(Parser, Debug)]
#[command(name = "imgarray")]
#[command(about = "ImgArray - embed binary images as C byte arrays")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug details
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors and skip the summary line
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert an image into a C array source file
    Convert(ConvertArgs),

    /// Inspect or create configuration files
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Convert(args) => commands::convert::run_convert(cli.config, args, cli.quiet),
        Commands::Config { command } => commands::config::handle_config_command(cli.config, command),
    };

    if let Err(e) = result {
        error!("{e:#}");
        process::exit(1);
    }
}
