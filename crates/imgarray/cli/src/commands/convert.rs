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

//! `imgarray convert`

use anyhow::Result;
use clap::Args;
use imgarray_core::{ConfigOverrides, ConversionConfig, ConversionJob};
use std::path::PathBuf;
use tracing::debug;

/// Arguments for the convert command
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Raw image to embed [default: ~/floppy.img]
    #[arg(short, long, value_name = "IMAGE")]
    pub input: Option<PathBuf>,

    /// Generated C source file [default: floppy_array.c]
    #[arg(short, long, value_name = "SOURCE")]
    pub output: Option<PathBuf>,

    /// Identifier of the emitted array [default: floppy_array]
    #[arg(long)]
    pub array_name: Option<String>,

    /// C element type of the emitted array [default: "unsigned char"]
    #[arg(long)]
    pub element_type: Option<String>,
}

impl From<ConvertArgs> for ConfigOverrides {
    fn from(args: ConvertArgs) -> Self {
        Self {
            input_path: args.input,
            output_path: args.output,
            array_name: args.array_name,
            element_type: args.element_type,
        }
    }
}

pub fn run_convert(config_path: Option<PathBuf>, args: ConvertArgs, quiet: bool) -> Result<()> {
    let config = ConversionConfig::resolve(config_path, args.into())?;
    debug!(?config, "effective configuration");

    let report = ConversionJob::from_config(&config).run()?;

    if !quiet {
        println!(
            "Embedded {} bytes from {} to {}",
            report.byte_length,
            report.input_path.display(),
            report.output_path.display()
        );
    }
    Ok(())
}
