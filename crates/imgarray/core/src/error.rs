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

//! Error types for image conversion

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while converting an image into an array literal
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Cannot open input file {}: {source}", path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Input is not a regular file: {}", path.display())]
    InputNotRegularFile { path: PathBuf },

    #[error("Failed reading input file {}: {source}", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Input file {} shrank while reading: expected {expected} bytes, got {actual}", path.display())]
    InputTruncated { path: PathBuf, expected: u64, actual: u64 },

    #[error("Cannot create output file {}: {source}", path.display())]
    OutputCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed writing output file {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid array name {0:?}: expected a C identifier")]
    InvalidArrayName(String),

    #[error("Invalid element type {0:?}: expected a C type token")]
    InvalidElementType(String),

    #[error("Invalid configuration {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("Cannot write configuration {}: {source}", path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConversionError {
    /// Input missing, unreadable, or changed underneath us
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InputNotFound { .. }
                | Self::InputUnreadable { .. }
                | Self::InputNotRegularFile { .. }
                | Self::InputRead { .. }
                | Self::InputTruncated { .. }
        )
    }

    /// Destination could not be created or written
    pub fn is_output_error(&self) -> bool {
        matches!(self, Self::OutputCreate { .. } | Self::OutputWrite { .. })
    }
}

/// Standard Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;
