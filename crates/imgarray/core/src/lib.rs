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

//! ImgArray Core Library
//!
//! Turns a raw binary image into a statically initialized C array so it can
//! be compiled straight into another program. The image is treated as an
//! opaque byte stream; nothing inside it is parsed or validated.

pub mod config;
pub mod emitter;
pub mod error;
pub mod format;
pub mod job;

pub use config::{ConfigOverrides, ConversionConfig};
pub use emitter::{ByteArrayEmitter, EmitError, VALUES_PER_LINE, literal_lines};
pub use error::{ConversionError, ConversionResult};
pub use format::ArrayFormat;
pub use job::{ConversionJob, ConversionReport};
