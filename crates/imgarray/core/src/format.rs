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

//! Declaration format for the generated array

use crate::error::{ConversionError, ConversionResult};
use serde::{Deserialize, Serialize};

/// Identifier used when none is configured
pub const DEFAULT_ARRAY_NAME: &str = "floppy_array";

/// C element type used when none is configured
pub const DEFAULT_ELEMENT_TYPE: &str = "unsigned char";

/// Names the array and its element type in the emitted declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayFormat {
    pub array_name: String,
    pub element_type: String,
}

impl Default for ArrayFormat {
    fn default() -> Self {
        Self {
            array_name: DEFAULT_ARRAY_NAME.to_string(),
            element_type: DEFAULT_ELEMENT_TYPE.to_string(),
        }
    }
}

impl ArrayFormat {
    pub fn new(array_name: impl Into<String>, element_type: impl Into<String>) -> Self {
        Self {
            array_name: array_name.into(),
            element_type: element_type.into(),
        }
    }

    /// Check that both tokens can be pasted into C source verbatim
    pub fn validate(&self) -> ConversionResult<()> {
        if !is_c_identifier(&self.array_name) {
            return Err(ConversionError::InvalidArrayName(self.array_name.clone()));
        }
        if !is_type_token(&self.element_type) {
            return Err(ConversionError::InvalidElementType(self.element_type.clone()));
        }
        Ok(())
    }

    /// Opening line of the declaration, without the trailing newline
    pub fn declaration(&self, length: u64) -> String {
        format!("{} {}[{}] = {{", self.element_type, self.array_name, length)
    }
}

fn is_c_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// `unsigned char`, `const uint8_t`: identifiers separated by single spaces
fn is_type_token(s: &str) -> bool {
    !s.is_empty() && s.split(' ').all(is_c_identifier)
}
