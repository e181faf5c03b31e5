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

//! File-level conversion of one image into one source file

use crate::config::ConversionConfig;
use crate::emitter::{ByteArrayEmitter, EmitError, literal_lines};
use crate::error::{ConversionError, ConversionResult};
use crate::format::ArrayFormat;
use std::fs::{self, File, Metadata};
use std::io::{self, BufWriter, Read};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// A single image-to-array conversion
#[derive(Debug, Clone)]
pub struct ConversionJob {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub format: ArrayFormat,
}

/// Outcome of a successful [`ConversionJob::run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub byte_length: u64,
    pub literal_lines: u64,
}

impl ConversionJob {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>, format: ArrayFormat) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            format,
        }
    }

    /// Build a job from resolved settings, expanding `~` in both paths
    pub fn from_config(config: &ConversionConfig) -> Self {
        Self::new(config.resolved_input_path(), config.resolved_output_path(), config.format())
    }

    /// Convert the input file and write the declaration to the output path.
    ///
    /// The format and input are checked before the output is touched, and an
    /// output that resolves to the input file is refused. If the run fails
    /// after the job created a regular output file, that file is removed.
    pub fn run(&self) -> ConversionResult<ConversionReport> {
        self.format.validate()?;

        let (input, metadata) = self.open_input()?;
        let length = metadata.len();
        debug!(input = %self.input_path.display(), length, "input opened");

        if self.output_is_input(&metadata) {
            return Err(ConversionError::OutputCreate {
                path: self.output_path.clone(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "output is the input image"),
            });
        }

        self.write_output(input, length)?;

        let report = ConversionReport {
            input_path: self.input_path.clone(),
            output_path: self.output_path.clone(),
            byte_length: length,
            literal_lines: literal_lines(length),
        };
        info!(
            input = %report.input_path.display(),
            output = %report.output_path.display(),
            bytes = report.byte_length,
            lines = report.literal_lines,
            "conversion complete"
        );
        Ok(report)
    }

    fn open_input(&self) -> ConversionResult<(File, Metadata)> {
        let path = &self.input_path;
        let file = File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ConversionError::InputNotFound { path: path.clone() },
            _ => ConversionError::InputUnreadable { path: path.clone(), source },
        })?;

        let metadata = file.metadata().map_err(|source| ConversionError::InputUnreadable {
            path: path.clone(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(ConversionError::InputNotRegularFile { path: path.clone() });
        }

        Ok((file, metadata))
    }

    // Follows symlinks and catches hard links, so any alias of the image matches.
    #[cfg(unix)]
    fn output_is_input(&self, input: &Metadata) -> bool {
        use std::os::unix::fs::MetadataExt;

        fs::metadata(&self.output_path).is_ok_and(|output| output.dev() == input.dev() && output.ino() == input.ino())
    }

    #[cfg(not(unix))]
    fn output_is_input(&self, _input: &Metadata) -> bool {
        match (fs::canonicalize(&self.input_path), fs::canonicalize(&self.output_path)) {
            (Ok(input), Ok(output)) => input == output,
            _ => false,
        }
    }

    /// Emit `length` bytes of `input` into the output file, cleaning up on failure
    fn write_output<R: Read>(&self, input: R, length: u64) -> ConversionResult<()> {
        let output = self.create_output()?;
        let emitter = ByteArrayEmitter::new(self.format.clone());

        if let Err(e) = emitter.emit(input, length, BufWriter::new(output.file)) {
            if output.owned {
                self.remove_partial_output();
            } else {
                warn!(output = %self.output_path.display(), "leaving non-regular output in place");
            }
            return Err(self.map_emit_error(e));
        }
        Ok(())
    }

    fn create_output(&self) -> ConversionResult<OutputFile> {
        let path = &self.output_path;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ConversionError::OutputCreate {
                path: path.clone(),
                source,
            })?;
        }

        // Symlinks and device nodes are written through but never unlinked.
        let replaceable = match fs::symlink_metadata(path) {
            Ok(existing) => existing.file_type().is_file(),
            Err(_) => true,
        };

        let file = File::create(path).map_err(|source| ConversionError::OutputCreate {
            path: path.clone(),
            source,
        })?;
        let owned = replaceable && file.metadata().is_ok_and(|m| m.is_file());

        Ok(OutputFile { file, owned })
    }

    fn remove_partial_output(&self) {
        if let Err(e) = fs::remove_file(&self.output_path) {
            warn!(output = %self.output_path.display(), error = %e, "could not remove partial output");
        }
    }

    fn map_emit_error(&self, error: EmitError) -> ConversionError {
        match error {
            EmitError::Read(source) => ConversionError::InputRead {
                path: self.input_path.clone(),
                source,
            },
            EmitError::Write(source) => ConversionError::OutputWrite {
                path: self.output_path.clone(),
                source,
            },
            EmitError::Truncated { expected, actual } => ConversionError::InputTruncated {
                path: self.input_path.clone(),
                expected,
                actual,
            },
        }
    }
}

/// Output handle plus whether the job may delete it on failure
struct OutputFile {
    file: File,
    owned: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    /// Yields `good` bytes, then fails like a bad sector
    struct FailingReader {
        good: usize,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.good == 0 {
                return Err(io::Error::other("bad sector"));
            }
            let n = self.good.min(buf.len());
            buf[..n].fill(0xaa);
            self.good -= n;
            Ok(n)
        }
    }

    #[test]
    fn test_invalid_format_touches_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("floppy.img");
        let output = temp_dir.path().join("floppy_array.c");
        fs::write(&input, [1u8, 2, 3]).unwrap();

        let job = ConversionJob::new(&input, &output, ArrayFormat::new("9lives", "unsigned char"));
        assert!(matches!(job.run(), Err(ConversionError::InvalidArrayName(_))));
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_input_does_not_create_output() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("floppy_array.c");

        let job = ConversionJob::new(temp_dir.path().join("absent.img"), &output, ArrayFormat::default());
        let err = job.run().unwrap_err();
        assert!(matches!(err, ConversionError::InputNotFound { .. }));
        assert!(err.to_string().contains("absent.img"));
        assert!(!output.exists());
    }

    #[test]
    fn test_emit_errors_carry_paths() {
        let job = ConversionJob::new("in.img", "out.c", ArrayFormat::default());

        let read = job.map_emit_error(EmitError::Read(io::Error::other("bad sector")));
        assert!(matches!(read, ConversionError::InputRead { ref path, .. } if path == Path::new("in.img")));

        let write = job.map_emit_error(EmitError::Write(io::Error::other("disk full")));
        assert!(matches!(write, ConversionError::OutputWrite { ref path, .. } if path == Path::new("out.c")));

        let short = job.map_emit_error(EmitError::Truncated { expected: 10, actual: 4 });
        assert!(matches!(short, ConversionError::InputTruncated { expected: 10, actual: 4, .. }));
    }

    #[test]
    fn test_from_config_uses_format_and_paths() {
        let config = ConversionConfig {
            input_path: PathBuf::from("/images/disk.img"),
            output_path: PathBuf::from("out/disk.c"),
            array_name: "disk".to_string(),
            element_type: "const uint8_t".to_string(),
        };
        let job = ConversionJob::from_config(&config);
        assert_eq!(job.input_path, PathBuf::from("/images/disk.img"));
        assert_eq!(job.output_path, PathBuf::from("out/disk.c"));
        assert_eq!(job.format, ArrayFormat::new("disk", "const uint8_t"));
    }

    #[test]
    fn test_read_failure_removes_partial_output() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("floppy_array.c");
        let job = ConversionJob::new(temp_dir.path().join("floppy.img"), &output, ArrayFormat::default());

        let err = job.write_output(FailingReader { good: 25 }, 100).unwrap_err();

        assert!(matches!(err, ConversionError::InputRead { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_shrunken_input_removes_partial_output() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("floppy_array.c");
        fs::write(&output, "stale").unwrap();
        let job = ConversionJob::new(temp_dir.path().join("floppy.img"), &output, ArrayFormat::default());

        let err = job.write_output(&[1u8, 2, 3][..], 8).unwrap_err();

        assert!(matches!(err, ConversionError::InputTruncated { expected: 8, actual: 3, .. }));
        assert!(!output.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_failure_keeps_symlinked_output() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target.c");
        let link = temp_dir.path().join("floppy_array.c");
        fs::write(&target, "").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();
        let job = ConversionJob::new(temp_dir.path().join("floppy.img"), &link, ArrayFormat::default());

        let err = job.write_output(FailingReader { good: 4 }, 10).unwrap_err();

        assert!(matches!(err, ConversionError::InputRead { .. }));
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert!(target.exists());
    }

    #[test]
    fn test_successful_write_keeps_output() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("floppy_array.c");
        let job = ConversionJob::new(temp_dir.path().join("floppy.img"), &output, ArrayFormat::default());

        job.write_output(&[0x7fu8][..], 1).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "unsigned char floppy_array[1] = {\n  0x7f,\n};\n");
    }
}
