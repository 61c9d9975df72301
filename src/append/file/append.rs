// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::io::Write;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::Error;
use crate::Layout;
use crate::Trap;
use crate::append::Append;
use crate::append::file::rolling::RollingFileWriter;
use crate::append::file::rolling::RollingFileWriterBuilder;
use crate::append::file::rotation::Rotation;
use crate::layout::CompactLayout;
use crate::record::Record;

/// A builder to configure and create an [`File`] appender.
#[derive(Debug)]
pub struct FileBuilder {
    builder: RollingFileWriterBuilder,
    layout: Box<dyn Layout>,
}

impl FileBuilder {
    /// Create a new file appender builder.
    ///
    /// The active log file is `{basedir}/{filename}.{suffix}`, with the suffix defaulting to
    /// `log`.
    pub fn new(basedir: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            builder: RollingFileWriterBuilder::new(basedir, filename),
            layout: Box::new(CompactLayout::default()),
        }
    }

    /// Build the [`File`] appender.
    ///
    /// # Errors
    ///
    /// Return an error if either:
    ///
    /// * The log directory cannot be created.
    /// * The configured filename or suffix is empty.
    /// * The log file cannot be opened.
    pub fn build(self) -> Result<File, Error> {
        let FileBuilder { builder, layout } = self;
        let writer = builder.build()?;
        Ok(File::new(writer, layout))
    }

    /// Set the layout for the logs.
    ///
    /// Default to [`CompactLayout`].
    pub fn layout(mut self, layout: impl Into<Box<dyn Layout>>) -> Self {
        self.layout = layout.into();
        self
    }

    /// Set the trap for failures during rotation.
    pub fn trap(mut self, trap: Arc<dyn Trap>) -> Self {
        self.builder = self.builder.trap(trap);
        self
    }

    /// Set the time based rotation strategy.
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.builder = self.builder.rotation(rotation);
        self
    }

    /// Set the rotation strategy to roll over log files if the current log file exceeds the given
    /// size.
    ///
    /// A write that crosses a rotation period rolls over by time only; the size is checked
    /// against the new file from then on.
    pub fn rollover_size(mut self, n: NonZeroUsize) -> Self {
        self.builder = self.builder.max_file_size(n);
        self
    }

    /// Set the filename suffix.
    pub fn filename_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.builder = self.builder.filename_suffix(suffix);
        self
    }

    /// Set the maximum number of archives to keep besides the active file.
    pub fn max_backups(mut self, n: NonZeroUsize) -> Self {
        self.builder = self.builder.max_backups(n);
        self
    }
}

/// An appender that writes log records to rolling files.
///
/// [`Append::close`] flushes and releases the file; appending afterwards fails.
#[derive(Debug)]
pub struct File {
    writer: Mutex<Option<RollingFileWriter>>,
    layout: Box<dyn Layout>,
}

impl File {
    fn new(writer: RollingFileWriter, layout: Box<dyn Layout>) -> Self {
        let writer = Mutex::new(Some(writer));
        Self { writer, layout }
    }

    fn writer(&self) -> MutexGuard<'_, Option<RollingFileWriter>> {
        self.writer.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Append for File {
    fn append(&self, record: &Record) -> Result<(), Error> {
        let mut bytes = self.layout.format(record)?;
        bytes.push(b'\n');
        let mut writer = self.writer();
        let writer = writer
            .as_mut()
            .ok_or_else(|| Error::new("file appender is closed"))?;
        writer.write_all(&bytes).map_err(Error::from_io_error)?;
        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        if let Some(writer) = self.writer().as_mut() {
            writer.flush().map_err(Error::from_io_error)?;
        }
        Ok(())
    }

    fn close(&self) -> Result<(), Error> {
        let writer = self.writer().take();
        if let Some(mut writer) = writer {
            writer.flush().map_err(Error::from_io_error)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::record::Severity;

    #[test]
    fn test_append_writes_one_line_per_record() {
        let temp_dir = TempDir::new().unwrap();
        let file = FileBuilder::new(temp_dir.path(), "svc")
            .filename_suffix("log")
            .build()
            .unwrap();

        for (severity, msg) in [(Severity::Info, "started"), (Severity::Error, "failed")] {
            let record = Record::builder().severity(severity).payload(msg).build();
            file.append(&record).unwrap();
        }
        file.close().unwrap();

        let content = fs::read_to_string(temp_dir.path().join("svc.log")).unwrap();
        let lines = content.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[INFO] started"), "{}", lines[0]);
        assert!(lines[1].ends_with("[ERROR] failed"), "{}", lines[1]);
    }

    #[test]
    fn test_close_releases_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = FileBuilder::new(temp_dir.path(), "svc").build().unwrap();
        let record = Record::builder().payload("before").build();
        file.append(&record).unwrap();

        file.close().unwrap();
        let err = file.append(&record).unwrap_err();
        assert_eq!(err.message(), "file appender is closed");
        file.flush().unwrap();
        file.close().unwrap();

        let content = fs::read_to_string(temp_dir.path().join("svc.log")).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_empty_filename_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let err = FileBuilder::new(temp_dir.path(), "").build().unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::SinkCreateError);
    }
}
