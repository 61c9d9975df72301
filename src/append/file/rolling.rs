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

use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use jiff::Timestamp;
use jiff::Zoned;

use crate::Error;
use crate::ErrorKind;
use crate::Trap;
use crate::append::file::clock::Clock;
use crate::append::file::naming::Archive;
use crate::append::file::naming::LogNaming;
use crate::append::file::rotation::Rotation;
use crate::trap::DefaultTrap;

/// A writer appending to `{basedir}/{stem}.{suffix}` and rolling it over into archives.
///
/// A rollover renames the active file to an archive and starts a new one. It happens on the
/// first write after the [`Rotation`] period of the previous write has ended, or once the active
/// file has reached the maximum size. The archive is
/// `{stem}.{period}.{index}.{suffix}` with time rotation and `{stem}.{index}.{suffix}` without;
/// index 1 is the newest archive of its period.
///
/// Files in the directory that do not follow this naming are never renamed or deleted.
#[derive(Debug)]
pub struct RollingFileWriter {
    naming: LogNaming,
    rotation: Rotation,
    max_size: Option<NonZeroUsize>,
    max_backups: Option<NonZeroUsize>,

    file: File,
    size: usize,
    last_write: Zoned,
    next_rollover: Option<Timestamp>,

    clock: Clock,
    trap: Arc<dyn Trap>,
}

impl Write for RollingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let now = self.clock.now();

        if self.next_rollover.is_some_and(|at| now.timestamp() >= at) {
            let period_of = self.last_write.clone();
            self.roll_over(&period_of);
            self.next_rollover = self.rotation.next_rollover(&now);
        } else if self.max_size.is_some_and(|max| self.size >= max.get()) {
            self.roll_over(&now);
        }
        self.last_write = now;

        let n = self.file.write(buf)?;
        self.size += n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl RollingFileWriter {
    /// Archive the active file under the period of `period_of` and open a new one.
    ///
    /// Failures go to the trap; writing then continues in the current file.
    fn roll_over(&mut self, period_of: &Zoned) {
        self.size = 0;
        match self.archive_active(period_of) {
            Ok(file) => self.file = file,
            Err(err) => {
                let err = Error::new("failed to roll over log file")
                    .with_context("path", self.naming.active_path().display())
                    .with_source(err);
                self.trap.trap(&err);
            }
        }
    }

    fn archive_active(&self, period_of: &Zoned) -> Result<File, Error> {
        let format = self.rotation.period_format();
        let period = format.map(|format| period_of.strftime(format).to_string());

        let mut same_period = self
            .naming
            .list_archives(format)
            .map_err(|err| read_dir_error(self.naming.dir(), err))?;
        same_period.retain(|archive| archive.period == period);
        // shift the newest last, so no rename overwrites an archive
        same_period.sort_by(|a, b| b.index.cmp(&a.index));
        for archive in &same_period {
            let next = self.naming.archive_path(period.as_deref(), archive.index + 1);
            rename(&archive.path, &next)?;
        }

        let active = self.naming.active_path();
        rename(&active, &self.naming.archive_path(period.as_deref(), 1))?;

        if let Some(max_backups) = self.max_backups {
            if let Err(err) = self.remove_oldest(max_backups.get()) {
                self.trap.trap(&err);
            }
        }

        open_active(&active)
    }

    /// Remove the oldest archives until at most `max_backups` remain.
    fn remove_oldest(&self, max_backups: usize) -> Result<(), Error> {
        let mut archives = self
            .naming
            .list_archives(self.rotation.period_format())
            .map_err(|err| read_dir_error(self.naming.dir(), err))?;
        if archives.len() <= max_backups {
            return Ok(());
        }

        archives.sort_by(Archive::by_age);
        let excess = archives.len() - max_backups;
        for archive in &archives[..excess] {
            fs::remove_file(&archive.path).map_err(|err| {
                Error::new("failed to remove old log")
                    .with_context("path", archive.path.display())
                    .with_source(err)
            })?;
        }
        Ok(())
    }
}

fn open_active(path: &Path) -> Result<File, Error> {
    OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|err| {
            Error::with_kind(ErrorKind::SinkCreateError, "failed to open log file")
                .with_context("path", path.display())
                .with_source(err)
        })
}

fn rename(from: &Path, to: &Path) -> Result<(), Error> {
    fs::rename(from, to).map_err(|err| {
        Error::new("failed to rename log file")
            .with_context("from", from.display())
            .with_context("to", to.display())
            .with_source(err)
    })
}

fn read_dir_error(dir: &Path, err: io::Error) -> Error {
    Error::new("failed to read log dir")
        .with_context("dir", dir.display())
        .with_source(err)
}

/// A builder for configuring [`RollingFileWriter`].
#[derive(Debug)]
pub struct RollingFileWriterBuilder {
    basedir: PathBuf,
    stem: String,
    suffix: String,
    rotation: Rotation,
    max_size: Option<NonZeroUsize>,
    max_backups: Option<NonZeroUsize>,
    clock: Clock,
    trap: Arc<dyn Trap>,
}

impl RollingFileWriterBuilder {
    /// Creates a new [`RollingFileWriterBuilder`] writing `{basedir}/{stem}.log`.
    #[must_use]
    pub fn new(basedir: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            basedir: basedir.into(),
            stem: stem.into(),
            suffix: "log".to_string(),
            rotation: Rotation::Never,
            max_size: None,
            max_backups: None,
            clock: Clock::System,
            trap: Arc::new(DefaultTrap::default()),
        }
    }

    /// Set the trap for failures during rollover.
    #[must_use]
    pub fn trap(mut self, trap: Arc<dyn Trap>) -> Self {
        self.trap = trap;
        self
    }

    /// Set the time based rotation. Default to [`Rotation::Never`].
    #[must_use]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the filename suffix. Default to `log`.
    #[must_use]
    pub fn filename_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Roll the active file over once it has reached `n` bytes.
    #[must_use]
    pub fn max_file_size(mut self, n: NonZeroUsize) -> Self {
        self.max_size = Some(n);
        self
    }

    /// Keep at most `n` archives besides the active file. Default to keeping every archive.
    #[must_use]
    pub fn max_backups(mut self, n: NonZeroUsize) -> Self {
        self.max_backups = Some(n);
        self
    }

    #[cfg(test)]
    fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Builds the [`RollingFileWriter`], appending to the active file if it exists.
    ///
    /// An existing active file keeps the rotation period of its last modification.
    ///
    /// # Errors
    ///
    /// Return [`ErrorKind::DirectoryCreateError`] if the base directory cannot be created, and
    /// [`ErrorKind::SinkCreateError`] if the stem or the suffix is empty or the active file
    /// cannot be opened.
    pub fn build(self) -> Result<RollingFileWriter, Error> {
        let Self {
            basedir,
            stem,
            suffix,
            rotation,
            max_size,
            max_backups,
            clock,
            trap,
        } = self;

        if stem.is_empty() || suffix.is_empty() {
            return Err(Error::with_kind(
                ErrorKind::SinkCreateError,
                "log file stem and suffix must not be empty",
            )
            .with_context("stem", &stem)
            .with_context("suffix", &suffix));
        }

        fs::create_dir_all(&basedir).map_err(|err| {
            Error::with_kind(
                ErrorKind::DirectoryCreateError,
                "failed to create log directory",
            )
            .with_context("dir", basedir.display())
            .with_source(err)
        })?;

        let naming = LogNaming::new(basedir, stem, suffix);
        let active = naming.active_path();
        let now = clock.now();
        let (size, last_write) = match fs::metadata(&active) {
            Ok(metadata) => {
                let modified = metadata
                    .modified()
                    .ok()
                    .and_then(|mtime| Zoned::try_from(mtime).ok())
                    .map(|mtime| mtime.with_time_zone(now.time_zone().clone()));
                (metadata.len() as usize, modified.unwrap_or_else(|| now.clone()))
            }
            Err(_) => (0, now),
        };
        let file = open_active(&active)?;

        Ok(RollingFileWriter {
            next_rollover: rotation.next_rollover(&last_write),
            naming,
            rotation,
            max_size,
            max_backups,
            file,
            size,
            last_write,
            clock,
            trap,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Write;
    use std::num::NonZeroUsize;
    use std::path::Path;
    use std::str::FromStr;

    use jiff::ToSpan;
    use jiff::Zoned;
    use tempfile::TempDir;

    use super::*;

    fn list(dir: &Path) -> Vec<String> {
        let mut files = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect::<Vec<_>>();
        files.sort();
        files
    }

    fn read(dir: &Path, name: &str) -> String {
        fs::read_to_string(dir.join(name)).unwrap()
    }

    fn manual(time: &str) -> Clock {
        Clock::Manual(Zoned::from_str(time).unwrap())
    }

    #[test]
    fn test_size_rollover_shifts_archives() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        let mut writer = RollingFileWriterBuilder::new(dir, "svc")
            .max_file_size(NonZeroUsize::new(10).unwrap())
            .build()
            .unwrap();

        for line in ["first 0001\n", "second 002\n", "third 0003\n"] {
            writer.write_all(line.as_bytes()).unwrap();
        }
        writer.flush().unwrap();

        assert_eq!(list(dir), vec!["svc.1.log", "svc.2.log", "svc.log"]);
        assert_eq!(read(dir, "svc.2.log"), "first 0001\n");
        assert_eq!(read(dir, "svc.1.log"), "second 002\n");
        assert_eq!(read(dir, "svc.log"), "third 0003\n");
    }

    #[test]
    fn test_max_backups_counts_archives_only() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        let mut writer = RollingFileWriterBuilder::new(dir, "svc")
            .filename_suffix("log.wf")
            .max_file_size(NonZeroUsize::new(8).unwrap())
            .max_backups(NonZeroUsize::new(2).unwrap())
            .build()
            .unwrap();

        for i in 0..10 {
            writer.write_all(format!("line {i:02}\n").as_bytes()).unwrap();
        }
        writer.flush().unwrap();

        assert_eq!(list(dir), vec!["svc.1.log.wf", "svc.2.log.wf", "svc.log.wf"]);
        assert_eq!(read(dir, "svc.2.log.wf"), "line 07\n");
        assert_eq!(read(dir, "svc.1.log.wf"), "line 08\n");
        assert_eq!(read(dir, "svc.log.wf"), "line 09\n");
    }

    #[test]
    fn test_time_rollover_names_archive_after_previous_period() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        let mut writer = RollingFileWriterBuilder::new(dir, "svc")
            .filename_suffix("log.wf")
            .rotation(Rotation::Hourly)
            .clock(manual("2024-08-10T10:00:00[UTC]"))
            .build()
            .unwrap();

        writer.write_all(b"a\n").unwrap();
        writer.clock.set_now(Zoned::from_str("2024-08-10T10:59:59[UTC]").unwrap());
        writer.write_all(b"b\n").unwrap();
        // a whole idle hour passes
        writer.clock.set_now(Zoned::from_str("2024-08-10T12:30:00[UTC]").unwrap());
        writer.write_all(b"c\n").unwrap();
        writer.clock.set_now(Zoned::from_str("2024-08-10T13:00:00[UTC]").unwrap());
        writer.write_all(b"d\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(
            list(dir),
            vec![
                "svc.2024-08-10-10.1.log.wf",
                "svc.2024-08-10-12.1.log.wf",
                "svc.log.wf",
            ]
        );
        assert_eq!(read(dir, "svc.2024-08-10-10.1.log.wf"), "a\nb\n");
        assert_eq!(read(dir, "svc.2024-08-10-12.1.log.wf"), "c\n");
        assert_eq!(read(dir, "svc.log.wf"), "d\n");
    }

    #[test]
    fn test_size_and_time_rollover_combine() {
        for (rotation, period, step, format) in [
            (Rotation::Minutely, 1.minute(), 10.seconds(), "%Y-%m-%d-%H-%M"),
            (Rotation::Hourly, 1.hour(), 10.minutes(), "%Y-%m-%d-%H"),
            (Rotation::Daily, 1.day(), 4.hours(), "%Y-%m-%d"),
        ] {
            let temp_dir = TempDir::new().unwrap();
            let dir = temp_dir.path();
            let start = Zoned::from_str("2024-08-10T00:00:00[UTC]").unwrap();
            let mut writer = RollingFileWriterBuilder::new(dir, "svc")
                .rotation(rotation)
                .max_file_size(NonZeroUsize::new(18).unwrap())
                .max_backups(NonZeroUsize::new(4).unwrap())
                .clock(Clock::Manual(start.clone()))
                .build()
                .unwrap();

            // three periods of six 6-byte lines; every third line fills a file
            let mut periods = vec![];
            for p in 0..3i64 {
                let period_start = start.checked_add(period.checked_mul(p).unwrap()).unwrap();
                periods.push(period_start.strftime(format).to_string());
                for k in 0..6i64 {
                    let now = period_start.checked_add(step.checked_mul(k).unwrap()).unwrap();
                    writer.clock.set_now(now);
                    writer.write_all(format!("p{p} l{k}\n").as_bytes()).unwrap();
                }
            }
            writer.flush().unwrap();

            let archive = |p: usize, index: usize| format!("svc.{}.{index}.log", periods[p]);
            // five archives were written, the oldest one was removed
            let mut expected = vec![
                archive(0, 1),
                archive(1, 1),
                archive(1, 2),
                archive(2, 1),
                "svc.log".to_string(),
            ];
            expected.sort();
            assert_eq!(list(dir), expected, "{rotation:?}");

            assert_eq!(read(dir, &archive(0, 1)), "p0 l3\np0 l4\np0 l5\n", "{rotation:?}");
            assert_eq!(read(dir, &archive(1, 2)), "p1 l0\np1 l1\np1 l2\n", "{rotation:?}");
            assert_eq!(read(dir, &archive(1, 1)), "p1 l3\np1 l4\np1 l5\n", "{rotation:?}");
            assert_eq!(read(dir, &archive(2, 1)), "p2 l0\np2 l1\np2 l2\n", "{rotation:?}");
            assert_eq!(read(dir, "svc.log"), "p2 l3\np2 l4\np2 l5\n", "{rotation:?}");
        }
    }

    #[test]
    fn test_foreign_files_are_left_alone() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        let foreign = ["svc.log.wf", "svc.1.log.wf", "svclog", "svc-other.log", "notes.txt"];
        for name in foreign {
            fs::write(dir.join(name), name).unwrap();
        }

        let mut writer = RollingFileWriterBuilder::new(dir, "svc")
            .max_file_size(NonZeroUsize::new(16).unwrap())
            .max_backups(NonZeroUsize::new(1).unwrap())
            .build()
            .unwrap();
        for _ in 0..10 {
            writer.write_all(b"0123456789abcdef\n").unwrap();
        }
        writer.flush().unwrap();

        for name in foreign {
            assert_eq!(read(dir, name), name);
        }
        assert!(dir.join("svc.log").exists());
        assert!(dir.join("svc.1.log").exists());
        assert!(!dir.join("svc.2.log").exists());
    }

    #[test]
    fn test_reopen_appends_and_keeps_size() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();

        for line in ["first\n", "second\n"] {
            let mut writer = RollingFileWriterBuilder::new(dir, "svc")
                .max_file_size(NonZeroUsize::new(12).unwrap())
                .build()
                .unwrap();
            writer.write_all(line.as_bytes()).unwrap();
        }
        assert_eq!(list(dir), vec!["svc.log"]);
        assert_eq!(read(dir, "svc.log"), "first\nsecond\n");

        // the reopened file is already full
        let mut writer = RollingFileWriterBuilder::new(dir, "svc")
            .max_file_size(NonZeroUsize::new(12).unwrap())
            .build()
            .unwrap();
        writer.write_all(b"third\n").unwrap();
        assert_eq!(list(dir), vec!["svc.1.log", "svc.log"]);
        assert_eq!(read(dir, "svc.log"), "third\n");
    }

    #[test]
    fn test_empty_stem_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let err = RollingFileWriterBuilder::new(temp_dir.path(), "")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SinkCreateError);
        assert!(list(temp_dir.path()).is_empty());
    }
}
