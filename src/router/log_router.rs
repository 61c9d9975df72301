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

use std::fmt;
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use crate::Append;
use crate::Error;
use crate::ErrorKind;
use crate::Layout;
use crate::Trap;
use crate::append::AsyncBuilder;
use crate::append::FileBuilder;
use crate::append::Stdout;
use crate::append::file::Rotation;
use crate::layout::CompactLayout;
use crate::layout::VerboseLayout;
use crate::record::Record;
use crate::record::Severity;
use crate::router::Destination;
use crate::router::RollInterval;
use crate::router::RouterConfig;
use crate::router::config::MAIN_LOG_SUFFIX;
use crate::router::config::WARN_LOG_SUFFIX;
use crate::trap::DefaultTrap;

/// A router dispatching every record to the destinations whose threshold it meets.
///
/// A router always writes `{program_name}.log` in its log directory. Depending on its config it
/// also writes records at `WARNING` and above to `{program_name}.log.wf`, and every accepted
/// record to the standard output.
///
/// Writing never fails from the caller's point of view: errors raised by a destination are
/// handed to the router's [`Trap`]. Dropping the router [closes](LogRouter::close) it.
#[derive(Debug)]
pub struct LogRouter {
    config: RouterConfig,
    threshold: Severity,
    destinations: Vec<Destination>,
    trap: Arc<dyn Trap>,
    closed: AtomicBool,
}

impl LogRouter {
    /// Build a router from `config`, reporting steady-state failures to [`DefaultTrap`].
    ///
    /// The steps are, in order:
    ///
    /// 1. validate the roll interval;
    /// 2. create the log directory and its parents if absent;
    /// 3. resolve the threshold with [`RouterConfig::threshold`];
    /// 4. open the console, main file and warning file destinations that are enabled.
    ///
    /// Destinations opened before a failure are closed again.
    ///
    /// # Errors
    ///
    /// * [`ErrorKind::InvalidRotationInterval`] if `when` is unknown, even with rotation off.
    /// * [`ErrorKind::DirectoryCreateError`] if the log directory cannot be created.
    /// * [`ErrorKind::SinkCreateError`] if a log file cannot be opened, including when the
    ///   trimmed program name is empty.
    pub fn new(config: RouterConfig) -> Result<LogRouter, Error> {
        Self::with_trap(config, Arc::new(DefaultTrap::default()))
    }

    pub(crate) fn with_trap(config: RouterConfig, trap: Arc<dyn Trap>) -> Result<LogRouter, Error> {
        let interval = config.roll_interval()?;
        create_log_dir(config.log_dir())?;
        let threshold = config.threshold();

        let mut destinations = Vec::with_capacity(3);
        if config.stdout() {
            let stdout = Stdout::default().with_layout(make_layout(&config, true));
            destinations.push(Destination::new("stdout", threshold, stdout));
        }
        destinations.push(open_file(
            &config,
            interval,
            MAIN_LOG_SUFFIX,
            threshold,
            &trap,
        )?);
        if config.warn_file() {
            destinations.push(open_file(
                &config,
                interval,
                WARN_LOG_SUFFIX,
                Severity::Warning,
                &trap,
            )?);
        }

        Ok(LogRouter {
            config,
            threshold,
            destinations,
            trap,
            closed: AtomicBool::new(false),
        })
    }

    /// The config the router was built from.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// The effective minimum severity of the router.
    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    /// The destinations of the router, in dispatch order.
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub(crate) fn trap(&self) -> &dyn Trap {
        self.trap.as_ref()
    }

    /// Whether a record of `severity` would reach at least one destination.
    pub fn enabled(&self, severity: Severity) -> bool {
        !self.is_closed() && self.destinations.iter().any(|d| d.accepts(severity))
    }

    /// Whether [`close`](LogRouter::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Write `message` at `severity` to every destination accepting it.
    ///
    /// The message is not formatted if no destination accepts it. With non-blocking writes, this
    /// only enqueues the record. After [`close`](LogRouter::close), this does nothing.
    #[track_caller]
    pub fn emit(&self, severity: Severity, message: impl fmt::Display) {
        if !self.enabled(severity) {
            return;
        }

        let location = std::panic::Location::caller();
        let payload = message.to_string();
        let record = Record::builder()
            .severity(severity)
            .target(self.config.file_stem())
            .file(Some(location.file()))
            .line(Some(location.line()))
            .payload(payload)
            .build();
        self.log(&record);
    }

    /// Write a pre-built record to every destination accepting it.
    pub fn log(&self, record: &Record) {
        if self.is_closed() {
            return;
        }

        for destination in &self.destinations {
            if let Err(err) = destination.append(record) {
                // a concurrent close makes late writes fail; those records are dropped silently
                if !self.is_closed() {
                    self.trap.trap(&err);
                }
            }
        }
    }

    /// Emit a message at `DEBUG`.
    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) {
        self.emit(Severity::Debug, message)
    }

    /// Emit a message at `TRACE`.
    #[track_caller]
    pub fn trace(&self, message: impl fmt::Display) {
        self.emit(Severity::Trace, message)
    }

    /// Emit a message at `INFO`.
    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        self.emit(Severity::Info, message)
    }

    /// Emit a message at `WARNING`.
    #[track_caller]
    pub fn warn(&self, message: impl fmt::Display) {
        self.emit(Severity::Warning, message)
    }

    /// Emit a message at `ERROR`.
    #[track_caller]
    pub fn error(&self, message: impl fmt::Display) {
        self.emit(Severity::Error, message)
    }

    /// Emit a message at `CRITICAL`.
    #[track_caller]
    pub fn critical(&self, message: impl fmt::Display) {
        self.emit(Severity::Critical, message)
    }

    /// Block until every record emitted before the call is written and flushed.
    ///
    /// # Errors
    ///
    /// Return the first destination error. Later errors go to the trap.
    pub fn flush(&self) -> Result<(), Error> {
        if self.is_closed() {
            return Ok(());
        }

        self.each_destination(Destination::flush)
    }

    /// Flush and release every destination.
    ///
    /// When this returns, every record emitted before the call is written, worker threads are
    /// joined and files are closed. Calling it again returns `Ok(())`.
    ///
    /// # Errors
    ///
    /// Return the first destination error. Later errors go to the trap.
    pub fn close(&self) -> Result<(), Error> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }

        self.each_destination(Destination::close)
    }

    fn each_destination(&self, f: fn(&Destination) -> Result<(), Error>) -> Result<(), Error> {
        let mut result = Ok(());
        for destination in &self.destinations {
            if let Err(err) = f(destination) {
                if result.is_ok() {
                    result = Err(err);
                } else {
                    self.trap.trap(&err);
                }
            }
        }
        result
    }
}

impl Drop for LogRouter {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            self.trap.trap(&err);
        }
    }
}

fn make_layout(config: &RouterConfig, colored: bool) -> Box<dyn Layout> {
    match (config.debug_format(), colored) {
        (true, true) => Box::new(VerboseLayout::default().colored()),
        (true, false) => Box::new(VerboseLayout::default()),
        (false, true) => Box::new(CompactLayout::default().colored()),
        (false, false) => Box::new(CompactLayout::default()),
    }
}

fn open_file(
    config: &RouterConfig,
    interval: RollInterval,
    suffix: &str,
    threshold: Severity,
    trap: &Arc<dyn Trap>,
) -> Result<Destination, Error> {
    let mut builder = FileBuilder::new(config.log_dir(), config.file_stem())
        .filename_suffix(suffix)
        .layout(make_layout(config, false))
        .trap(trap.clone());

    if config.rotate() {
        builder = builder.rotation(interval.rotation());
        if let Some(size) = config.max_file_size() {
            builder = builder.rollover_size(size);
        }
    } else {
        builder = builder.rotation(Rotation::Never);
    }
    if let Some(backups) = NonZeroUsize::new(config.backup_count()) {
        builder = builder.max_backups(backups);
    }

    let file = builder.build()?;
    let name = format!("{}.{suffix}", config.file_stem());
    let append: Box<dyn Append> = if config.non_blocking() {
        let thread_name = format!("logroute-{}-{}", config.file_stem(), suffix.replace('.', "-"));
        let asynchronous = AsyncBuilder::new(thread_name)
            .trap(trap.clone())
            .append(file)
            .build()?;
        Box::new(asynchronous)
    } else {
        Box::new(file)
    };

    Ok(Destination::new(name, threshold, append))
}

fn create_log_dir(dir: &Path) -> Result<(), Error> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }

    builder.create(dir).map_err(|err| {
        Error::with_kind(
            ErrorKind::DirectoryCreateError,
            "failed to create log directory",
        )
        .with_context("path", dir.display())
        .with_source(err)
    })
}
