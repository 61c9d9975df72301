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

use std::num::NonZeroUsize;
use std::path::Path;
use std::path::PathBuf;

use crate::Error;
use crate::record::Severity;
use crate::router::RollInterval;

pub(crate) const MAIN_LOG_SUFFIX: &str = "log";
pub(crate) const WARN_LOG_SUFFIX: &str = "log.wf";

/// An immutable snapshot of the settings a [`LogRouter`](crate::LogRouter) is built from.
///
/// Settings are not validated until the router is built. Use
/// [`RouterBuilder`](crate::RouterBuilder) to assemble one fluently.
///
/// With the `serde` feature enabled, the config can be deserialized from a service's own config
/// file. Only `program_name` is required; every other field falls back to its default.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouterConfig {
    pub(crate) program_name: String,
    #[cfg_attr(feature = "serde", serde(default = "defaults::log_dir"))]
    pub(crate) log_dir: PathBuf,
    #[cfg_attr(feature = "serde", serde(default = "defaults::level"))]
    pub(crate) level: String,
    #[cfg_attr(feature = "serde", serde(default = "defaults::when"))]
    pub(crate) when: String,
    #[cfg_attr(feature = "serde", serde(default = "defaults::backup_count"))]
    pub(crate) backup_count: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub(crate) max_file_size: Option<NonZeroUsize>,
    #[cfg_attr(feature = "serde", serde(default = "defaults::enabled"))]
    pub(crate) rotate: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub(crate) stdout: bool,
    #[cfg_attr(feature = "serde", serde(default = "defaults::enabled"))]
    pub(crate) warn_file: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub(crate) debug_format: bool,
    #[cfg_attr(feature = "serde", serde(default = "defaults::enabled"))]
    pub(crate) non_blocking: bool,
}

mod defaults {
    use std::path::PathBuf;

    pub(super) fn log_dir() -> PathBuf {
        PathBuf::from("log")
    }

    pub(super) fn level() -> String {
        "INFO".to_string()
    }

    pub(super) fn when() -> String {
        "MIDNIGHT".to_string()
    }

    pub(super) fn backup_count() -> usize {
        7
    }

    pub(super) fn enabled() -> bool {
        true
    }
}

impl RouterConfig {
    /// Create a config for `program_name` with every other setting at its default.
    ///
    /// | setting         | default      |
    /// |-----------------|--------------|
    /// | `log_dir`       | `"log"`      |
    /// | `level`         | `"INFO"`     |
    /// | `when`          | `"MIDNIGHT"` |
    /// | `backup_count`  | `7`          |
    /// | `max_file_size` | unset        |
    /// | `rotate`        | `true`       |
    /// | `stdout`        | `false`      |
    /// | `warn_file`     | `true`       |
    /// | `debug_format`  | `false`      |
    /// | `non_blocking`  | `true`       |
    pub fn new(program_name: impl Into<String>) -> Self {
        Self {
            program_name: program_name.into(),
            log_dir: defaults::log_dir(),
            level: defaults::level(),
            when: defaults::when(),
            backup_count: defaults::backup_count(),
            max_file_size: None,
            rotate: defaults::enabled(),
            stdout: false,
            warn_file: defaults::enabled(),
            debug_format: false,
            non_blocking: defaults::enabled(),
        }
    }

    /// The program name, used verbatim (after trimming) as the log file stem.
    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    /// The directory holding the log files.
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// The configured level name. See [`RouterConfig::threshold`] for how it is interpreted.
    pub fn level(&self) -> &str {
        &self.level
    }

    /// The configured roll interval code.
    pub fn when(&self) -> &str {
        &self.when
    }

    /// How many rolled files are kept besides the active one. `0` keeps every file.
    pub fn backup_count(&self) -> usize {
        self.backup_count
    }

    /// The size in bytes above which a log file is rolled over, if any.
    pub fn max_file_size(&self) -> Option<NonZeroUsize> {
        self.max_file_size
    }

    /// Whether log files are rolled over at all.
    pub fn rotate(&self) -> bool {
        self.rotate
    }

    /// Whether records are also written to the standard output.
    pub fn stdout(&self) -> bool {
        self.stdout
    }

    /// Whether records at `WARNING` and above are also written to `{program_name}.log.wf`.
    pub fn warn_file(&self) -> bool {
        self.warn_file
    }

    /// Whether the verbose debugging layout is used, forcing the threshold to `DEBUG`.
    pub fn debug_format(&self) -> bool {
        self.debug_format
    }

    /// Whether files are written on dedicated worker threads.
    pub fn non_blocking(&self) -> bool {
        self.non_blocking
    }

    /// The effective minimum severity of the router.
    ///
    /// `DEBUG` when [`debug_format`](RouterConfig::debug_format) is on; otherwise the level name
    /// mapped with [`Severity::from_name_or_info`].
    pub fn threshold(&self) -> Severity {
        if self.debug_format {
            Severity::Debug
        } else {
            Severity::from_name_or_info(&self.level)
        }
    }

    /// Parse the configured roll interval.
    ///
    /// # Errors
    ///
    /// Return [`ErrorKind::InvalidRotationInterval`](crate::ErrorKind::InvalidRotationInterval)
    /// if `when` is not one of `M`, `H`, `D` or `MIDNIGHT`.
    pub fn roll_interval(&self) -> Result<RollInterval, Error> {
        self.when.parse()
    }

    /// The stem of the log file names: the trimmed program name.
    pub fn file_stem(&self) -> &str {
        self.program_name.trim()
    }

    /// The path of the main log file, `{log_dir}/{program_name}.log`.
    pub fn main_log_path(&self) -> PathBuf {
        self.log_path(MAIN_LOG_SUFFIX)
    }

    /// The path of the warning log file, `{log_dir}/{program_name}.log.wf`.
    pub fn warn_log_path(&self) -> PathBuf {
        self.log_path(WARN_LOG_SUFFIX)
    }

    fn log_path(&self, suffix: &str) -> PathBuf {
        self.log_dir.join(format!("{}.{suffix}", self.file_stem()))
    }
}
